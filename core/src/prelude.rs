pub use crate::dataset::{Dataset, DatasetBuilder, DatasetConfig, MapOverlay, MeasurementTable};
pub use crate::measurement::{CellAggregate, MeasurementRecord, Tower};
pub use crate::{LinkBudget, SignalError, SignalResult};
