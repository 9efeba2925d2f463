pub mod model;

pub use model::{CellReport, SurveySummary};
