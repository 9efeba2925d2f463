pub mod cell;
pub mod record;
pub mod tower;

pub use cell::CellAggregate;
pub use record::MeasurementRecord;
pub use tower::Tower;
