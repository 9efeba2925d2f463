pub mod power;
pub mod stats;

pub use power::{stdev_to_log, to_dbm, to_linear_mw};
pub use stats::{mean, sample_stdev};
