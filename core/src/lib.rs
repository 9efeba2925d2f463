//! Measurement-aggregation and propagation-modeling core for cellular
//! signal surveys.
//!
//! The modules take already-parsed, geolocated radio measurements, group
//! them by serving cell, and derive per-cell power statistics, distances,
//! and link-budget path-loss estimates for downstream plotting. All file
//! and network I/O lives outside this crate; the core only carries paths.

pub mod dataset;
pub mod geo;
pub mod math;
pub mod measurement;
pub mod prelude;
pub mod telemetry;

use serde::{Deserialize, Serialize};

/// Transmit/receive parameters for a link-budget path-loss estimate.
///
/// Path loss is computed as `tx_power_dbm - signal - tx_gain_db -
/// rx_gain_db`; no propagation model beyond this subtraction is assumed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinkBudget {
    pub tx_power_dbm: f64,
    pub tx_gain_db: f64,
    pub rx_gain_db: f64,
}

impl LinkBudget {
    pub fn new(tx_power_dbm: f64, tx_gain_db: f64, rx_gain_db: f64) -> Self {
        Self {
            tx_power_dbm,
            tx_gain_db,
            rx_gain_db,
        }
    }
}

/// Common error type for survey computation.
#[derive(thiserror::Error, Debug)]
pub enum SignalError {
    #[error("schema violation: {0}")]
    Schema(String),
    #[error("cell {cell_id}: statistic needs at least {needed} samples, got {got}")]
    EmptyAggregate {
        cell_id: u64,
        needed: usize,
        got: usize,
    },
    #[error("cell {0} not present in dataset")]
    CellNotFound(u64),
    #[error("domain error: {0}")]
    Domain(String),
}

pub type SignalResult<T> = Result<T, SignalError>;
