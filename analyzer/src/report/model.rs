use serde::{Deserialize, Serialize};
use signalcore::prelude::MapOverlay;

/// Per-cell analysis output for the plotting layer.
///
/// `distances_m`, `path_loss_db`, and `signal_dbm` are index-aligned with
/// the cell's records in input order. Spread fields are absent for cells
/// with a single record; distance and path-loss sequences are absent when
/// no tower was configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellReport {
    pub cell_id: u64,
    pub record_count: usize,
    pub mean_power_mw: f64,
    pub mean_power_dbm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdev_power_mw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdev_power_log: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances_m: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_loss_db: Option<Vec<f64>>,
    pub signal_dbm: Vec<f64>,
}

/// Whole-run output: dataset-level enumerations for selection UIs plus the
/// per-cell reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySummary {
    pub record_count: usize,
    pub cell_count: usize,
    pub mobile_country_codes: Vec<u16>,
    pub mobile_network_codes: Vec<u16>,
    pub location_area_codes: Vec<u32>,
    pub cell_ids: Vec<u64>,
    pub overlay: MapOverlay,
    pub reports: Vec<CellReport>,
}
