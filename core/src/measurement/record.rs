use serde::{Deserialize, Serialize};

/// One geolocated signal observation, in the canonical survey schema.
///
/// Created once when raw input is parsed and immutable afterwards. Every
/// field is required; the ingest layer rejects partial rows before a record
/// is ever built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    // Serving-cell identity.
    pub mcc: u16,
    pub mnc: u16,
    pub lac: u32,
    pub cell_id: u64,
    pub pci: u32,
    pub tac: u32,
    // Receiver position, degrees.
    pub lat: f64,
    pub lon: f64,
    // Radio state.
    pub signal_dbm: f64,
    /// Access-technology tag as reported by the device (e.g. "LTE").
    pub act: String,
    /// Timing advance; correlates with round-trip distance to the tower.
    pub ta: f64,
    pub rating: f64,
    // Receiver kinematics.
    pub speed: f64,
    pub direction: f64,
    /// Observation timestamp, epoch milliseconds.
    pub measured_at: u64,
}
