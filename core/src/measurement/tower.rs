use crate::geo;
use crate::measurement::MeasurementRecord;
use crate::SignalResult;
use serde::{Deserialize, Serialize};

/// A candidate or known transmitter location.
///
/// Immutable value; aggregates never own a tower, they borrow one per
/// query. Height, when known, lets distance queries account for the mast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub lat: f64,
    pub lon: f64,
    pub height_m: Option<f64>,
    pub label: Option<String>,
}

impl Tower {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            height_m: None,
            label: None,
        }
    }

    pub fn with_height(mut self, height_m: f64) -> Self {
        self.height_m = Some(height_m);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Great-circle distance from the tower to a point, in kilometers.
    pub fn distance_to(&self, lat: f64, lon: f64) -> SignalResult<f64> {
        geo::distance(self.lat, self.lon, lat, lon)
    }

    /// Distances from the tower to each record, in kilometers, preserving
    /// record order.
    pub fn distances(&self, records: &[MeasurementRecord]) -> SignalResult<Vec<f64>> {
        records
            .iter()
            .map(|record| self.distance_to(record.lat, record.lon))
            .collect()
    }
}
