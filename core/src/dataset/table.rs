use crate::measurement::MeasurementRecord;
use std::path::{Path, PathBuf};

/// One already-parsed tabular input, in row order.
///
/// Produced outside the core (CSV ingest, synthetic generator); the core
/// never reads file bytes. The source path is carried so the dataset can
/// derive its data root for sibling-file conventions.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    source: PathBuf,
    records: Vec<MeasurementRecord>,
}

impl MeasurementTable {
    pub fn new(source: impl Into<PathBuf>, records: Vec<MeasurementRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<MeasurementRecord> {
        self.records
    }
}
