use anyhow::Context;
use serde::Deserialize;
use signalcore::prelude::{MeasurementRecord, MeasurementTable, SignalError};
use std::path::{Path, PathBuf};

/// One CSV row in the OpenCellID-style export schema.
///
/// Only the canonical columns are declared; extra columns some exporters
/// add (`bid`, `sid`, `nid`, `psc`, ...) are ignored by serde. A missing
/// or non-numeric canonical column fails the row immediately.
#[derive(Debug, Deserialize)]
struct RawRow {
    mcc: u16,
    mnc: u16,
    lac: u32,
    cellid: u64,
    pci: u32,
    tac: u32,
    lat: f64,
    lon: f64,
    signal: f64,
    act: String,
    ta: f64,
    rating: f64,
    speed: f64,
    direction: f64,
    measured_at: u64,
}

impl From<RawRow> for MeasurementRecord {
    fn from(row: RawRow) -> Self {
        MeasurementRecord {
            mcc: row.mcc,
            mnc: row.mnc,
            lac: row.lac,
            cell_id: row.cellid,
            pci: row.pci,
            tac: row.tac,
            lat: row.lat,
            lon: row.lon,
            signal_dbm: row.signal,
            act: row.act,
            ta: row.ta,
            rating: row.rating,
            speed: row.speed,
            direction: row.direction,
            measured_at: row.measured_at,
        }
    }
}

/// Reads one survey CSV into a measurement table, preserving row order.
pub fn load_table(path: &Path) -> anyhow::Result<MeasurementTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening survey data {}", path.display()))?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        // Header is line 1, so the first data row is line 2.
        let row = row.map_err(|e| {
            SignalError::Schema(format!("{} line {}: {}", path.display(), index + 2, e))
        })?;
        records.push(MeasurementRecord::from(row));
    }

    Ok(MeasurementTable::new(path, records))
}

/// Reads several survey CSVs, keeping the given file order so the dataset
/// concatenates rows the way they were supplied.
pub fn load_tables(paths: &[PathBuf]) -> anyhow::Result<Vec<MeasurementTable>> {
    paths.iter().map(|p| load_table(p)).collect()
}
