//! Dataset orchestration: concatenates tabular inputs, groups records by
//! serving cell, and caches the identifier sets the selection UIs need.

pub mod overlay;
pub mod table;

pub use overlay::MapOverlay;
pub use table::MeasurementTable;

use crate::measurement::{CellAggregate, MeasurementRecord};
use crate::telemetry::LogManager;
use crate::{SignalError, SignalResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Options recognised when assembling a [`Dataset`].
///
/// Map overlay paths default to `map.png` and `bbox.txt` next to the first
/// input table (the convention the survey capture tooling writes); set
/// them explicitly to point anywhere else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub map_image_path: Option<PathBuf>,
    pub bbox_path: Option<PathBuf>,
}

/// First phase of the two-phase build: collect tables, then `build()`.
///
/// Grouping errors surface from `build()` with construction-phase
/// attribution instead of from scattered accessors later.
pub struct DatasetBuilder {
    config: DatasetConfig,
    tables: Vec<MeasurementTable>,
    logger: LogManager,
}

impl DatasetBuilder {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            tables: Vec::new(),
            logger: LogManager::new(),
        }
    }

    pub fn push_table(&mut self, table: MeasurementTable) -> &mut Self {
        self.tables.push(table);
        self
    }

    /// Concatenates all tables preserving row order across inputs, groups
    /// by cell id, and freezes the result.
    pub fn build(self) -> SignalResult<Dataset> {
        let first = self
            .tables
            .first()
            .ok_or_else(|| SignalError::Schema("dataset requires at least one input table".into()))?;

        let data_root = first
            .source()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let overlay = MapOverlay::new(
            self.config
                .map_image_path
                .unwrap_or_else(|| data_root.join("map.png")),
            self.config
                .bbox_path
                .unwrap_or_else(|| data_root.join("bbox.txt")),
        );

        let records: Vec<MeasurementRecord> = self
            .tables
            .into_iter()
            .flat_map(MeasurementTable::into_records)
            .collect();
        let record_count = records.len();

        let mobile_country_codes = distinct(records.iter().map(|r| r.mcc));
        let mobile_network_codes = distinct(records.iter().map(|r| r.mnc));
        let location_area_codes = distinct(records.iter().map(|r| r.lac));

        // Row-order columns are extracted before the records move into
        // their aggregates, which keep exclusive ownership afterwards.
        let latitudes = Array1::from_iter(records.iter().map(|r| r.lat));
        let longitudes = Array1::from_iter(records.iter().map(|r| r.lon));
        let signal_dbm = Array1::from_iter(records.iter().map(|r| r.signal_dbm));
        let speeds = Array1::from_iter(records.iter().map(|r| r.speed));
        let directions = Array1::from_iter(records.iter().map(|r| r.direction));
        let physical_cell_ids = Array1::from_iter(records.iter().map(|r| f64::from(r.pci)));
        let ratings = Array1::from_iter(records.iter().map(|r| r.rating));
        let timing_advances = Array1::from_iter(records.iter().map(|r| r.ta));
        let access_technologies: Vec<String> = records.iter().map(|r| r.act.clone()).collect();
        let timestamps_ms = Array1::from_iter(records.iter().map(|r| r.measured_at as f64));

        let mut groups: BTreeMap<u64, Vec<MeasurementRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.cell_id).or_default().push(record);
        }

        let mut cells = BTreeMap::new();
        for (cell_id, group) in groups {
            cells.insert(cell_id, CellAggregate::new(cell_id, group)?);
        }

        self.logger.record(&format!(
            "dataset built: {} records across {} cells (root {})",
            record_count,
            cells.len(),
            data_root.display()
        ));

        Ok(Dataset {
            data_root,
            overlay,
            cells,
            record_count,
            mobile_country_codes,
            mobile_network_codes,
            location_area_codes,
            latitudes,
            longitudes,
            signal_dbm,
            speeds,
            directions,
            physical_cell_ids,
            ratings,
            timing_advances,
            access_technologies,
            timestamps_ms,
        })
    }
}

fn distinct<T: Ord + Copy>(values: impl Iterator<Item = T>) -> Vec<T> {
    values.collect::<BTreeSet<T>>().into_iter().collect()
}

/// The frozen survey: per-cell aggregates plus row-order columns and the
/// cached identifier sets.
#[derive(Debug)]
pub struct Dataset {
    data_root: PathBuf,
    overlay: MapOverlay,
    cells: BTreeMap<u64, CellAggregate>,
    record_count: usize,
    mobile_country_codes: Vec<u16>,
    mobile_network_codes: Vec<u16>,
    location_area_codes: Vec<u32>,
    latitudes: Array1<f64>,
    longitudes: Array1<f64>,
    signal_dbm: Array1<f64>,
    speeds: Array1<f64>,
    directions: Array1<f64>,
    physical_cell_ids: Array1<f64>,
    ratings: Array1<f64>,
    timing_advances: Array1<f64>,
    access_technologies: Vec<String>,
    timestamps_ms: Array1<f64>,
}

impl Dataset {
    /// The aggregate for one serving cell; unobserved ids are an error,
    /// never a default empty aggregate.
    pub fn cell(&self, cell_id: u64) -> SignalResult<&CellAggregate> {
        self.cells
            .get(&cell_id)
            .ok_or(SignalError::CellNotFound(cell_id))
    }

    /// All aggregates in ascending cell-id order.
    pub fn cells(&self) -> impl Iterator<Item = &CellAggregate> {
        self.cells.values()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Distinct cell ids observed, ascending.
    pub fn cell_ids(&self) -> Vec<u64> {
        self.cells.keys().copied().collect()
    }

    pub fn mobile_country_codes(&self) -> &[u16] {
        &self.mobile_country_codes
    }

    pub fn mobile_network_codes(&self) -> &[u16] {
        &self.mobile_network_codes
    }

    pub fn location_area_codes(&self) -> &[u32] {
        &self.location_area_codes
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn overlay(&self) -> &MapOverlay {
        &self.overlay
    }

    // Row-order columns, aligned to the concatenated input order.

    pub fn latitudes(&self) -> &Array1<f64> {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &Array1<f64> {
        &self.longitudes
    }

    pub fn signal_dbm(&self) -> &Array1<f64> {
        &self.signal_dbm
    }

    pub fn speeds(&self) -> &Array1<f64> {
        &self.speeds
    }

    pub fn directions(&self) -> &Array1<f64> {
        &self.directions
    }

    pub fn physical_cell_ids(&self) -> &Array1<f64> {
        &self.physical_cell_ids
    }

    pub fn ratings(&self) -> &Array1<f64> {
        &self.ratings
    }

    pub fn timing_advances(&self) -> &Array1<f64> {
        &self.timing_advances
    }

    /// Access-technology tag per row, as reported by the device.
    pub fn access_technologies(&self) -> &[String] {
        &self.access_technologies
    }

    pub fn timestamps_ms(&self) -> &Array1<f64> {
        &self.timestamps_ms
    }

    /// Seconds elapsed since the first observation, per row.
    pub fn normalized_times_s(&self) -> Array1<f64> {
        match self.timestamps_ms.first() {
            Some(&t0) => self.timestamps_ms.mapv(|t| (t - t0) / 1000.0),
            None => Array1::zeros(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cell_id: u64, mcc: u16, signal_dbm: f64, measured_at: u64) -> MeasurementRecord {
        MeasurementRecord {
            mcc,
            mnc: 720,
            lac: 11,
            cell_id,
            pci: 101,
            tac: 0,
            lat: 43.65,
            lon: -79.38,
            signal_dbm,
            act: "LTE".into(),
            ta: 2.0,
            rating: 1.0,
            speed: 1.5,
            direction: 90.0,
            measured_at,
        }
    }

    fn two_cell_dataset() -> Dataset {
        let table = MeasurementTable::new(
            "/surveys/walk1/data.csv",
            vec![
                record(100, 302, -80.0, 1_000),
                record(100, 302, -90.0, 2_000),
                record(200, 302, -70.0, 3_000),
            ],
        );
        let mut builder = DatasetBuilder::new(DatasetConfig::default());
        builder.push_table(table);
        builder.build().unwrap()
    }

    #[test]
    fn build_requires_at_least_one_table() {
        let err = DatasetBuilder::new(DatasetConfig::default()).build().unwrap_err();
        assert!(matches!(err, SignalError::Schema(_)));
    }

    #[test]
    fn grouping_covers_every_record_exactly_once() {
        let dataset = two_cell_dataset();
        let grouped: usize = dataset.cells().map(|c| c.len()).sum();
        assert_eq!(grouped, dataset.record_count());
        for cell in dataset.cells() {
            assert!(cell.records().iter().all(|r| r.cell_id == cell.cell_id()));
        }
    }

    #[test]
    fn scenario_two_cells_with_expected_statistics() {
        let dataset = two_cell_dataset();
        assert_eq!(dataset.cell_ids(), vec![100, 200]);

        let cell_100 = dataset.cell(100).unwrap();
        assert_eq!(cell_100.len(), 2);
        let mean = cell_100.mean_linear_power_mw().unwrap();
        assert!((mean - (1e8 + 1e9) / 2.0).abs() < 1.0);

        let cell_200 = dataset.cell(200).unwrap();
        assert_eq!(cell_200.len(), 1);
        assert!(matches!(
            cell_200.stdev_linear_power_mw(),
            Err(SignalError::EmptyAggregate { .. })
        ));
    }

    #[test]
    fn unobserved_cell_id_is_a_lookup_error() {
        let dataset = two_cell_dataset();
        assert!(matches!(dataset.cell(999), Err(SignalError::CellNotFound(999))));
    }

    #[test]
    fn rows_concatenate_across_tables_in_push_order() {
        let mut builder = DatasetBuilder::new(DatasetConfig::default());
        builder.push_table(MeasurementTable::new(
            "/surveys/walk1/a.csv",
            vec![record(100, 302, -80.0, 1_000), record(100, 302, -81.0, 2_000)],
        ));
        builder.push_table(MeasurementTable::new(
            "/surveys/walk1/b.csv",
            vec![record(100, 302, -82.0, 3_000)],
        ));
        let dataset = builder.build().unwrap();

        assert_eq!(dataset.signal_dbm().to_vec(), vec![-80.0, -81.0, -82.0]);
        assert_eq!(dataset.cell(100).unwrap().signal_power_dbm(), vec![-80.0, -81.0, -82.0]);
    }

    #[test]
    fn overlay_paths_default_next_to_first_input() {
        let dataset = two_cell_dataset();
        assert_eq!(dataset.data_root(), Path::new("/surveys/walk1"));
        assert_eq!(dataset.overlay().image_path, PathBuf::from("/surveys/walk1/map.png"));
        assert_eq!(dataset.overlay().bbox_path, PathBuf::from("/surveys/walk1/bbox.txt"));
    }

    #[test]
    fn overlay_paths_respect_explicit_config() {
        let config = DatasetConfig {
            map_image_path: Some(PathBuf::from("/maps/city.png")),
            bbox_path: Some(PathBuf::from("/maps/city_bbox.txt")),
        };
        let mut builder = DatasetBuilder::new(config);
        builder.push_table(MeasurementTable::new(
            "/surveys/walk1/data.csv",
            vec![record(100, 302, -80.0, 1_000)],
        ));
        let dataset = builder.build().unwrap();
        assert_eq!(dataset.overlay().image_path, PathBuf::from("/maps/city.png"));
        assert_eq!(dataset.overlay().bbox_path, PathBuf::from("/maps/city_bbox.txt"));
    }

    #[test]
    fn identifier_sets_are_distinct_and_sorted() {
        let mut builder = DatasetBuilder::new(DatasetConfig::default());
        builder.push_table(MeasurementTable::new(
            "/surveys/walk1/data.csv",
            vec![
                record(200, 310, -80.0, 1_000),
                record(100, 302, -81.0, 2_000),
                record(100, 302, -82.0, 3_000),
            ],
        ));
        let dataset = builder.build().unwrap();
        assert_eq!(dataset.mobile_country_codes(), &[302, 310]);
        assert_eq!(dataset.cell_ids(), vec![100, 200]);
    }

    #[test]
    fn all_row_order_columns_align_with_input_order() {
        let mut builder = DatasetBuilder::new(DatasetConfig::default());
        let mut first = record(100, 302, -80.0, 1_000);
        first.pci = 7;
        first.ta = 3.0;
        first.rating = 0.5;
        first.direction = 45.0;
        first.act = "UMTS".into();
        let second = record(200, 302, -90.0, 2_000);
        builder.push_table(MeasurementTable::new("/surveys/walk1/data.csv", vec![first, second]));
        let dataset = builder.build().unwrap();

        assert_eq!(dataset.physical_cell_ids().to_vec(), vec![7.0, 101.0]);
        assert_eq!(dataset.timing_advances().to_vec(), vec![3.0, 2.0]);
        assert_eq!(dataset.ratings().to_vec(), vec![0.5, 1.0]);
        assert_eq!(dataset.directions().to_vec(), vec![45.0, 90.0]);
        assert_eq!(dataset.access_technologies(), &["UMTS", "LTE"]);
        assert_eq!(dataset.speeds().to_vec(), vec![1.5, 1.5]);
    }

    #[test]
    fn normalized_times_start_at_zero_seconds() {
        let dataset = two_cell_dataset();
        assert_eq!(dataset.normalized_times_s().to_vec(), vec![0.0, 1.0, 2.0]);
    }
}
