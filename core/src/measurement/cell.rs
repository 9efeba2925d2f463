use crate::measurement::{MeasurementRecord, Tower};
use crate::{geo, math, LinkBudget, SignalError, SignalResult};

/// All measurements observed against one serving cell.
///
/// Owns its records exclusively; membership is fixed at construction and
/// every derived sequence (`distances`, `path_loss`, `signal_power_dbm`)
/// is aligned index-for-index with the input record order. All operations
/// are pure functions of the record list plus caller-supplied parameters.
#[derive(Debug, Clone)]
pub struct CellAggregate {
    cell_id: u64,
    records: Vec<MeasurementRecord>,
}

impl CellAggregate {
    /// Builds the aggregate, verifying that every record actually carries
    /// `cell_id`.
    pub fn new(cell_id: u64, records: Vec<MeasurementRecord>) -> SignalResult<Self> {
        if let Some(stray) = records.iter().find(|r| r.cell_id != cell_id) {
            return Err(SignalError::Schema(format!(
                "record with cell id {} grouped under cell {}",
                stray.cell_id, cell_id
            )));
        }
        Ok(Self { cell_id, records })
    }

    pub fn cell_id(&self) -> u64 {
        self.cell_id
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

    /// Per-record signal converted to linear milliwatts, input order.
    pub fn linear_power_mw(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| math::to_linear_mw(r.signal_dbm))
            .collect()
    }

    /// Mean linear power over all records, in milliwatts.
    pub fn mean_linear_power_mw(&self) -> SignalResult<f64> {
        math::mean(&self.linear_power_mw()).map_err(|_| self.too_few(1))
    }

    /// Sample standard deviation of linear power, in milliwatts.
    pub fn stdev_linear_power_mw(&self) -> SignalResult<f64> {
        math::sample_stdev(&self.linear_power_mw()).map_err(|_| self.too_few(2))
    }

    /// Mean power re-expressed in dBm under the survey sign convention.
    pub fn mean_power_dbm(&self) -> SignalResult<f64> {
        Ok(math::to_dbm(self.mean_linear_power_mw()?))
    }

    /// Power spread on the established log scale (see
    /// [`math::stdev_to_log`]).
    pub fn stdev_power_log(&self) -> SignalResult<f64> {
        Ok(math::stdev_to_log(self.stdev_linear_power_mw()?))
    }

    /// Distance in meters from `tower` to each record, input order.
    ///
    /// With `use_height` set and a tower height present, the slant
    /// distance is used; otherwise the plain great-circle distance,
    /// rescaled from the canonical kilometers to meters.
    pub fn distances(&self, tower: &Tower, use_height: bool) -> SignalResult<Vec<f64>> {
        let height_m = if use_height { tower.height_m } else { None };
        self.records
            .iter()
            .map(|record| match height_m {
                Some(h) => geo::slant_distance(tower.lat, tower.lon, record.lat, record.lon, h),
                None => {
                    geo::distance(tower.lat, tower.lon, record.lat, record.lon).map(|km| km * 1000.0)
                }
            })
            .collect()
    }

    /// Link-budget path loss in dB for each record, input order:
    /// `tx_power - signal - tx_gain - rx_gain`.
    pub fn path_loss(&self, budget: &LinkBudget) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| budget.tx_power_dbm - r.signal_dbm - budget.tx_gain_db - budget.rx_gain_db)
            .collect()
    }

    /// The raw per-record signal readings in dBm, unmodified, input order.
    pub fn signal_power_dbm(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.signal_dbm).collect()
    }

    fn too_few(&self, needed: usize) -> SignalError {
        SignalError::EmptyAggregate {
            cell_id: self.cell_id,
            needed,
            got: self.records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cell_id: u64, lat: f64, lon: f64, signal_dbm: f64) -> MeasurementRecord {
        MeasurementRecord {
            mcc: 302,
            mnc: 720,
            lac: 11,
            cell_id,
            pci: 101,
            tac: 0,
            lat,
            lon,
            signal_dbm,
            act: "LTE".into(),
            ta: 2.0,
            rating: 1.0,
            speed: 0.0,
            direction: 0.0,
            measured_at: 1_600_000_000_000,
        }
    }

    #[test]
    fn construction_rejects_foreign_records() {
        let err = CellAggregate::new(100, vec![record(100, 0.0, 0.0, -80.0), record(200, 0.0, 0.0, -70.0)])
            .unwrap_err();
        assert!(matches!(err, SignalError::Schema(_)));
    }

    #[test]
    fn mean_linear_power_of_two_readings() {
        let cell = CellAggregate::new(
            100,
            vec![record(100, 43.0, -79.0, -80.0), record(100, 43.0, -79.0, -90.0)],
        )
        .unwrap();
        let mean = cell.mean_linear_power_mw().unwrap();
        assert!((mean - (1e8 + 1e9) / 2.0).abs() < 1.0);
    }

    #[test]
    fn stdev_on_single_record_cell_is_an_empty_aggregate_error() {
        let cell = CellAggregate::new(200, vec![record(200, 43.0, -79.0, -70.0)]).unwrap();
        let err = cell.stdev_linear_power_mw().unwrap_err();
        assert!(matches!(
            err,
            SignalError::EmptyAggregate {
                cell_id: 200,
                needed: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn stdev_of_identical_readings_is_zero_on_both_scales() {
        let cell = CellAggregate::new(
            300,
            vec![
                record(300, 43.0, -79.0, -85.0),
                record(300, 43.1, -79.1, -85.0),
                record(300, 43.2, -79.2, -85.0),
            ],
        )
        .unwrap();
        assert!(cell.stdev_linear_power_mw().unwrap().abs() < 1e-3);
    }

    #[test]
    fn mean_power_dbm_recovers_reading_for_constant_signal() {
        let cell = CellAggregate::new(
            300,
            vec![record(300, 43.0, -79.0, -85.0), record(300, 43.1, -79.1, -85.0)],
        )
        .unwrap();
        assert!((cell.mean_power_dbm().unwrap() - (-85.0)).abs() < 1e-9);
    }

    #[test]
    fn path_loss_is_a_link_budget_subtraction() {
        let cell = CellAggregate::new(100, vec![record(100, 43.0, -79.0, -95.0)]).unwrap();
        let loss = cell.path_loss(&LinkBudget::new(43.0, 2.0, 0.0));
        assert_eq!(loss, vec![136.0]);
    }

    #[test]
    fn derived_sequences_preserve_input_order() {
        let cell = CellAggregate::new(
            100,
            vec![
                record(100, 43.0, -79.0, -80.0),
                record(100, 43.5, -79.5, -95.0),
                record(100, 43.1, -79.1, -85.0),
            ],
        )
        .unwrap();
        assert_eq!(cell.signal_power_dbm(), vec![-80.0, -95.0, -85.0]);
        let budget = LinkBudget::new(43.0, 0.0, 0.0);
        assert_eq!(cell.path_loss(&budget), vec![123.0, 138.0, 128.0]);
    }

    #[test]
    fn distances_use_slant_only_when_height_known_and_requested() {
        let tower = Tower::new(43.0, -79.0).with_height(50.0);
        let cell = CellAggregate::new(100, vec![record(100, 43.0, -79.0, -80.0)]).unwrap();

        let plain = cell.distances(&tower, false).unwrap();
        assert!(plain[0].abs() < 1e-9);

        let slant = cell.distances(&tower, true).unwrap();
        assert!((slant[0] - 50.0).abs() < 1e-9);

        let no_height = Tower::new(43.0, -79.0);
        let fallback = cell.distances(&no_height, true).unwrap();
        assert!(fallback[0].abs() < 1e-9);
    }
}
