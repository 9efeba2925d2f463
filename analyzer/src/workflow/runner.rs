use crate::report::{CellReport, SurveySummary};
use crate::workflow::config::WorkflowConfig;
use signalcore::math;
use signalcore::prelude::{CellAggregate, Dataset, SignalError, Tower};
use signalcore::telemetry::{LogManager, MetricsRecorder};

/// Executes one analysis pass over a built dataset.
#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Produces a report per selected cell.
    ///
    /// A directly requested cell propagates every statistic error. When
    /// reporting all cells, single-record cells keep their mean but drop
    /// the spread fields with a logged warning, so one short-lived cell
    /// cannot abort a whole survey run.
    pub fn execute(&self, dataset: &Dataset) -> anyhow::Result<SurveySummary> {
        let logger = LogManager::new();
        let metrics = MetricsRecorder::new();
        let tower = self.config.tower();
        let requested = self.config.cell_id;

        let selected: Vec<&CellAggregate> = match requested {
            Some(cell_id) => vec![dataset.cell(cell_id)?],
            None => dataset.cells().collect(),
        };

        let mut reports = Vec::with_capacity(selected.len());
        for cell in selected {
            let report =
                self.report_cell(cell, tower.as_ref(), requested.is_some(), &logger, &metrics)?;
            reports.push(report);
            metrics.record_reported();
        }

        let (reported, skipped) = metrics.snapshot();
        logger.record(&format!(
            "survey run complete: {} cells reported, {} without spread",
            reported, skipped
        ));

        Ok(SurveySummary {
            record_count: dataset.record_count(),
            cell_count: dataset.cell_count(),
            mobile_country_codes: dataset.mobile_country_codes().to_vec(),
            mobile_network_codes: dataset.mobile_network_codes().to_vec(),
            location_area_codes: dataset.location_area_codes().to_vec(),
            cell_ids: dataset.cell_ids(),
            overlay: dataset.overlay().clone(),
            reports,
        })
    }

    fn report_cell(
        &self,
        cell: &CellAggregate,
        tower: Option<&Tower>,
        strict: bool,
        logger: &LogManager,
        metrics: &MetricsRecorder,
    ) -> anyhow::Result<CellReport> {
        let mean_power_mw = cell.mean_linear_power_mw()?;

        let stdev_power_mw = match cell.stdev_linear_power_mw() {
            Ok(stdev) => Some(stdev),
            Err(err @ SignalError::EmptyAggregate { .. }) if !strict => {
                logger.record_warning(&format!("spread omitted: {}", err));
                metrics.record_skipped();
                None
            }
            Err(err) => return Err(err.into()),
        };

        let (distances_m, path_loss_db) = match tower {
            Some(tower) => (
                Some(cell.distances(tower, self.config.use_height)?),
                Some(cell.path_loss(&self.config.budget)),
            ),
            None => (None, None),
        };

        Ok(CellReport {
            cell_id: cell.cell_id(),
            record_count: cell.len(),
            mean_power_mw,
            mean_power_dbm: math::to_dbm(mean_power_mw),
            stdev_power_mw,
            stdev_power_log: stdev_power_mw.map(math::stdev_to_log),
            distances_m,
            path_loss_db,
            signal_dbm: cell.signal_power_dbm(),
        })
    }
}
