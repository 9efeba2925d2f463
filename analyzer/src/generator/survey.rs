use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use signalcore::prelude::{LinkBudget, MeasurementRecord, MeasurementTable};
use std::f64::consts::PI;

/// Kilometers per degree of latitude, for the local flat-earth offsets
/// the generator scatters points with.
const KM_PER_DEGREE: f64 = 111.19;

/// LTE timing-advance step, meters.
const TA_STEP_M: f64 = 78.0;

/// Closest point the generator will place to the tower, kilometers.
const MIN_RANGE_KM: f64 = 0.02;

/// Configuration for generating a synthetic walk survey around one tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub cell_id: u64,
    pub mcc: u16,
    pub mnc: u16,
    pub lac: u32,
    pub pci: u32,
    pub act: String,
    pub tower_lat: f64,
    pub tower_lon: f64,
    pub samples: usize,
    pub max_range_km: f64,
    pub budget: LinkBudget,
    /// Reference path loss at 100 m, dB.
    pub reference_loss_db: f64,
    /// Log-distance path-loss exponent.
    pub loss_exponent: f64,
    /// Uniform jitter applied to each generated reading, dB.
    pub noise_db: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cell_id: 100_001,
            mcc: 302,
            mnc: 720,
            lac: 11,
            pci: 101,
            act: "LTE".into(),
            tower_lat: 43.6452,
            tower_lon: -79.3806,
            samples: 256,
            max_range_km: 1.5,
            budget: LinkBudget::new(43.0, 2.0, 0.0),
            reference_loss_db: 80.0,
            loss_exponent: 3.0,
            noise_db: 2.0,
            seed: 0,
        }
    }
}

/// Builds a synthetic measurement table: points scattered around the
/// tower, readings derived from the link budget minus a log-distance
/// falloff plus jitter. Deterministic for a fixed seed.
pub fn build_survey_table(config: &GeneratorConfig) -> anyhow::Result<MeasurementTable> {
    if config.samples == 0 {
        anyhow::bail!("generator needs at least one sample");
    }
    if config.max_range_km <= MIN_RANGE_KM {
        anyhow::bail!(
            "generator range must exceed {} km, got {}",
            MIN_RANGE_KM,
            config.max_range_km
        );
    }
    if config.noise_db < 0.0 {
        anyhow::bail!("generator jitter must be non-negative, got {}", config.noise_db);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.samples);
    let lon_scale = config
        .tower_lat
        .to_radians()
        .cos()
        .max(1e-6);
    let start_ms: u64 = 1_600_000_000_000;

    for index in 0..config.samples {
        let bearing = rng.gen_range(0.0..2.0 * PI);
        let range_km = rng.gen_range(MIN_RANGE_KM..config.max_range_km);

        let lat = config.tower_lat + (range_km / KM_PER_DEGREE) * bearing.cos();
        let lon = config.tower_lon + (range_km / (KM_PER_DEGREE * lon_scale)) * bearing.sin();

        let loss_db = config.reference_loss_db
            + 10.0 * config.loss_exponent * (range_km / 0.1).log10();
        // gen_range panics on an empty range, so zero jitter is its own arm.
        let jitter = if config.noise_db == 0.0 {
            0.0
        } else {
            rng.gen_range(-config.noise_db..config.noise_db)
        };
        let signal_dbm = config.budget.tx_power_dbm + config.budget.tx_gain_db
            + config.budget.rx_gain_db
            - loss_db
            + jitter;

        let ta = (range_km * 1000.0 / TA_STEP_M).floor();
        let index_u64 = u64::try_from(index).context("sample index exceeds u64")?;

        records.push(MeasurementRecord {
            mcc: config.mcc,
            mnc: config.mnc,
            lac: config.lac,
            cell_id: config.cell_id,
            pci: config.pci,
            tac: config.lac,
            lat,
            lon,
            signal_dbm,
            act: config.act.clone(),
            ta,
            rating: 1.0,
            speed: rng.gen_range(0.0..2.5),
            direction: rng.gen_range(0.0..360.0),
            measured_at: start_ms + index_u64 * 1_000,
        });
    }

    Ok(MeasurementTable::new("synthetic/survey.csv", records))
}
