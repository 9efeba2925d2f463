use anyhow::Context;
use clap::Parser;
use generator::{build_survey_table, GeneratorConfig};
use ingest::load_tables;
use signalcore::prelude::{DatasetBuilder, LinkBudget};
use std::fs;
use std::path::PathBuf;
use workflow::config::{TowerConfig, WorkflowConfig};
use workflow::runner::Runner;

mod generator;
mod ingest;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Cellular signal survey analyzer")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Survey CSV files, concatenated in the given order
    #[arg(long = "data")]
    data: Vec<PathBuf>,
    /// Report only this serving cell
    #[arg(long)]
    cell_id: Option<u64>,
    #[arg(long)]
    tower_lat: Option<f64>,
    #[arg(long)]
    tower_lon: Option<f64>,
    #[arg(long)]
    tower_height: Option<f64>,
    /// Use slant distances when a tower height is given
    #[arg(long, default_value_t = false)]
    use_height: bool,
    #[arg(long, default_value_t = 43.0)]
    tx_power: f64,
    #[arg(long, default_value_t = 0.0)]
    tx_gain: f64,
    #[arg(long, default_value_t = 0.0)]
    rx_gain: f64,
    /// Analyze a generated survey instead of CSV input
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the full JSON summary here
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let tower = match (args.tower_lat, args.tower_lon) {
            (Some(lat), Some(lon)) => Some(TowerConfig {
                lat,
                lon,
                height_m: args.tower_height,
                label: None,
            }),
            _ => None,
        };
        WorkflowConfig::from_args(
            args.data.clone(),
            args.cell_id,
            tower,
            args.use_height,
            LinkBudget::new(args.tx_power, args.tx_gain, args.rx_gain),
        )
    };

    let tables = if args.synthetic {
        let generator_config = GeneratorConfig {
            budget: config.budget,
            seed: args.seed,
            ..Default::default()
        };
        // A generated survey always has a known transmitter; point the
        // reports at it unless the config already names one.
        if config.tower.is_none() {
            config.tower = Some(TowerConfig {
                lat: generator_config.tower_lat,
                lon: generator_config.tower_lon,
                height_m: None,
                label: Some("synthetic".into()),
            });
        }
        vec![build_survey_table(&generator_config)?]
    } else {
        if config.data_files.is_empty() {
            anyhow::bail!("no survey data files given (use --data or --synthetic)");
        }
        load_tables(&config.data_files)?
    };
    log::info!(
        "loaded {} input table(s), {} rows total",
        tables.len(),
        tables.iter().map(|t| t.len()).sum::<usize>()
    );

    let mut builder = DatasetBuilder::new(config.to_dataset_config());
    for table in tables {
        builder.push_table(table);
    }
    let dataset = builder.build().context("building measurement dataset")?;

    let runner = Runner::new(config);
    let summary = runner.execute(&dataset)?;

    println!(
        "Survey run -> {} records, {} cells, {} reports",
        summary.record_count,
        summary.cell_count,
        summary.reports.len()
    );

    if let Some(output) = args.output {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(&output, json)
            .with_context(|| format!("writing summary {}", output.display()))?;
    }

    Ok(())
}
