use anyhow::Context;
use serde::{Deserialize, Serialize};
use signalcore::prelude::{DatasetConfig, LinkBudget, Tower};
use std::fs;
use std::path::{Path, PathBuf};

fn default_budget() -> LinkBudget {
    LinkBudget::new(43.0, 0.0, 0.0)
}

/// Candidate transmitter position as it appears in workflow YAML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TowerConfig {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub height_m: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
}

impl TowerConfig {
    pub fn to_tower(&self) -> Tower {
        let mut tower = Tower::new(self.lat, self.lon);
        if let Some(h) = self.height_m {
            tower = tower.with_height(h);
        }
        if let Some(label) = &self.label {
            tower = tower.with_label(label.clone());
        }
        tower
    }
}

/// Full description of one analysis run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Survey CSVs, concatenated in listed order.
    pub data_files: Vec<PathBuf>,
    /// Restrict the run to one serving cell; all observed cells otherwise.
    #[serde(default)]
    pub cell_id: Option<u64>,
    /// Candidate transmitter; distance and path-loss sequences are only
    /// produced when one is given.
    #[serde(default)]
    pub tower: Option<TowerConfig>,
    /// Use slant distances when the tower height is known.
    #[serde(default)]
    pub use_height: bool,
    #[serde(default = "default_budget")]
    pub budget: LinkBudget,
    #[serde(default)]
    pub map_image_path: Option<PathBuf>,
    #[serde(default)]
    pub bbox_path: Option<PathBuf>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        data_files: Vec<PathBuf>,
        cell_id: Option<u64>,
        tower: Option<TowerConfig>,
        use_height: bool,
        budget: LinkBudget,
    ) -> Self {
        Self {
            data_files,
            cell_id,
            tower,
            use_height,
            budget,
            map_image_path: None,
            bbox_path: None,
        }
    }

    pub fn to_dataset_config(&self) -> DatasetConfig {
        DatasetConfig {
            map_image_path: self.map_image_path.clone(),
            bbox_path: self.bbox_path.clone(),
        }
    }

    pub fn tower(&self) -> Option<Tower> {
        self.tower.as_ref().map(TowerConfig::to_tower)
    }
}
