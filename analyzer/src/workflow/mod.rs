pub mod config;
pub mod runner;

pub use config::{TowerConfig, WorkflowConfig};
pub use runner::Runner;
