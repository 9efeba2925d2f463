pub mod survey;

pub use survey::{build_survey_table, GeneratorConfig};
