use std::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::parameters::AnalysisParameters;
use crate::domain::workflow::StatusSet;

/// Status names treated as in progress when a config names none.
pub const DEFAULT_IN_PROGRESS_STATUSES: [&str; 4] =
    ["In progress", "In development", "In code review", "Ready to test"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Directory with one `<record id>.yaml` snapshot per record.
    pub snapshot_dir: Option<String>,
    /// Estimation API root, used when no snapshot directory is configured.
    pub base_url: Option<String>,
    pub in_progress_statuses: Vec<String>,
    pub calendar_file: Option<String>,
    pub parameters: AnalysisParameters,
}

impl ForecastConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(filepath)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn in_progress_policy(&self) -> StatusSet {
        let configured = StatusSet::new(&self.in_progress_statuses);
        if configured.is_empty() {
            StatusSet::new(DEFAULT_IN_PROGRESS_STATUSES)
        } else {
            configured
        }
    }
}
