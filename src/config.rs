//! Run configuration loading.

use std::path::Path;

use serde::Deserialize;

use crate::error::SimError;

/// Batch-run parameters, loadable from a TOML file. Every field has a
/// default so a partial (or absent) file works; command-line flags override
/// whatever the file says.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Grid width used when no map file is given (default: 10)
    #[serde(default = "default_width")]
    pub width: usize,

    /// Grid height used when no map file is given (default: 10)
    #[serde(default = "default_height")]
    pub height: usize,

    /// Charger index used when no map file is given (default: 0)
    #[serde(default = "default_charger")]
    pub charger: usize,

    /// Maximum number of ticks per run (default: 10000)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Units of dirt to scatter before the run (default: 0)
    #[serde(default)]
    pub rubbish: usize,

    /// RNG seed for dirt scattering (default: 0)
    #[serde(default)]
    pub seed: u64,
}

fn default_width() -> usize {
    10
}

fn default_height() -> usize {
    10
}

fn default_charger() -> usize {
    0
}

fn default_max_steps() -> usize {
    10_000
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            charger: default_charger(),
            max_steps: default_max_steps(),
            rubbish: 0,
            seed: 0,
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("failed to read config file: {}", e)))?;
        let config: RunConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
