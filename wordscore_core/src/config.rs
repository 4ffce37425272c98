//! Scoring configuration
//!
//! Thresholds and sheet column names, loadable from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ScoreError;
use crate::sheet::SheetOptions;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub sheet: SheetOptions,
}

/// Acceptance rule for a candidate token pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Largest edit distance that still counts as a match
    #[serde(default = "default_max_distance")]
    pub max_distance: usize,
    /// Largest distance / longer-token-length ratio that still counts
    #[serde(default = "default_max_normalized")]
    pub max_normalized: f64,
}

fn default_max_distance() -> usize {
    2
}

fn default_max_normalized() -> f64 {
    0.25
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_distance: default_max_distance(),
            max_normalized: default_max_normalized(),
        }
    }
}

impl Thresholds {
    /// Both limits must hold.
    pub fn accepts(&self, distance: usize, normalized: f64) -> bool {
        distance <= self.max_distance && normalized <= self.max_normalized
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.max_normalized.is_nan() || self.max_normalized < 0.0 {
            return Err(ScoreError::Config(format!(
                "max_normalized must be a non-negative number, got {}",
                self.max_normalized
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ScoreError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ScoreError::Config(format!("Failed to parse config: {}", e)))?;
        config.thresholds.validate()?;
        Ok(config)
    }

    /// Use the given file when present, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ScoreError> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                tracing::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => {
                tracing::info!("Using default configuration");
                Ok(Self::default())
            }
        }
    }
}
