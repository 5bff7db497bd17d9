//! Engine configuration

use std::path::Path;

use omunits_core::vocab;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest edit distance the spelling corrector will ever accept
pub const MAX_EDIT_DISTANCE_CAP: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables of the conversion engine. Every field has a default, so a
/// partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Language of caller-facing label lookups
    pub default_lang: String,
    /// Language of the labels that feed the spelling dictionary
    pub dictionary_lang: String,
    /// Accepted edit distance for spelling correction (clamped to 4)
    pub max_edit_distance: usize,
    pub percent_unit: String,
    pub temperature_dimension: String,
    pub information_quantity: String,
    /// Nesting bound for recursive unit resolution
    pub max_depth: usize,
    /// Threads used by cache warm-up
    pub warm_workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_lang: "en".to_string(),
            dictionary_lang: "en".to_string(),
            max_edit_distance: 1,
            percent_unit: vocab::PERCENT.to_string(),
            temperature_dimension: vocab::THERMODYNAMIC_TEMPERATURE_DIMENSION.to_string(),
            information_quantity: vocab::INFORMATION_CAPACITY.to_string(),
            max_depth: 32,
            warm_workers: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn edit_distance(&self) -> usize {
        self.max_edit_distance.min(MAX_EDIT_DISTANCE_CAP)
    }
}
