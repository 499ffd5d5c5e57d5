//! Runtime configuration loaded from JSON

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, SyncError};

/// Settings shared by the slider engine, the complex toolkit, and the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// Graph role that wins canonical election ties
    pub primary_role: String,
    /// Zero-test threshold for complex arithmetic
    pub complex_epsilon: f64,
    /// Default env_logger filter for the binary
    pub log_level: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            primary_role: constants::group::DEFAULT_PRIMARY_ROLE.to_string(),
            complex_epsilon: constants::complex::DEFAULT_EPSILON,
            log_level: constants::logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl SyncConfig {
    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SyncConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_primary_role(mut self, role: &str) -> Self {
        self.primary_role = role.to_string();
        self
    }

    pub fn with_complex_epsilon(mut self, epsilon: f64) -> Self {
        self.complex_epsilon = epsilon;
        self
    }

    /// Check every field for values that would break construction
    pub fn validate(&self) -> Result<()> {
        if !self.complex_epsilon.is_finite() || self.complex_epsilon < 0.0 {
            return Err(SyncError::InvalidEpsilon(self.complex_epsilon));
        }
        if self.log_level.trim().is_empty() {
            return Err(SyncError::InvalidConfig("logLevel must not be empty".to_string()));
        }
        Ok(())
    }
}
