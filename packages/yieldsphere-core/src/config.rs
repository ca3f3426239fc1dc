//! Analytics and gate configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{routes, Result};

/// Settings shared by the CLI and embedding applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Risk-free rate per period, in percent, used by the ratio metrics
    pub risk_free_rate: f64,
    /// Confidence level for VaR and expected shortfall
    pub confidence_level: f64,
    /// Where the auth gate sends unauthenticated users
    pub login_route: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            confidence_level: 0.95,
            login_route: routes::LOGIN.to_string(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    ///
    /// Default path: `<config dir>/yieldsphere/config.toml`
    /// Can be overridden with `YIELDSPHERE_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("YIELDSPHERE_CONFIG") {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("", "", "yieldsphere")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("yieldsphere.toml"))
    }

    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&Self::default_path())?;
        config.apply_env();
        Ok(config)
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `YIELDSPHERE_RISK_FREE_RATE` if it is set to a number.
    pub fn apply_env(&mut self) {
        if let Ok(raw) = env::var("YIELDSPHERE_RISK_FREE_RATE") {
            match raw.trim().parse::<f64>() {
                Ok(rate) => self.risk_free_rate = rate,
                Err(_) => tracing::warn!("Ignoring invalid YIELDSPHERE_RISK_FREE_RATE: {}", raw),
            }
        }
    }
}
