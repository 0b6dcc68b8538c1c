//! Dashboard configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command-line flags and environment variables (applied by the binary).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What to do with a selected server that vanished from a refreshed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaleSelectionPolicy {
    /// Keep showing the last known object
    #[default]
    Keep,
    /// Drop the selection and return to the server list
    Clear,
}

/// How a cluster-level category score is derived from per-server scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClusterScoreMode {
    #[default]
    Mean,
    FindingsWeighted,
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Governance controller base URL
    #[serde(default = "default_controller_url")]
    pub controller_url: String,
    /// Seconds between background refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub stale_selection: StaleSelectionPolicy,
    #[serde(default)]
    pub cluster_score: ClusterScoreMode,
    /// Path of the re-evaluation trigger
    #[serde(default = "default_scan_path")]
    pub scan_path: String,
}

fn default_controller_url() -> String { "http://localhost:8090".to_string() }
fn default_refresh_interval() -> u64 { 15 }
fn default_request_timeout() -> u64 { 10 }
fn default_scan_path() -> String { "/api/governance/scan/refresh".to_string() }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            controller_url: default_controller_url(),
            refresh_interval_secs: default_refresh_interval(),
            request_timeout_secs: default_request_timeout(),
            stale_selection: StaleSelectionPolicy::default(),
            cluster_score: ClusterScoreMode::default(),
            scan_path: default_scan_path(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl DashboardConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file location
    ///
    /// Uses: explicit path > $GOVDASH_CONFIG > ~/.govdash/config.toml (only if it exists)
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var("GOVDASH_CONFIG") {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir()
            .map(|home| home.join(".govdash").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Load from the resolved location, or fall back to defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::locate(explicit) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.controller_url.starts_with("http://") || self.controller_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "controller_url must be an http(s) URL, got '{}'",
                self.controller_url
            )));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid("refresh_interval_secs must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be at least 1".to_string()));
        }
        if !self.scan_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "scan_path must start with '/', got '{}'",
                self.scan_path
            )));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
