//! # Configuration
//!
//! Layered settings for the CLI, lowest precedence first:
//!
//! 1. Built-in defaults (`./.upkeep`, `30d`, `text`).
//! 2. An optional YAML file passed with `--config`.
//! 3. The `UPKEEP_DATA_DIR` environment variable.
//! 4. Command-line flags.
//!
//! ```yaml
//! data_dir: /var/lib/upkeep
//! default_range: 90d
//! log_format: json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use upkeep_analytics::DateRange;

/// Environment variable overriding `data_dir`.
pub const DATA_DIR_ENV: &str = "UPKEEP_DATA_DIR";

const DEFAULT_DATA_DIR: &str = ".upkeep";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_range: DateRange,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_range: DateRange::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Parse a YAML document; absent keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Apply environment overrides read through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    /// Resolve the effective configuration for one invocation.
    pub fn resolve(
        file: Option<&Path>,
        data_dir: Option<PathBuf>,
        log_format: Option<LogFormat>,
    ) -> Result<Self> {
        let base = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let mut config = base.with_env(|key| std::env::var(key).ok());
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        if let Some(format) = log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}
