//! Configuration structures for the A-share report system.
//!
//! Load order:
//! 1. `$ASHARE_REPORT_CONFIG` (path to a TOML file)
//! 2. `./report_config.toml`
//! 3. Built-in defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ASHARE_REPORT_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "report_config.toml";

/// Main configuration for a report run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Analysis sizing.
    pub analysis: AnalysisConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// JSON array of stock records.
    pub stocks: PathBuf,
    /// Optional JSON market snapshot.
    pub market: Option<PathBuf>,
    /// Optional JSON map of sub-strategy name to marginal change (%).
    pub marginal_changes: Option<PathBuf>,
    /// Directory the markdown reports are written to.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            stocks: PathBuf::from("data/stocks.json"),
            market: None,
            marginal_changes: None,
            output_dir: PathBuf::from("reports"),
        }
    }
}

/// Analysis sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Stocks kept by the three-dimensional ranking.
    pub top_n: usize,
    /// Strongest/weakest cells reported per matrix.
    pub insight_cells: usize,
    /// Rows shown in the concept×industry table.
    pub matrix_display_limit: usize,
    /// Per-stock writeups rendered.
    pub writeup_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            insight_cells: 5,
            matrix_display_limit: 20,
            writeup_limit: 20,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named by `$ASHARE_REPORT_CONFIG`.
    Env(PathBuf),
    /// `./report_config.toml`.
    Local(PathBuf),
    /// Built-in defaults.
    Defaults,
}

/// Result of [`ReportConfig::load`].
///
/// Loading happens before the log subscriber exists, so the files that were
/// skipped are kept here and reported through [`LoadedConfig::log`].
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ReportConfig,
    pub source: ConfigSource,
    /// One message per config file that was found but rejected.
    pub fallbacks: Vec<String>,
}

impl LoadedConfig {
    /// Emit the load outcome as tracing events.
    pub fn log(&self) {
        for reason in &self.fallbacks {
            warn!("{}", reason);
        }
        match &self.source {
            ConfigSource::Env(path) => {
                info!(path = %path.display(), "Loaded report config from {}", CONFIG_ENV)
            }
            ConfigSource::Local(path) => info!(path = %path.display(), "Loaded report config"),
            ConfigSource::Defaults => info!("No report config found, using built-in defaults"),
        }
    }
}

impl ReportConfig {
    /// Load configuration using the standard search order, falling back to
    /// defaults when a file is missing or invalid.
    pub fn load() -> LoadedConfig {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(env_path.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Search order with explicit candidates: `env_path`, then `local`.
    pub fn load_from(env_path: Option<&Path>, local: &Path) -> LoadedConfig {
        let mut fallbacks = Vec::new();

        if let Some(path) = env_path {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => {
                        return LoadedConfig {
                            config,
                            source: ConfigSource::Env(path.to_path_buf()),
                            fallbacks,
                        };
                    }
                    Err(e) => fallbacks.push(format!(
                        "Failed to load config {}, falling back: {}",
                        path.display(),
                        e
                    )),
                }
            } else {
                fallbacks.push(format!(
                    "{} points to non-existent file {}, falling back",
                    CONFIG_ENV,
                    path.display()
                ));
            }
        }

        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        source: ConfigSource::Local(local.to_path_buf()),
                        fallbacks,
                    };
                }
                Err(e) => fallbacks.push(format!(
                    "Failed to load config {}, using defaults: {}",
                    local.display(),
                    e
                )),
            }
        }

        LoadedConfig {
            config: Self::default(),
            source: ConfigSource::Defaults,
            fallbacks,
        }
    }

    /// Load from a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes that would produce an empty report.
    pub fn validate(&self) -> Result<()> {
        let a = &self.analysis;
        if a.top_n == 0 {
            return Err(Error::config("analysis.top_n must be at least 1"));
        }
        if a.insight_cells == 0 {
            return Err(Error::config("analysis.insight_cells must be at least 1"));
        }
        if a.matrix_display_limit == 0 || a.writeup_limit == 0 {
            return Err(Error::config("analysis display limits must be at least 1"));
        }
        Ok(())
    }
}
