//! # Configuration
//!
//! `trainflow.toml` settings for the binary.
//!
//! ```toml
//! [exam]
//! passing_score_percent = 70
//! max_attempts = 3
//!
//! [generation]
//! tick_ms = 100
//! step_percent = 2
//!
//! [logging]
//! filter = "trainflow=info"
//! format = "json"
//! ```
//!
//! Every section and key is optional. A missing default file means
//! defaults; an explicitly named file must exist.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use trainflow_core::{DEFAULT_PASSING_SCORE, RetakePolicy, TrainflowError};
use trainflow_core::progress::DEFAULT_TICK_STEP;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "trainflow.toml";

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "TRAINFLOW_CONFIG";

/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "TRAINFLOW_LOG_FORMAT";

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "trainflow=info";

// =============================================================================
// SECTIONS
// =============================================================================

/// `[exam]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamConfig {
    /// Minimum score, in percent, that passes.
    pub passing_score_percent: u8,
    /// Total attempts allowed per exam. Absent means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            passing_score_percent: DEFAULT_PASSING_SCORE,
            max_attempts: None,
        }
    }
}

/// `[generation]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Milliseconds between progress ticks.
    pub tick_ms: u64,
    /// Percent added per tick.
    pub step_percent: u8,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            step_percent: DEFAULT_TICK_STEP,
        }
    }
}

impl GenerationConfig {
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` selects JSON, anything else plain text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    /// The format after applying `TRAINFLOW_LOG_FORMAT`.
    #[must_use]
    pub fn effective_format(&self, env_value: Option<&str>) -> LogFormat {
        env_value.map(LogFormat::parse).unwrap_or(self.format)
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub exam: ExamConfig,
    pub generation: GenerationConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, TrainflowError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| TrainflowError::ConfigError(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TrainflowError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrainflowError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the configuration for this run.
    ///
    /// Lookup order: `explicit`, then `TRAINFLOW_CONFIG`, then
    /// `trainflow.toml` in the working directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, TrainflowError> {
        let env_path = std::env::var(CONFIG_ENV).ok();
        match resolve_path(explicit, env_path.as_deref()) {
            Some(path) => Self::from_file(&path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), TrainflowError> {
        if self.exam.passing_score_percent > 100 {
            return Err(TrainflowError::ConfigError(format!(
                "exam.passing_score_percent must be at most 100, got {}",
                self.exam.passing_score_percent
            )));
        }
        if self.exam.max_attempts == Some(0) {
            return Err(TrainflowError::ConfigError(
                "exam.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.generation.tick_ms == 0 {
            return Err(TrainflowError::ConfigError(
                "generation.tick_ms must be positive".to_string(),
            ));
        }
        if self.generation.step_percent == 0 || self.generation.step_percent > 100 {
            return Err(TrainflowError::ConfigError(format!(
                "generation.step_percent must be in 1..=100, got {}",
                self.generation.step_percent
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn retake_policy(&self) -> RetakePolicy {
        match self.exam.max_attempts {
            Some(max) => RetakePolicy::limited(max),
            None => RetakePolicy::unlimited(),
        }
    }
}

/// Pick the config path: the explicit one wins over the environment.
#[must_use]
pub fn resolve_path(explicit: Option<&Path>, env_value: Option<&str>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}
