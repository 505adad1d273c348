//! # Wizard Scripts
//!
//! A wizard run recorded as a list of widget events, replayed headless by
//! the `wizard` command. Scripts are JSON or TOML:
//!
//! ```toml
//! variant = "basic"
//!
//! [[events]]
//! action = "set"
//! field = "name"
//! value = "Fire Safety"
//!
//! [[events]]
//! action = "next"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use trainflow_core::catalog::Catalog;
use trainflow_core::{FinalizedTraining, Timestamp, TrainflowError, WizardController, WizardEvent, WizardVariant};

/// Maximum script size (1 MB).
const MAX_SCRIPT_FILE_SIZE: u64 = 1024 * 1024;

/// Script file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Json,
    Toml,
}

impl ScriptFormat {
    /// `.toml` files are TOML, everything else JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ScriptFormat::Toml,
            _ => ScriptFormat::Json,
        }
    }
}

/// A recorded wizard run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardScript {
    pub variant: WizardVariant,
    #[serde(default)]
    pub events: Vec<WizardEvent>,
}

impl WizardScript {
    /// Parse a script from text.
    pub fn parse(content: &str, format: ScriptFormat) -> Result<Self, TrainflowError> {
        match format {
            ScriptFormat::Json => serde_json::from_str(content)
                .map_err(|e| TrainflowError::SerializationError(format!("Invalid JSON script: {}", e))),
            ScriptFormat::Toml => toml::from_str(content)
                .map_err(|e| TrainflowError::SerializationError(format!("Invalid TOML script: {}", e))),
        }
    }

    /// Read and parse a script file. The format follows the extension.
    pub fn from_file(path: &Path) -> Result<Self, TrainflowError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            TrainflowError::IoError(format!("Cannot read script '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_SCRIPT_FILE_SIZE {
            return Err(TrainflowError::SerializationError(format!(
                "Script size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_SCRIPT_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TrainflowError::IoError(format!("Cannot read script '{}': {}", path.display(), e))
        })?;
        Self::parse(&content, ScriptFormat::from_path(path))
    }

    /// Replay every event in order, then submit.
    ///
    /// Stops at the first rejected event and returns its error.
    pub fn run(
        &self,
        catalog: &Catalog,
        created_at: Timestamp,
    ) -> Result<FinalizedTraining, TrainflowError> {
        let mut wizard = WizardController::new(self.variant);

        for (index, event) in self.events.iter().enumerate() {
            tracing::debug!(
                "event {} on step {}/{}: {:?}",
                index + 1,
                wizard.current_step(),
                wizard.step_count(),
                event
            );
            wizard.apply(event.clone()).inspect_err(|e| {
                tracing::warn!("Script event {} rejected: {}", index + 1, e);
            })?;
        }

        wizard.submit(catalog, created_at)
    }
}
