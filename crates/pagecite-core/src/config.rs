//! Configuration for the question-answering pipeline

use crate::error::QaError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of document characters embedded in a prompt
pub const MAX_PROMPT_CONTENT_CHARS: usize = 8000;

/// Default bound on a single model call (seconds)
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;

/// Configuration for the [`Answerer`](crate::Answerer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Document characters kept in the prompt before truncation
    pub max_prompt_content_chars: usize,

    /// Maximum time for a single model call (seconds)
    pub model_timeout_secs: u64,
}

impl QaConfig {
    /// Get the model timeout as a Duration
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), QaError> {
        if self.max_prompt_content_chars == 0 {
            return Err(QaError::Config(
                "max_prompt_content_chars must be greater than 0".to_string(),
            ));
        }
        if self.model_timeout_secs == 0 {
            return Err(QaError::Config(
                "model_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, QaError> {
        let config: QaConfig = toml::from_str(toml_str)
            .map_err(|e| QaError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, QaError> {
        toml::to_string_pretty(self)
            .map_err(|e| QaError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            max_prompt_content_chars: MAX_PROMPT_CONTENT_CHARS,
            model_timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
        }
    }
}
