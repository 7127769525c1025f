//! Application configuration, loadable from TOML.
//!
//! ```toml
//! [engine]
//! depth = 5
//! heuristic = "windows"
//! time_limit_ms = 2000
//!
//! [session]
//! machine_first = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::eval::Heuristic;

/// Deepest search the configuration accepts
pub const MAX_DEPTH: u8 = 8;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub session: SessionConfig,
}

/// Search settings for the automated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched per move
    pub depth: u8,
    /// Leaf evaluation
    pub heuristic: Heuristic,
    /// Optional wall-clock bound per search
    pub time_limit_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            heuristic: Heuristic::Center,
            time_limit_ms: None,
        }
    }
}

/// Turn order settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// The machine drops the first piece
    pub machine_first: bool,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.depth == 0 || self.engine.depth > MAX_DEPTH {
            return Err(ConfigError::Validation {
                reason: format!("depth must be between 1 and {MAX_DEPTH}, got {}", self.engine.depth),
            });
        }
        if self.engine.time_limit_ms == Some(0) {
            return Err(ConfigError::Validation {
                reason: "time_limit_ms must be > 0".to_string(),
            });
        }
        Ok(())
    }
}
