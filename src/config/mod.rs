//! Configuration
//!
//! Layered configuration: built-in defaults, then an optional `inotree.toml`
//! (or an explicit file), then `INOTREE__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;
pub mod storage;

pub use facade::ConfigLoader;
pub use storage::StorageConfig;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::DEFAULT_MIN_DEGREE;
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the base directory
pub const CONFIG_FILE_NAME: &str = "inotree.toml";

/// Id index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Minimum degree `t`; nodes hold between t-1 and 2t-1 keys
    #[serde(default = "default_min_degree")]
    pub min_degree: usize,
}

fn default_min_degree() -> usize {
    DEFAULT_MIN_DEGREE
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_degree: default_min_degree(),
        }
    }
}

/// Interactive shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Colorize headings, errors and directory names
    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_true() -> bool {
    true
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            prompt: default_prompt(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InotreeConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl InotreeConfig {
    /// Reject values the hierarchy cannot start with.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.index.min_degree < 2 {
            return Err(ApiError::ConfigError(format!(
                "index.min_degree must be at least 2, got {}",
                self.index.min_degree
            )));
        }
        if self.storage.root.as_os_str().is_empty() {
            return Err(ApiError::ConfigError(
                "storage.root must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
