//! MergeService: orchestrates sources and deserializes to InotreeConfig.

use crate::config::sources::{environment, file};
use crate::config::InotreeConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a base directory.
    /// Precedence: defaults (lowest) -> `inotree.toml` -> environment (highest).
    pub fn load(base_dir: &Path) -> Result<InotreeConfig, ConfigError> {
        let builder = Config::builder();
        let builder = file::add_default_to_builder(builder, base_dir)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<InotreeConfig, ConfigError> {
        let builder = Config::builder();
        let builder = file::add_explicit_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
