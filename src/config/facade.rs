//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::InotreeConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a base directory, or from `explicit` when
    /// given. Validation is left to the caller so command-line overrides can
    /// correct file values first.
    pub fn load(base_dir: &Path, explicit: Option<&Path>) -> Result<InotreeConfig, ApiError> {
        let config = match explicit {
            Some(path) => MergeService::load_from_file(path)?,
            None => MergeService::load(base_dir)?,
        };
        Ok(config)
    }
}
