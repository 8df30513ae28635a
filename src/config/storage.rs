//! StorageConfig and root resolution.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_root() -> PathBuf {
    PathBuf::from("root")
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory mirrored by the hierarchy (relative paths resolve against
    /// the base directory)
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl StorageConfig {
    /// Resolve the storage root to an actual filesystem location.
    pub fn resolve_root(&self, base_dir: &Path) -> PathBuf {
        if self.root.is_absolute() {
            self.root.clone()
        } else {
            base_dir.join(&self.root)
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { root: default_root() }
    }
}
