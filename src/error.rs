//! Error types for the hierarchy, storage backend, and bootstrap layers.

use crate::types::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a call into the storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{op} failed for {path:?}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to enumerate {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Storage root unavailable: {0}")]
    Root(String),
}

impl StorageError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced at the hierarchy manager boundary
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The in-memory change was applied but mirroring it to storage failed.
    #[error("Node {id} updated in memory but storage mirror failed: {source}")]
    Mirror {
        id: NodeId,
        #[source]
        source: StorageError,
    },

    #[error("Startup mapping failed: {0}")]
    Mapping(#[source] StorageError),
}

impl HierarchyError {
    /// True when the hierarchy was left unchanged by the failed call.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            HierarchyError::NotFound(_) | HierarchyError::InvalidArgument(_)
        )
    }
}

/// Errors raised while bootstrapping the binary (config, logging, storage root)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
