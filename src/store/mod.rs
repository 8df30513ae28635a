//! Storage Backend
//!
//! The real filesystem the hierarchy mirrors. All paths handed to a backend
//! are relative to its storage root.

pub mod disk;

pub use disk::DiskStorage;

use crate::error::StorageError;
use std::path::Path;

/// One directory entry reported by [`StorageBackend::read_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub name: String,
    pub is_directory: bool,
    /// Size in bytes; 0 for directories
    pub size: u64,
}

/// Storage backend interface
pub trait StorageBackend {
    /// Absolute location of the storage root.
    fn root(&self) -> &Path;
    fn create_file(&mut self, path: &Path) -> Result<(), StorageError>;
    fn create_directory(&mut self, path: &Path) -> Result<(), StorageError>;
    /// Remove a file, or a directory together with everything below it.
    fn remove(&mut self, path: &Path) -> Result<(), StorageError>;
    fn rename(&mut self, from: &Path, to: &Path) -> Result<(), StorageError>;
    /// Direct entries of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> Result<Vec<StorageEntry>, StorageError>;
}
