//! Startup mapping of the storage root into the hierarchy.

use super::Hierarchy;
use crate::error::StorageError;
use crate::store::{StorageBackend, StorageEntry};
use crate::tree::{NodeKind, Slot};
use std::path::PathBuf;
use tracing::trace;

/// Entry waiting to be mapped: parent slot, storage path, entry metadata
type Pending = (Slot, PathBuf, StorageEntry);

impl<S: StorageBackend> Hierarchy<S> {
    /// Create one node per storage entry below the root, in pre-order.
    ///
    /// Ids follow traversal order: a directory is numbered before its
    /// contents, and siblings in name order. Returns the number of mapped
    /// entries.
    pub(super) fn map_storage(&mut self) -> Result<usize, StorageError> {
        let mut pending: Vec<Pending> = Vec::new();
        self.queue_dir(&mut pending, Slot::ROOT, PathBuf::new())?;

        let mut mapped = 0;
        while let Some((parent, path, entry)) = pending.pop() {
            let kind = if entry.is_directory {
                NodeKind::Directory
            } else {
                NodeKind::File
            };
            let slot = self.allocate(&entry.name, kind, Some(parent));
            self.arena[slot].size = entry.size;
            mapped += 1;
            trace!(id = self.arena[slot].id, path = %path.display(), "Mapped entry");

            if entry.is_directory {
                self.queue_dir(&mut pending, slot, path)?;
            }
        }
        Ok(mapped)
    }

    fn queue_dir(
        &self,
        pending: &mut Vec<Pending>,
        parent: Slot,
        dir: PathBuf,
    ) -> Result<(), StorageError> {
        let entries = self.storage.read_dir(&dir)?;
        pending.extend(entries.into_iter().rev().map(|entry| {
            let path = dir.join(&entry.name);
            (parent, path, entry)
        }));
        Ok(())
    }
}
