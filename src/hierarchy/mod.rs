//! Hierarchy Manager
//!
//! Owns the node arena, the id index, the current-directory cursor and the id
//! allocator, and mirrors every mutation onto a [`StorageBackend`].
//!
//! The in-memory hierarchy is authoritative. A mutation is always applied in
//! memory; if mirroring it to storage fails the caller gets
//! [`HierarchyError::Mirror`] carrying the affected id.
//!
//! Name-based operations (`rename`, `remove`, `set_permissions`,
//! `change_directory`, `find_by_name`) only look at the direct children of the
//! cursor. [`Hierarchy::lookup`] is the id-based counterpart and goes through
//! the index regardless of where the node lives.

mod mapping;
mod verify;

pub use verify::ConsistencyReport;

use crate::error::{HierarchyError, StorageError};
use crate::index::{BTreeIndex, IndexStats};
use crate::store::StorageBackend;
use crate::tree::{Node, NodeArena, NodeKind, Permissions, Slot};
use crate::types::{NodeId, ROOT_ID};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name given to the root directory node
pub const ROOT_NAME: &str = "root";

pub struct Hierarchy<S: StorageBackend> {
    arena: NodeArena,
    index: BTreeIndex<Slot>,
    cwd: Slot,
    next_id: NodeId,
    storage: S,
}

impl<S: StorageBackend> Hierarchy<S> {
    /// Build the hierarchy for `storage`: create the root, then map every
    /// entry already present under the storage root.
    ///
    /// # Panics
    ///
    /// Panics if `min_degree < 2`.
    pub fn open(storage: S, min_degree: usize) -> Result<Self, HierarchyError> {
        let mut hierarchy = Self {
            arena: NodeArena::new(),
            index: BTreeIndex::new(min_degree),
            cwd: Slot::ROOT,
            next_id: ROOT_ID,
            storage,
        };
        let root = hierarchy.allocate(ROOT_NAME, NodeKind::Directory, None);
        debug_assert_eq!(root, Slot::ROOT);

        let mapped = hierarchy.map_storage().map_err(HierarchyError::Mapping)?;
        info!(
            root = %hierarchy.storage.root().display(),
            mapped,
            height = hierarchy.index.height(),
            "Mapped storage root"
        );
        Ok(hierarchy)
    }

    fn allocate(&mut self, name: &str, kind: NodeKind, parent: Option<Slot>) -> Slot {
        let id = self.next_id;
        self.next_id += 1;
        let slot = self.arena.push(Node::new(id, name, kind, parent));
        if let Some(parent) = parent {
            self.arena[parent].children.push(slot);
        }
        self.index.insert(id, slot);
        slot
    }

    fn mirror(&self, id: NodeId, result: Result<(), StorageError>) -> Result<(), HierarchyError> {
        result.map_err(|source| {
            warn!(id, error = %source, "Storage mirror failed; keeping in-memory state");
            HierarchyError::Mirror { id, source }
        })
    }

    pub fn root(&self) -> &Node {
        &self.arena[Slot::ROOT]
    }

    /// The directory the cursor points at.
    pub fn current(&self) -> &Node {
        &self.arena[self.cwd]
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Number of nodes ever created, including unlinked ones.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Id the next created entry will receive.
    pub fn next_id(&self) -> NodeId {
        self.next_id
    }

    /// Path of a node relative to the storage root.
    fn relative_path(&self, slot: Slot) -> PathBuf {
        let mut names = Vec::new();
        let mut current = slot;
        while let Some(parent) = self.arena[current].parent {
            names.push(self.arena[current].name.as_str());
            current = parent;
        }
        names.iter().rev().collect()
    }

    /// Absolute storage path of the node with `id`, if it was ever created.
    pub fn path_of(&self, id: NodeId) -> Option<PathBuf> {
        let slot = *self.index.search(id)?;
        Some(self.storage.root().join(self.relative_path(slot)))
    }

    /// Absolute storage path of the cursor.
    pub fn current_path(&self) -> PathBuf {
        self.storage.root().join(self.relative_path(self.cwd))
    }

    fn child_named(&self, name: &str) -> Option<(usize, Slot)> {
        self.arena[self.cwd]
            .children
            .iter()
            .position(|&child| self.arena[child].name == name)
            .map(|pos| (pos, self.arena[self.cwd].children[pos]))
    }

    fn require_child(&self, name: &str) -> Result<(usize, Slot), HierarchyError> {
        self.child_named(name)
            .ok_or_else(|| HierarchyError::NotFound(format!("no entry named '{}'", name)))
    }

    fn ensure_name_free(&self, name: &str) -> Result<(), HierarchyError> {
        match self.child_named(name) {
            Some(_) => Err(HierarchyError::InvalidArgument(format!(
                "an entry named '{}' already exists",
                name
            ))),
            None => Ok(()),
        }
    }

    /// Create a file or directory under the cursor and return its id.
    ///
    /// Sibling names are unique: an existing name is rejected before any id
    /// is allocated.
    pub fn create_entry(&mut self, name: &str, kind: NodeKind) -> Result<NodeId, HierarchyError> {
        validate_name(name)?;
        self.ensure_name_free(name)?;
        let slot = self.allocate(name, kind, Some(self.cwd));
        let id = self.arena[slot].id;
        let path = self.relative_path(slot);
        debug!(id, name, ?kind, "Created entry");

        let mirrored = match kind {
            NodeKind::File => self.storage.create_file(&path),
            NodeKind::Directory => self.storage.create_directory(&path),
        };
        self.mirror(id, mirrored)?;
        Ok(id)
    }

    pub fn create_file(&mut self, name: &str) -> Result<NodeId, HierarchyError> {
        self.create_entry(name, NodeKind::File)
    }

    pub fn create_directory(&mut self, name: &str) -> Result<NodeId, HierarchyError> {
        self.create_entry(name, NodeKind::Directory)
    }

    /// Rename a direct child of the cursor. The new name must not belong to
    /// any direct child, including the entry itself.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<NodeId, HierarchyError> {
        let (_, slot) = self.require_child(old_name)?;
        validate_name(new_name)?;
        self.ensure_name_free(new_name)?;
        let id = self.arena[slot].id;
        let from = self.relative_path(slot);
        let to = from.with_file_name(new_name);

        let mirrored = self.storage.rename(&from, &to);
        self.arena[slot].name = new_name.to_string();
        debug!(id, from = old_name, to = new_name, "Renamed entry");
        self.mirror(id, mirrored)?;
        Ok(id)
    }

    /// Unlink a direct child of the cursor and remove its storage subtree.
    ///
    /// The node and its descendants stay in the index: looking them up by id
    /// still succeeds, but they are no longer reachable from the root.
    pub fn remove(&mut self, name: &str) -> Result<NodeId, HierarchyError> {
        let (pos, slot) = self.require_child(name)?;
        let id = self.arena[slot].id;
        let path = self.relative_path(slot);

        self.arena[self.cwd].children.remove(pos);
        debug!(id, name, "Removed entry; index entry retained");
        let mirrored = self.storage.remove(&path);
        self.mirror(id, mirrored)?;
        Ok(id)
    }

    /// Set owner permissions of a direct child from a single octal digit.
    pub fn set_permissions(&mut self, name: &str, digit: &str) -> Result<NodeId, HierarchyError> {
        let (_, slot) = self.require_child(name)?;
        let permissions = Permissions::from_owner_digit(digit)?;
        let node = &mut self.arena[slot];
        debug!(id = node.id, name, %permissions, "Changed permissions");
        node.permissions = permissions;
        Ok(node.id)
    }

    /// Move the cursor into the child directory `name`.
    pub fn change_directory(&mut self, name: &str) -> Result<NodeId, HierarchyError> {
        let target = self.arena[self.cwd]
            .children
            .iter()
            .copied()
            .find(|&child| {
                let node = &self.arena[child];
                node.name == name && node.is_directory()
            })
            .ok_or_else(|| HierarchyError::NotFound(format!("no directory named '{}'", name)))?;
        self.cwd = target;
        Ok(self.arena[target].id)
    }

    /// Move the cursor to its parent. Returns false at the root, where the
    /// cursor stays put.
    pub fn change_to_parent(&mut self) -> bool {
        match self.arena[self.cwd].parent {
            Some(parent) => {
                self.cwd = parent;
                true
            }
            None => false,
        }
    }

    /// Direct children of the cursor, in creation order.
    pub fn list_direct(&self) -> impl Iterator<Item = &Node> + '_ {
        self.arena[self.cwd]
            .children
            .iter()
            .map(move |&child| &self.arena[child])
    }

    /// Pre-order walk of the cursor's subtree as `(depth, node)`, starting
    /// with the cursor itself at depth 0.
    pub fn list_recursive(&self) -> impl Iterator<Item = (usize, &Node)> + '_ {
        self.arena.pre_order(self.cwd)
    }

    /// Linear scan of the cursor's direct children by name.
    pub fn find_by_name(&self, name: &str) -> Result<&Node, HierarchyError> {
        self.require_child(name).map(|(_, slot)| &self.arena[slot])
    }

    /// Index lookup by id, independent of the cursor.
    pub fn lookup(&self, id: NodeId) -> Option<&Node> {
        self.index.search(id).map(|&slot| &self.arena[slot])
    }

    /// True when the node with `id` is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let Some(&slot) = self.index.search(id) else {
            return false;
        };
        let mut current = slot;
        while let Some(parent) = self.arena[current].parent {
            if !self.arena[parent].children.contains(&current) {
                return false;
            }
            current = parent;
        }
        current == Slot::ROOT
    }

    /// Every node ever created, ascending by id, read through the index.
    pub fn nodes_by_id(&self) -> impl Iterator<Item = &Node> + '_ {
        self.index.iter().map(move |(_, &slot)| &self.arena[slot])
    }

    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }
}

/// Reject names that would not map onto a single path component.
fn validate_name(name: &str) -> Result<(), HierarchyError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains(std::path::MAIN_SEPARATOR)
        || Path::new(name).is_absolute();
    if invalid {
        return Err(HierarchyError::InvalidArgument(format!(
            "'{}' is not a valid entry name",
            name
        )));
    }
    Ok(())
}
