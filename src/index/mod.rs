//! Id Index
//!
//! Multiway balanced search tree keyed by [`NodeId`]. Insertion splits full
//! nodes on the way down, so a single top-down pass always finds room for the
//! new key. Entries are never removed: a key stays indexed for the lifetime of
//! the tree, even after the hierarchy entry it names has been unlinked.

mod iter;
mod verify;

pub use iter::Iter;
pub use verify::{IndexStats, IndexViolation};

use crate::types::{NodeId, DEFAULT_MIN_DEGREE};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    pub(crate) key: NodeId,
    pub(crate) value: V,
}

/// One node of the index tree
#[derive(Debug, Clone)]
pub(crate) struct IndexNode<V> {
    pub(crate) entries: Vec<Entry<V>>,
    pub(crate) children: Vec<IndexNode<V>>,
    pub(crate) leaf: bool,
}

impl<V> IndexNode<V> {
    fn leaf_with(entry: Entry<V>, t: usize) -> Self {
        let mut entries = Vec::with_capacity(2 * t - 1);
        entries.push(entry);
        Self {
            entries,
            children: Vec::new(),
            leaf: true,
        }
    }

    fn empty_internal(t: usize) -> Self {
        Self {
            entries: Vec::with_capacity(2 * t - 1),
            children: Vec::with_capacity(2 * t),
            leaf: false,
        }
    }

    fn is_full(&self, t: usize) -> bool {
        self.entries.len() == 2 * t - 1
    }

    /// Slot where `key` belongs among this node's entries.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already stored in this node.
    fn slot_for(&self, key: NodeId) -> usize {
        match self.entries.binary_search_by_key(&key, |e| e.key) {
            Ok(_) => duplicate_key(key),
            Err(pos) => pos,
        }
    }

    /// Split the full child at `i` around its median.
    ///
    /// The child keeps its lower t-1 entries, a new sibling takes the upper
    /// t-1 entries (and upper t children when internal), and the median moves
    /// up into this node at position `i`. This node must have room for one
    /// more entry.
    pub(crate) fn split_child(&mut self, i: usize, t: usize) {
        debug_assert!(self.entries.len() < 2 * t - 1);
        let child = &mut self.children[i];
        debug_assert_eq!(child.entries.len(), 2 * t - 1);

        let upper_entries = child.entries.split_off(t);
        let median = child.entries.remove(t - 1);
        let upper_children = if child.leaf {
            Vec::new()
        } else {
            child.children.split_off(t)
        };
        let sibling = IndexNode {
            entries: upper_entries,
            children: upper_children,
            leaf: child.leaf,
        };

        self.entries.insert(i, median);
        self.children.insert(i + 1, sibling);
    }
}

fn duplicate_key(key: NodeId) -> ! {
    panic!("id {key} is already present in the index");
}

/// Balanced multiway search tree mapping node ids to values
#[derive(Debug, Clone)]
pub struct BTreeIndex<V> {
    root: Option<IndexNode<V>>,
    min_degree: usize,
    len: usize,
    root_splits: u64,
}

impl<V> Default for BTreeIndex<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DEGREE)
    }
}

impl<V> BTreeIndex<V> {
    /// Create an empty index with minimum degree `min_degree`.
    ///
    /// # Panics
    ///
    /// Panics if `min_degree < 2`.
    pub fn new(min_degree: usize) -> Self {
        assert!(
            min_degree >= 2,
            "index minimum degree must be at least 2, got {min_degree}"
        );
        Self {
            root: None,
            min_degree,
            len: 0,
            root_splits: 0,
        }
    }

    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of times a full root was split, i.e. times the tree grew taller.
    pub fn root_splits(&self) -> u64 {
        self.root_splits
    }

    /// Levels from root to leaves; 0 for an empty index.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_ref();
        while let Some(current) = node {
            height += 1;
            node = current.children.first();
        }
        height
    }

    /// Insert `value` under `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already present. Ids are unique by construction;
    /// a collision means the caller's allocator is broken.
    pub fn insert(&mut self, key: NodeId, value: V) {
        let t = self.min_degree;
        let entry = Entry { key, value };

        let Some(root) = self.root.as_mut() else {
            self.root = Some(IndexNode::leaf_with(entry, t));
            self.len = 1;
            return;
        };

        if root.is_full(t) {
            let old_root = std::mem::replace(root, IndexNode::empty_internal(t));
            root.children.push(old_root);
            root.split_child(0, t);
            self.root_splits += 1;
        }

        let mut node = root;
        loop {
            let mut pos = node.slot_for(key);
            if node.leaf {
                node.entries.insert(pos, entry);
                break;
            }
            if node.children[pos].is_full(t) {
                node.split_child(pos, t);
                match key.cmp(&node.entries[pos].key) {
                    Ordering::Greater => pos += 1,
                    Ordering::Equal => duplicate_key(key),
                    Ordering::Less => {}
                }
            }
            node = &mut node.children[pos];
        }
        self.len += 1;
    }

    /// Look up the value stored under `key`.
    pub fn search(&self, key: NodeId) -> Option<&V> {
        let mut node = self.root.as_ref()?;
        loop {
            match node.entries.binary_search_by_key(&key, |e| e.key) {
                Ok(pos) => return Some(&node.entries[pos].value),
                Err(_) if node.leaf => return None,
                Err(pos) => node = &node.children[pos],
            }
        }
    }

    pub fn contains(&self, key: NodeId) -> bool {
        self.search(key).is_some()
    }

    /// Ascending walk over all entries. Each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_ref(), self.len)
    }

    /// Ascending sequence of every indexed key.
    pub fn keys(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub(crate) fn root(&self) -> Option<&IndexNode<V>> {
        self.root.as_ref()
    }
}

impl<'a, V> IntoIterator for &'a BTreeIndex<V> {
    type Item = (NodeId, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
