//! Structural checks and statistics for the id index.

use super::{BTreeIndex, IndexNode};
use crate::types::NodeId;
use serde::Serialize;
use thiserror::Error;

/// A broken structural invariant found by [`BTreeIndex::verify`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexViolation {
    #[error("node at depth {depth} holds {count} keys, allowed {min}..={max}")]
    KeyCount {
        depth: usize,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("key {key} is out of order at depth {depth}")]
    OutOfOrder { key: NodeId, depth: usize },

    #[error("internal node at depth {depth} has {children} children for {keys} keys")]
    ChildCount {
        depth: usize,
        keys: usize,
        children: usize,
    },

    #[error("leaf at depth {found}, expected every leaf at depth {expected}")]
    UnevenLeaves { expected: usize, found: usize },

    #[error("index records {recorded} entries but holds {counted}")]
    LengthMismatch { recorded: usize, counted: usize },
}

/// Shape summary of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub entries: usize,
    pub min_degree: usize,
    pub height: usize,
    pub index_nodes: usize,
    pub root_splits: u64,
}

struct Walk {
    t: usize,
    leaf_depth: Option<usize>,
    counted: usize,
}

impl Walk {
    fn check<V>(
        &mut self,
        node: &IndexNode<V>,
        depth: usize,
        lower: Option<NodeId>,
        upper: Option<NodeId>,
    ) -> Result<(), IndexViolation> {
        let t = self.t;
        let count = node.entries.len();
        let min = if depth == 0 { 1 } else { t - 1 };
        if count < min || count > 2 * t - 1 {
            return Err(IndexViolation::KeyCount {
                depth,
                count,
                min,
                max: 2 * t - 1,
            });
        }

        let mut previous = lower;
        for entry in &node.entries {
            let above_previous = previous.map_or(true, |p| entry.key > p);
            let below_upper = upper.map_or(true, |u| entry.key < u);
            if !above_previous || !below_upper {
                return Err(IndexViolation::OutOfOrder {
                    key: entry.key,
                    depth,
                });
            }
            previous = Some(entry.key);
        }
        self.counted += count;

        if node.leaf {
            match self.leaf_depth {
                None => self.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(IndexViolation::UnevenLeaves {
                        expected,
                        found: depth,
                    })
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if node.children.len() != count + 1 {
            return Err(IndexViolation::ChildCount {
                depth,
                keys: count,
                children: node.children.len(),
            });
        }
        for (i, child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { Some(node.entries[i - 1].key) };
            let child_upper = node.entries.get(i).map(|e| e.key).or(upper);
            self.check(child, depth + 1, child_lower, child_upper)?;
        }
        Ok(())
    }
}

impl<V> BTreeIndex<V> {
    /// Check ordering, fill bounds, fan-out and equal leaf depth.
    pub fn verify(&self) -> Result<(), IndexViolation> {
        let mut walk = Walk {
            t: self.min_degree(),
            leaf_depth: None,
            counted: 0,
        };
        if let Some(root) = self.root() {
            walk.check(root, 0, None, None)?;
        }
        if walk.counted != self.len() {
            return Err(IndexViolation::LengthMismatch {
                recorded: self.len(),
                counted: walk.counted,
            });
        }
        Ok(())
    }

    pub fn stats(&self) -> IndexStats {
        let mut index_nodes = 0;
        let mut pending: Vec<&IndexNode<V>> = self.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            index_nodes += 1;
            pending.extend(node.children.iter());
        }
        IndexStats {
            entries: self.len(),
            min_degree: self.min_degree(),
            height: self.height(),
            index_nodes,
            root_splits: self.root_splits(),
        }
    }
}
