//! Consistency check between the arena, the hierarchy links and the index.

use super::Hierarchy;
use crate::store::StorageBackend;
use crate::tree::Slot;
use crate::types::NodeId;
use std::collections::HashSet;

/// Outcome of [`Hierarchy::verify`]
#[derive(Debug, Clone, Default)]
pub struct ConsistencyReport {
    /// Nodes ever created
    pub nodes: usize,
    /// Nodes reachable from the root
    pub attached: usize,
    /// Index entries whose node has been unlinked from the hierarchy
    pub stale_index_entries: usize,
    pub problems: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.problems.is_empty()
    }
}

impl<S: StorageBackend> Hierarchy<S> {
    /// Check that every node is indexed exactly once under its id, that child
    /// and parent links agree, and that the index itself is well formed.
    pub fn verify(&self) -> ConsistencyReport {
        let mut report = ConsistencyReport {
            nodes: self.arena.len(),
            ..Default::default()
        };

        if let Err(violation) = self.index.verify() {
            report.problems.push(format!("index: {}", violation));
        }
        if self.index.len() != self.arena.len() {
            report.problems.push(format!(
                "index holds {} entries for {} nodes",
                self.index.len(),
                self.arena.len()
            ));
        }

        let mut previous_id = None;
        for (slot, node) in self.arena.iter() {
            if self.index.search(node.id) != Some(&slot) {
                report
                    .problems
                    .push(format!("node {} is not indexed at {}", node.id, slot));
            }
            if previous_id.map_or(false, |prev| node.id <= prev) {
                report
                    .problems
                    .push(format!("node {} breaks ascending id allocation", node.id));
            }
            previous_id = Some(node.id);
        }

        if self.root().parent.is_some() {
            report.problems.push("root has a parent".to_string());
        }

        let mut seen: HashSet<NodeId> = HashSet::new();
        for (_, node) in self.arena.pre_order(Slot::ROOT) {
            if !seen.insert(node.id) {
                report
                    .problems
                    .push(format!("node {} is reachable twice", node.id));
                continue;
            }
            for &child in &node.children {
                let parent_id = self.arena[child]
                    .parent
                    .map(|parent| self.arena[parent].id);
                if parent_id != Some(node.id) {
                    report.problems.push(format!(
                        "node {} is held by {} but points at {:?}",
                        self.arena[child].id, node.id, parent_id
                    ));
                }
            }
        }
        report.attached = seen.len();
        report.stale_index_entries = report.nodes.saturating_sub(report.attached);
        report
    }
}
