//! Node arena
//!
//! Owns every node ever created. Parent and child links are arena slots, so
//! the hierarchy has no shared ownership or reference cycles. Slots are never
//! reused: an unlinked node stays addressable for the process lifetime.

use crate::tree::node::Node;
use std::fmt;

/// Stable position of a node inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(usize);

impl Slot {
    /// The root is always the first node pushed.
    pub const ROOT: Slot = Slot(0);
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) -> Slot {
        self.nodes.push(node);
        Slot(self.nodes.len() - 1)
    }

    pub fn get(&self, slot: Slot) -> Option<&Node> {
        self.nodes.get(slot.0)
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Node> {
        self.nodes.get_mut(slot.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node with its slot, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| (Slot(i), node))
    }
}

/// Depth-first pre-order walk over a subtree, yielding `(depth, node)`.
///
/// Uses an explicit stack, so deep hierarchies cannot exhaust the call stack.
pub struct PreOrder<'a> {
    arena: &'a NodeArena,
    stack: Vec<(Slot, usize)>,
}

impl NodeArena {
    /// Walk the subtree rooted at `start`, `start` itself first at depth 0.
    pub fn pre_order(&self, start: Slot) -> PreOrder<'_> {
        PreOrder {
            arena: self,
            stack: vec![(start, 0)],
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (slot, depth) = self.stack.pop()?;
        let node = self.arena.get(slot)?;
        self.stack
            .extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        Some((depth, node))
    }
}

impl std::ops::Index<Slot> for NodeArena {
    type Output = Node;

    fn index(&self, slot: Slot) -> &Node {
        &self.nodes[slot.0]
    }
}

impl std::ops::IndexMut<Slot> for NodeArena {
    fn index_mut(&mut self, slot: Slot) -> &mut Node {
        &mut self.nodes[slot.0]
    }
}
