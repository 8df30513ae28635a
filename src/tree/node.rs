//! Hierarchy node types

use crate::tree::arena::Slot;
use crate::tree::permissions::Permissions;
use crate::types::NodeId;
use chrono::{DateTime, Local};

/// Node kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    pub fn is_directory(self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Single-character type marker used in listings.
    pub fn marker(self) -> char {
        match self {
            NodeKind::File => '-',
            NodeKind::Directory => 'd',
        }
    }
}

/// One file or directory entry in the simulated hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Size in bytes; always 0 for directories
    pub size: u64,
    pub permissions: Permissions,
    pub created_at: DateTime<Local>,
    /// Arena slots of the children, in insertion order
    pub children: Vec<Slot>,
    /// Arena slot of the containing directory; `None` for the root
    pub parent: Option<Slot>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<Slot>,
    ) -> Self {
        Node {
            id,
            name: name.into(),
            kind,
            size: 0,
            permissions: Permissions::default(),
            created_at: Local::now(),
            children: Vec::new(),
            parent,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }
}
