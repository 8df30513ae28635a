//! In-memory hierarchy model: nodes, their permissions, and the arena owning them.

pub mod arena;
pub mod node;
pub mod permissions;

pub use arena::{NodeArena, Slot};
pub use node::{Node, NodeKind};
pub use permissions::Permissions;
