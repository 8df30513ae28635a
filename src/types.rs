//! Core types shared across the hierarchy, index, and storage layers.

/// NodeId: unique, monotonically increasing identifier of a hierarchy entry
pub type NodeId = u64;

/// Id assigned to the root directory; the allocator starts here.
pub const ROOT_ID: NodeId = 1;

/// Minimum degree used by the id index unless configured otherwise.
pub const DEFAULT_MIN_DEGREE: usize = 3;
