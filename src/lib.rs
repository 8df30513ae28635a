//! Inotree: a directory hierarchy mirrored on disk, indexed by id.
//!
//! Every file and directory in the mirrored storage root becomes a node in an
//! in-memory hierarchy. Besides the parent/child links, each node is entered
//! into a balanced multiway search tree keyed by its numeric id, so any node
//! can be found in O(log n) regardless of where it sits in the hierarchy.

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod index;
pub mod listing;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
