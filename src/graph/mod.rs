//! Core concept graph implementation
//!
//! This module implements the data model shared by every backend:
//! - Nodes identified by a unique name with optional info
//! - Directed, typed relationships (parallel edges allowed)
//! - In-memory arena storage with name and adjacency indices

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{Edge, Relationship};
pub use node::Node;
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, NodeId};
