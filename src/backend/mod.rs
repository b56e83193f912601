//! GraphBackend trait: the graph capability the question engine consumes
//!
//! Implemented by:
//! - [`InMemoryGraph`]: in-process [`GraphStore`](crate::graph::GraphStore), no network
//! - [`RemoteGraph`]: a Neo4j server reached over its HTTP transactional API

pub mod memory;
pub mod models;
pub mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::BackendConfig;
use crate::error::McqResult;
use crate::graph::{Node, Relationship};

pub use memory::InMemoryGraph;
pub use remote::RemoteGraph;

/// Node and relationship counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: u64,
    pub relationships: u64,
}

/// Unified graph interface for question generation.
///
/// The generation engine only reads; the mutation methods exist for
/// setup and teardown.
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Pick one relationship, reproducibly when `seed` is given.
    ///
    /// Fails with `GraphError::EmptyGraph` when there are none.
    async fn random_relationship(&self, seed: Option<u64>) -> McqResult<Relationship>;

    /// Look up a node by name
    async fn get_node(&self, name: &str) -> McqResult<Option<Node>>;

    /// Whether at least one edge `(source)-[type]->(target)` exists
    async fn has_relationship(&self, relationship: &Relationship) -> McqResult<bool>;

    /// Every node with an edge of the same type into the same target
    async fn related_nodes(&self, relationship: &Relationship) -> McqResult<Vec<Node>>;

    /// Nodes adjacent to `node` over any type, in either direction
    async fn connected_nodes(&self, node: &Node) -> McqResult<Vec<Node>>;

    /// Structural similarity of `node` to the nodes around it, keyed by name
    async fn similarity_matrix(&self, node: &Node) -> McqResult<BTreeMap<String, f64>>;

    /// Create nodes; all-or-nothing on duplicate names
    async fn create_nodes(&self, nodes: Vec<Node>) -> McqResult<usize>;

    /// Create relationships between existing nodes
    async fn create_relationships(&self, relationships: Vec<Relationship>) -> McqResult<usize>;

    /// Remove every node and relationship
    async fn delete_all(&self) -> McqResult<()>;

    /// Node and relationship counts
    async fn stats(&self) -> McqResult<GraphStats>;
}

/// Build the backend described by `config`.
///
/// A memory backend with a `concepts` file is populated from it.
pub async fn from_config(config: &BackendConfig) -> McqResult<Arc<dyn GraphBackend>> {
    match config {
        BackendConfig::Memory {
            concepts,
            similarity,
        } => {
            let graph = InMemoryGraph::new().with_similarity(*similarity);
            if let Some(path) = concepts {
                let map = crate::sample::read_concepts(path)?;
                crate::sample::load_concepts(&graph, &map).await?;
            }
            Ok(Arc::new(graph))
        }
        BackendConfig::Remote { .. } => Ok(Arc::new(RemoteGraph::from_config(config)?)),
    }
}
