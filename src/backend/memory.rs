//! InMemoryGraph: in-process graph backend
//!
//! Wraps a [`GraphStore`] behind a tokio `RwLock`; no network needed.

use async_trait::async_trait;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{GraphBackend, GraphStats};
use crate::algo::{build_view, ego_network, jaccard_similarity, simrank_similarity, SimRankConfig};
use crate::config::SimilarityMeasure;
use crate::engine::seeded_rng;
use crate::error::McqResult;
use crate::graph::{EdgeId, GraphError, GraphStore, Node, NodeId, Relationship};

/// In-process backend that wraps a GraphStore directly.
///
/// Ideal for tests, the CLI and embedding in another service.
pub struct InMemoryGraph {
    store: Arc<RwLock<GraphStore>>,
    measure: SimilarityMeasure,
}

impl InMemoryGraph {
    /// Create a backend over a fresh empty store
    pub fn new() -> Self {
        Self::with_store(Arc::new(RwLock::new(GraphStore::new())))
    }

    /// Create a backend wrapping an existing store
    pub fn with_store(store: Arc<RwLock<GraphStore>>) -> Self {
        Self {
            store,
            measure: SimilarityMeasure::default(),
        }
    }

    /// Use a different structural similarity for `similarity_matrix`
    pub fn with_similarity(mut self, measure: SimilarityMeasure) -> Self {
        self.measure = measure;
        self
    }

    pub fn similarity(&self) -> SimilarityMeasure {
        self.measure
    }

    /// Get a reference to the underlying store
    pub fn store(&self) -> &Arc<RwLock<GraphStore>> {
        &self.store
    }

    /// Acquire a read lock on the store.
    pub async fn store_read(&self) -> tokio::sync::RwLockReadGuard<'_, GraphStore> {
        self.store.read().await
    }

    /// Acquire a write lock on the store.
    pub async fn store_write(&self) -> tokio::sync::RwLockWriteGuard<'_, GraphStore> {
        self.store.write().await
    }

    fn require(store: &GraphStore, name: &str) -> Result<NodeId, GraphError> {
        store
            .node_id(name)
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
    }
}

impl Default for InMemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GraphStore> for InMemoryGraph {
    fn from(store: GraphStore) -> Self {
        Self::with_store(Arc::new(RwLock::new(store)))
    }
}

#[async_trait]
impl GraphBackend for InMemoryGraph {
    async fn random_relationship(&self, seed: Option<u64>) -> McqResult<Relationship> {
        let store = self.store.read().await;
        let count = store.edge_count();
        if count == 0 {
            return Err(GraphError::EmptyGraph.into());
        }

        let pick = seeded_rng(seed).gen_range(0..count);
        let relationship = store
            .relationship(EdgeId::new(pick as u64))
            .ok_or(GraphError::EmptyGraph)?;
        debug!("Picked relationship {} of {}: {}", pick, count, relationship);
        Ok(relationship)
    }

    async fn get_node(&self, name: &str) -> McqResult<Option<Node>> {
        Ok(self.store.read().await.get_node(name).cloned())
    }

    async fn has_relationship(&self, relationship: &Relationship) -> McqResult<bool> {
        Ok(self.store.read().await.has_relationship(relationship))
    }

    async fn related_nodes(&self, relationship: &Relationship) -> McqResult<Vec<Node>> {
        let store = self.store.read().await;
        let Some(target) = store.node_id(&relationship.target) else {
            return Ok(Vec::new());
        };

        let related: BTreeSet<&Node> = store
            .get_incoming_edges(target)
            .filter(|edge| edge.rel_type == relationship.rel_type)
            .filter_map(|edge| store.node(edge.source))
            .collect();
        Ok(related.into_iter().cloned().collect())
    }

    async fn connected_nodes(&self, node: &Node) -> McqResult<Vec<Node>> {
        let store = self.store.read().await;
        let id = Self::require(&store, &node.name)?;
        Ok(store.neighbors(id).into_iter().cloned().collect())
    }

    async fn similarity_matrix(&self, node: &Node) -> McqResult<BTreeMap<String, f64>> {
        let store = self.store.read().await;
        let id = Self::require(&store, &node.name)?;
        let view = build_view(&store);

        let scores = match self.measure {
            SimilarityMeasure::Jaccard { radius } => jaccard_similarity(&view, id.as_u64(), radius),
            SimilarityMeasure::SimRank {
                radius,
                importance,
                max_iterations,
                tolerance,
            } => {
                let config = SimRankConfig {
                    importance,
                    max_iterations,
                    tolerance,
                };
                let reachable: BTreeSet<u64> = ego_network(&view, id.as_u64() as usize, radius, true)
                    .into_iter()
                    .map(|idx| view.index_to_node[idx])
                    .collect();
                let mut scores = simrank_similarity(&view, id.as_u64(), &config);
                scores.retain(|other, _| reachable.contains(other));
                scores
            }
        };

        let matrix: BTreeMap<String, f64> = scores
            .into_iter()
            .filter_map(|(other, score)| {
                store
                    .node(NodeId::new(other))
                    .map(|n| (n.name.clone(), score))
            })
            .collect();
        debug!("Similarity for '{}': {} candidates", node.name, matrix.len());
        Ok(matrix)
    }

    async fn create_nodes(&self, nodes: Vec<Node>) -> McqResult<usize> {
        let mut store = self.store.write().await;
        let created = store.create_nodes(nodes)?.len();
        info!("Created {} nodes", created);
        Ok(created)
    }

    async fn create_relationships(&self, relationships: Vec<Relationship>) -> McqResult<usize> {
        let mut store = self.store.write().await;
        let created = store.create_relationships(&relationships)?.len();
        info!("Created {} relationships", created);
        Ok(created)
    }

    async fn delete_all(&self) -> McqResult<()> {
        let mut store = self.store.write().await;
        let (nodes, edges) = (store.node_count(), store.edge_count());
        store.clear();
        info!("Cleared graph ({} nodes, {} relationships)", nodes, edges);
        Ok(())
    }

    async fn stats(&self) -> McqResult<GraphStats> {
        let store = self.store.read().await;
        Ok(GraphStats {
            nodes: store.node_count() as u64,
            relationships: store.edge_count() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::McqError;

    /// Fruit -> {Apple, Pear}, Vegetable -> {Leek}, with reverse belongs_to edges
    async fn produce() -> InMemoryGraph {
        let graph = InMemoryGraph::new();
        graph
            .create_nodes(
                ["Apple", "Fruit", "Leek", "Pear", "Vegetable"]
                    .into_iter()
                    .map(Node::from)
                    .collect(),
            )
            .await
            .unwrap();
        let mut rels = Vec::new();
        for (category, member) in [("Fruit", "Apple"), ("Fruit", "Pear"), ("Vegetable", "Leek")] {
            rels.push(Relationship::new(category, "includes", member));
            rels.push(Relationship::new(member, "belongs_to", category));
        }
        graph.create_relationships(rels).await.unwrap();
        graph
    }

    #[tokio::test]
    async fn test_random_relationship_empty_graph() {
        let graph = InMemoryGraph::new();
        let err = graph.random_relationship(Some(1)).await.unwrap_err();
        assert!(matches!(err, McqError::Graph(GraphError::EmptyGraph)));
    }

    #[tokio::test]
    async fn test_random_relationship_is_seeded() {
        let graph = produce().await;
        let first = graph.random_relationship(Some(42)).await.unwrap();
        let again = graph.random_relationship(Some(42)).await.unwrap();
        assert_eq!(first, again);
        assert!(graph.has_relationship(&first).await.unwrap());
    }

    #[tokio::test]
    async fn test_related_nodes_share_type_and_target() {
        let graph = produce().await;
        let rel = Relationship::new("Apple", "belongs_to", "Fruit");
        let related: Vec<String> = graph
            .related_nodes(&rel)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(related, vec!["Apple", "Pear"]);

        let missing = Relationship::new("Apple", "belongs_to", "Mineral");
        assert!(graph.related_nodes(&missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connected_nodes() {
        let graph = produce().await;
        let fruit: Vec<String> = graph
            .connected_nodes(&Node::new("Fruit"))
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(fruit, vec!["Apple", "Pear"]);

        let err = graph.connected_nodes(&Node::new("Mineral")).await.unwrap_err();
        assert!(matches!(err, McqError::Graph(GraphError::NodeNotFound(name)) if name == "Mineral"));
    }

    #[tokio::test]
    async fn test_jaccard_matrix_scores_siblings() {
        let graph = produce().await;
        let matrix = graph.similarity_matrix(&Node::new("Apple")).await.unwrap();

        // Pear shares Fruit as its only neighbour; Leek lives in another component
        assert_eq!(matrix.get("Pear"), Some(&1.0));
        assert!(!matrix.contains_key("Fruit"));
        assert!(!matrix.contains_key("Leek"));
        assert!(!matrix.contains_key("Apple"));
    }

    #[tokio::test]
    async fn test_simrank_matrix_within_radius() {
        let graph = produce().await.with_similarity(SimilarityMeasure::SimRank {
            radius: 5,
            importance: 0.9,
            max_iterations: 100,
            tolerance: 0.0001,
        });
        let matrix = graph.similarity_matrix(&Node::new("Apple")).await.unwrap();

        assert!(matrix.contains_key("Pear"));
        assert!(matrix.contains_key("Fruit"));
        assert!(!matrix.contains_key("Leek"));
        assert!(matrix.values().all(|s| (0.0..=1.0).contains(s)));
    }

    #[tokio::test]
    async fn test_create_nodes_rejects_duplicates() {
        let graph = produce().await;
        let err = graph
            .create_nodes(vec![Node::new("Kiwi"), Node::new("Apple")])
            .await
            .unwrap_err();
        assert_eq!(
            err.as_graph_error(),
            Some(&GraphError::DuplicateNodes {
                names: vec!["Apple".to_string()]
            })
        );
        assert!(graph.get_node("Kiwi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_all_and_stats() {
        let graph = produce().await;
        assert_eq!(
            graph.stats().await.unwrap(),
            GraphStats {
                nodes: 5,
                relationships: 6
            }
        );
        graph.delete_all().await.unwrap();
        assert_eq!(graph.stats().await.unwrap(), GraphStats::default());
    }

    #[tokio::test]
    async fn test_shared_store() {
        let mut store = GraphStore::new();
        store.create_node(Node::new("Solo")).unwrap();
        let graph = InMemoryGraph::from(store);
        assert_eq!(graph.store_read().await.node_count(), 1);

        graph.store_write().await.create_node(Node::new("Duo")).unwrap();
        assert!(graph.get_node("Duo").await.unwrap().is_some());
    }
}
