//! In-memory graph storage implementation
//!
//! An arena-based directed multigraph keyed by node name. Bulk mutations are
//! validated up front and either apply completely or not at all.

use super::edge::{Edge, Relationship};
use super::node::Node;
use super::types::{EdgeId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Graph has no relationships to pick from")]
    EmptyGraph,

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Duplicate node names: {}", names.join(", "))]
    DuplicateNodes { names: Vec<String> },

    #[error("Invalid relationship type '{0}'")]
    InvalidRelationshipType(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (arena, dense ids)
/// - name_index: name -> NodeId
/// - edges: EdgeId -> Edge (arena, creation order)
/// - outgoing / incoming: NodeId -> Vec<EdgeId> (adjacency lists)
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    name_index: FxHashMap<String, NodeId>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single node. Fails if the name is taken.
    pub fn create_node(&mut self, node: Node) -> GraphResult<NodeId> {
        if self.name_index.contains_key(&node.name) {
            return Err(GraphError::DuplicateNodes {
                names: vec![node.name],
            });
        }
        Ok(self.insert_node(node))
    }

    /// Create a batch of nodes.
    ///
    /// Names repeated within the batch and names already present in the store
    /// are all reported together; nothing is inserted in that case.
    pub fn create_nodes(&mut self, nodes: Vec<Node>) -> GraphResult<Vec<NodeId>> {
        let duplicates = {
            let mut seen = FxHashSet::default();
            let mut duplicates = BTreeSet::new();
            for node in &nodes {
                if !seen.insert(node.name.as_str()) || self.name_index.contains_key(&node.name) {
                    duplicates.insert(node.name.clone());
                }
            }
            duplicates
        };
        if !duplicates.is_empty() {
            return Err(GraphError::DuplicateNodes {
                names: duplicates.into_iter().collect(),
            });
        }

        Ok(nodes.into_iter().map(|node| self.insert_node(node)).collect())
    }

    fn insert_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.name_index.insert(node.name.clone(), id);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Create a single directed edge between existing nodes
    pub fn create_relationship(&mut self, relationship: &Relationship) -> GraphResult<EdgeId> {
        let (source, target) = self.resolve(relationship)?;
        Ok(self.insert_edge(source, target, &relationship.rel_type))
    }

    /// Create a batch of edges. Every endpoint and type is checked before any edge is added.
    pub fn create_relationships(&mut self, relationships: &[Relationship]) -> GraphResult<Vec<EdgeId>> {
        let resolved = relationships
            .iter()
            .map(|rel| self.resolve(rel))
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(resolved
            .into_iter()
            .zip(relationships)
            .map(|((source, target), rel)| self.insert_edge(source, target, &rel.rel_type))
            .collect())
    }

    fn resolve(&self, relationship: &Relationship) -> GraphResult<(NodeId, NodeId)> {
        if !relationship.has_valid_type() {
            return Err(GraphError::InvalidRelationshipType(relationship.rel_type.clone()));
        }
        let source = self
            .node_id(&relationship.source)
            .ok_or_else(|| GraphError::NodeNotFound(relationship.source.clone()))?;
        let target = self
            .node_id(&relationship.target)
            .ok_or_else(|| GraphError::NodeNotFound(relationship.target.clone()))?;
        Ok((source, target))
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, rel_type: &str) -> EdgeId {
        let edge_id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(edge_id, source, target, rel_type));

        // Update adjacency lists
        self.outgoing[source.index()].push(edge_id);
        self.incoming[target.index()].push(edge_id);
        edge_id
    }

    /// Look up a node id by name
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Get a node by name
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get an edge by id
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Name-based view of an edge
    pub fn relationship(&self, id: EdgeId) -> Option<Relationship> {
        let edge = self.edge(id)?;
        Some(self.to_relationship(edge))
    }

    fn to_relationship(&self, edge: &Edge) -> Relationship {
        Relationship::new(
            self.nodes[edge.source.index()].name.clone(),
            edge.rel_type.clone(),
            self.nodes[edge.target.index()].name.clone(),
        )
    }

    /// All relationships, in creation order
    pub fn relationships(&self) -> impl Iterator<Item = Relationship> + '_ {
        self.edges.iter().map(|edge| self.to_relationship(edge))
    }

    /// Whether at least one edge matches source, type and target
    pub fn has_relationship(&self, relationship: &Relationship) -> bool {
        let (Some(source), Some(target)) = (
            self.node_id(&relationship.source),
            self.node_id(&relationship.target),
        ) else {
            return false;
        };

        self.get_outgoing_edges(source)
            .any(|edge| edge.target == target && edge.rel_type == relationship.rel_type)
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(node_id.index())
            .into_iter()
            .flatten()
            .map(|id| &self.edges[id.index()])
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming
            .get(node_id.index())
            .into_iter()
            .flatten()
            .map(|id| &self.edges[id.index()])
    }

    /// Distinct nodes adjacent to `node_id` in either direction, sorted by name.
    pub fn neighbors(&self, node_id: NodeId) -> Vec<&Node> {
        let mut ids: Vec<NodeId> = self
            .get_outgoing_edges(node_id)
            .chain(self.get_incoming_edges(node_id))
            .filter_map(|edge| edge.other_end(node_id))
            .filter(|&other| other != node_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let mut nodes: Vec<&Node> = ids.into_iter().filter_map(|id| self.node(id)).collect();
        nodes.sort();
        nodes
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, in creation order
    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.name_index.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }
}
