//! Graph algorithms module
//!
//! Algorithms are implemented in the `mcqgraph-algorithms` crate.
//! This module provides the integration/adapter layer.

use crate::graph::GraphStore;
use mcqgraph_algorithms::{GraphView, NodeId as AlgoNodeId};
use std::collections::HashMap;

// Re-export algorithms
pub use mcqgraph_algorithms::{
    ego_network, jaccard_coefficient, jaccard_similarity, simrank_similarity, SimRankConfig,
};

/// Build a GraphView from the store for algorithm execution
///
/// Node ids of the view are the store's dense `NodeId`s. Every edge is
/// projected regardless of type.
pub fn build_view(store: &GraphStore) -> GraphView {
    let node_count = store.node_count();

    // 1. Index mappings (store ids are already dense)
    let index_to_node: Vec<AlgoNodeId> = (0..node_count as u64).collect();
    let node_to_index: HashMap<AlgoNodeId, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, &id)| (id, idx))
        .collect();

    // 2. Adjacency lists
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

    for id in 0..node_count as u64 {
        for edge in store.get_outgoing_edges(crate::graph::NodeId::new(id)) {
            let u_idx = edge.source.as_u64() as usize;
            let v_idx = edge.target.as_u64() as usize;
            outgoing[u_idx].push(v_idx);
            incoming[v_idx].push(u_idx);
        }
    }

    // 3. Convert to CSR
    GraphView::from_adjacency_list(node_count, index_to_node, node_to_index, outgoing, incoming)
}
