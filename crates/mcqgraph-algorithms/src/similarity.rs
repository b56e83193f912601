//! Structural node similarity
//!
//! Two measures are provided:
//! - Jaccard coefficient of undirected neighbour sets, restricted to an ego network
//! - SimRank ("two nodes are similar if their in-neighbours are similar")

use super::common::{GraphView, NodeId};
use super::traversal::ego_network;
use ndarray::Array2;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// SimRank configuration
#[derive(Debug, Clone, Copy)]
pub struct SimRankConfig {
    /// Decay applied per step (usually 0.8 - 0.9)
    pub importance: f64,
    /// Upper bound on iterations
    pub max_iterations: usize,
    /// Stop once no entry moves by more than this
    pub tolerance: f64,
}

impl Default for SimRankConfig {
    fn default() -> Self {
        Self {
            importance: 0.9,
            max_iterations: 100,
            tolerance: 0.0001,
        }
    }
}

/// |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty.
pub fn jaccard_coefficient<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Jaccard similarity between `source` and every node of its undirected ego network
/// that is not directly adjacent to it.
///
/// Neighbour sets are taken inside the ego network only, so nodes on the rim
/// are scored on the part of their neighbourhood that falls within `radius`.
pub fn jaccard_similarity(view: &GraphView, source: NodeId, radius: usize) -> HashMap<NodeId, f64> {
    let source_idx = match view.node_to_index.get(&source) {
        Some(&idx) => idx,
        None => return HashMap::new(),
    };

    let members = ego_network(view, source_idx, radius, true);
    let inside: HashSet<usize> = members.iter().copied().collect();
    let neighbourhood = |idx: usize| -> HashSet<usize> {
        view.neighbors(idx)
            .into_iter()
            .filter(|n| inside.contains(n))
            .collect()
    };

    let source_neighbours = neighbourhood(source_idx);

    members
        .iter()
        .copied()
        .filter(|&idx| idx != source_idx && !source_neighbours.contains(&idx))
        .map(|idx| {
            let score = jaccard_coefficient(&source_neighbours, &neighbourhood(idx));
            (view.index_to_node[idx], score)
        })
        .collect()
}

/// SimRank scores between `source` and every other node of the view.
///
/// Uses the matrix formulation `S = C * Wᵀ S W` with `W` the adjacency matrix
/// normalised by in-degree, and the diagonal pinned to 1.
pub fn simrank_similarity(
    view: &GraphView,
    source: NodeId,
    config: &SimRankConfig,
) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let source_idx = match view.node_to_index.get(&source) {
        Some(&idx) => idx,
        None => return HashMap::new(),
    };

    let mut transition = Array2::<f64>::zeros((n, n));
    for target in 0..n {
        let sources = view.predecessors(target);
        if sources.is_empty() {
            continue;
        }
        let share = 1.0 / sources.len() as f64;
        for &src in sources {
            transition[(src, target)] += share;
        }
    }

    let mut scores = Array2::<f64>::eye(n);
    for _ in 0..config.max_iterations {
        let mut next = transition.t().dot(&scores).dot(&transition) * config.importance;
        next.diag_mut().fill(1.0);

        let delta = (&next - &scores)
            .iter()
            .fold(0.0_f64, |acc, d| acc.max(d.abs()));
        scores = next;
        if delta < config.tolerance {
            break;
        }
    }

    scores
        .row(source_idx)
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != source_idx)
        .map(|(idx, &score)| (view.index_to_node[idx], score))
        .collect()
}
