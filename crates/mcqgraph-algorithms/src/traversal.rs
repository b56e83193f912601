//! Bounded neighbourhood traversal

use super::common::GraphView;
use std::collections::VecDeque;

/// Breadth-first ego network: every node within `radius` hops of `source_idx`.
///
/// Indices are returned in discovery order with the source first. With
/// `undirected` set, incoming edges are walked as well as outgoing ones.
pub fn ego_network(
    view: &GraphView,
    source_idx: usize,
    radius: usize,
    undirected: bool,
) -> Vec<usize> {
    if source_idx >= view.node_count {
        return Vec::new();
    }

    let mut depth = vec![usize::MAX; view.node_count];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    depth[source_idx] = 0;
    queue.push_back(source_idx);

    while let Some(current_idx) = queue.pop_front() {
        order.push(current_idx);
        if depth[current_idx] >= radius {
            continue;
        }

        let backwards: &[usize] = if undirected {
            view.predecessors(current_idx)
        } else {
            &[]
        };

        for &next_idx in view.successors(current_idx).iter().chain(backwards) {
            if depth[next_idx] == usize::MAX {
                depth[next_idx] = depth[current_idx] + 1;
                queue.push_back(next_idx);
            }
        }
    }

    order
}
