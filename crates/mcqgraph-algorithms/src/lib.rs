pub mod common;
pub mod similarity;
pub mod traversal;

pub use common::{GraphView, NodeId};
pub use similarity::{jaccard_coefficient, jaccard_similarity, simrank_similarity, SimRankConfig};
pub use traversal::ego_network;
