//! mcqgraph
//!
//! Multiple-choice questions generated from a concept graph: pick an edge,
//! gather structurally similar wrong answers, and blend one plausible fake word.
//!
//! # Architecture
//!
//! - `graph`: in-memory concept store (nodes by name, typed directed edges)
//! - `algo`: adapter onto the `mcqgraph-algorithms` crate (ego networks, Jaccard, SimRank)
//! - `backend`: the `GraphBackend` capability with in-memory and Neo4j implementations
//! - `engine`: word splitting, similarity scoring, fake words, candidate collection, assembly
//! - `sample`: concept maps and the built-in neurotransmitter graph
//! - `config`: YAML configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mcqgraph::backend::InMemoryGraph;
//! use mcqgraph::engine::McqGenerator;
//! use mcqgraph::sample::{load_concepts, neurotransmitters};
//! use std::sync::Arc;
//!
//! # async fn run() -> mcqgraph::McqResult<()> {
//! let graph = InMemoryGraph::new();
//! load_concepts(&graph, &neurotransmitters()).await?;
//!
//! let generator = McqGenerator::new(Arc::new(graph))?;
//! let mcq = generator.generate(Some(2)).await?;
//! assert!(mcq.choices.contains(&mcq.answer));
//! # Ok(())
//! # }
//! ```

pub mod algo;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod sample;

pub use backend::{GraphBackend, GraphStats, InMemoryGraph, RemoteGraph};
pub use config::{BackendConfig, GeneratorConfig, McqConfig, SimilarityMeasure};
pub use engine::{
    is_valid_blend, similarity_score, CandidateCollector, CandidatePool, FakeWordRequest,
    FakeWordSynthesizer, Mcq, McqGenerator, WordPair, WordSplitter,
};
pub use error::{McqError, McqResult};
pub use graph::{GraphError, GraphResult, GraphStore, Node, Relationship};
pub use sample::{load_concepts, neurotransmitters, ConceptMap};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.3.0");
    }
}
