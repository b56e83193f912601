//! Relationships between concepts
//!
//! [`Relationship`] is the name-based form exchanged with backends and callers;
//! [`Edge`] is the id-based form kept inside a [`GraphStore`](super::GraphStore).

use super::types::{EdgeId, NodeId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A directed, typed relationship `source -[type]-> target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    /// Name of the node the edge leaves
    pub source: String,

    /// Name of the node the edge enters
    pub target: String,

    /// Relationship type label (e.g. "includes", "belongs_to")
    #[serde(rename = "type")]
    pub rel_type: String,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        rel_type: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Relationship {
            source: source.into(),
            target: target.into(),
            rel_type: rel_type.into(),
        }
    }

    /// Whether the type is a bare identifier (letters, digits, underscores; not starting with a digit).
    ///
    /// Both backends enforce this so a type can be spliced into Cypher safely.
    pub fn has_valid_type(&self) -> bool {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN
            .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"))
            .is_match(&self.rel_type)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[:{}]->({})", self.source, self.rel_type, self.target)
    }
}

/// A directed edge stored in the arena
#[derive(Debug, Clone)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Type of relationship
    pub rel_type: String,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, rel_type: impl Into<String>) -> Self {
        Edge {
            id,
            source,
            target,
            rel_type: rel_type.into(),
        }
    }

    /// Get the other end of this edge, if `node_id` is one of its ends
    pub fn other_end(&self, node_id: NodeId) -> Option<NodeId> {
        if self.source == node_id {
            Some(self.target)
        } else if self.target == node_id {
            Some(self.source)
        } else {
            None
        }
    }
}
