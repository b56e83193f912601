//! Concept nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concept in the graph. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Node {
    /// Unique name of the concept
    pub name: String,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            info: None,
        }
    }

    /// Attach a description
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Node {
    fn from(name: &str) -> Self {
        Node::new(name)
    }
}

impl From<String> for Node {
    fn from(name: String) -> Self {
        Node::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serialization_skips_missing_info() {
        let node = Node::new("Glycine");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"name":"Glycine"}"#);

        let described = Node::new("GABA").with_info("inhibitory");
        let back: Node = serde_json::from_str(&serde_json::to_string(&described).unwrap()).unwrap();
        assert_eq!(back, described);
    }

    #[test]
    fn test_nodes_order_by_name() {
        let mut nodes = vec![Node::from("Serotonin"), Node::from("Dopamine"), Node::from("GABA")];
        nodes.sort();
        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Dopamine", "GABA", "Serotonin"]);
    }
}
