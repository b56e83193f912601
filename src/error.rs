//! Error types for question generation and graph backends

use crate::graph::GraphError;
use thiserror::Error;

/// Errors that can occur while building a question or talking to a backend
#[derive(Error, Debug)]
pub enum McqError {
    /// Graph-level failure (empty graph, missing node, duplicates)
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Error reported by a remote graph database
    #[error("Query error: {0}")]
    QueryError(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// YAML config or concept file error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Hyphenation patterns could not be loaded
    #[error("Dictionary error: {0}")]
    DictionaryError(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type McqResult<T> = Result<T, McqError>;

impl McqError {
    /// The graph-level error, if this is one
    pub fn as_graph_error(&self) -> Option<&GraphError> {
        match self {
            McqError::Graph(err) => Some(err),
            _ => None,
        }
    }
}
