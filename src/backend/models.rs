//! Wire types for the Neo4j HTTP transactional API
//!
//! Request: `POST /db/{database}/tx/commit` with a list of statements.
//! Response: one result per statement plus a list of errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a commit request
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionRequest {
    pub statements: Vec<Statement>,
}

impl TransactionRequest {
    pub fn single(statement: Statement) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

/// One Cypher statement with its parameters
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub statement: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl Statement {
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            statement: cypher.into(),
            parameters: Map::new(),
        }
    }

    /// Bind a `$name` parameter
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }
}

/// Body of a commit response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub results: Vec<StatementResult>,
    #[serde(default)]
    pub errors: Vec<Neo4jError>,
}

impl TransactionResponse {
    /// Joined error messages, if the server reported any
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Columns and rows produced by one statement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatementResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<Row>,
}

impl StatementResult {
    /// Number of result rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the result is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values of one column across all rows
    pub fn column(&self, name: &str) -> Vec<&Value> {
        match self.columns.iter().position(|c| c == name) {
            Some(idx) => self.data.iter().filter_map(|r| r.row.get(idx)).collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    pub row: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jError {
    pub code: String,
    pub message: String,
}
