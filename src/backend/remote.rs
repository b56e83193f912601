//! RemoteGraph: Neo4j backend over the HTTP transactional API
//!
//! Every call is one `POST {base}/db/{database}/tx/commit`, so multi-statement
//! mutations commit or roll back together. Concept nodes carry the `Entity`
//! label and are unique by `name`.

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};

use super::models::{Statement, StatementResult, TransactionRequest, TransactionResponse};
use super::{GraphBackend, GraphStats};
use crate::algo::jaccard_coefficient;
use crate::config::BackendConfig;
use crate::engine::seeded_rng;
use crate::error::{McqError, McqResult};
use crate::graph::{GraphError, Node, Relationship};

const DEFAULT_DATABASE: &str = "neo4j";
const DEFAULT_RADIUS: usize = 5;

/// Network backend that talks to a running Neo4j server.
pub struct RemoteGraph {
    http_base_url: String,
    database: String,
    credentials: Option<(String, Option<String>)>,
    similarity_radius: usize,
    http_client: Client,
}

impl RemoteGraph {
    /// Create a RemoteGraph for the given HTTP base URL.
    ///
    /// # Example
    /// ```no_run
    /// # use mcqgraph::backend::RemoteGraph;
    /// let graph = RemoteGraph::new("http://localhost:7474")
    ///     .with_credentials("neo4j", Some("password"));
    /// ```
    pub fn new(http_base_url: &str) -> Self {
        Self {
            http_base_url: http_base_url.trim_end_matches('/').to_string(),
            database: DEFAULT_DATABASE.to_string(),
            credentials: None,
            similarity_radius: DEFAULT_RADIUS,
            http_client: Client::new(),
        }
    }

    /// Build the client described by a `kind: remote` backend config.
    ///
    /// Nothing is sent until the first query.
    pub fn from_config(config: &BackendConfig) -> McqResult<Self> {
        match config {
            BackendConfig::Remote {
                url,
                database,
                username,
                password,
                radius,
            } => {
                let mut graph = RemoteGraph::new(url)
                    .with_database(database)
                    .with_similarity_radius(*radius);
                if let Some(username) = username {
                    graph = graph.with_credentials(username, password.as_deref());
                }
                Ok(graph)
            }
            BackendConfig::Memory { .. } => Err(McqError::ConfigError(
                "not a remote backend config".to_string(),
            )),
        }
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    /// Send basic auth with every request
    pub fn with_credentials(mut self, username: &str, password: Option<&str>) -> Self {
        self.credentials = Some((username.to_string(), password.map(str::to_string)));
        self
    }

    pub fn with_similarity_radius(mut self, radius: usize) -> Self {
        self.similarity_radius = radius.max(1);
        self
    }

    /// Commit endpoint for the configured database
    pub fn commit_url(&self) -> String {
        format!("{}/db/{}/tx/commit", self.http_base_url, self.database)
    }

    /// Create the uniqueness constraint on `Entity.name` if it is missing
    pub async fn ensure_schema(&self) -> McqResult<()> {
        self.run_one(Statement::new(
            "CREATE CONSTRAINT entity_name IF NOT EXISTS FOR (n:Entity) REQUIRE n.name IS UNIQUE",
        ))
        .await?;
        Ok(())
    }

    /// Run statements in a single transaction
    async fn run(&self, statements: Vec<Statement>) -> McqResult<Vec<StatementResult>> {
        let url = self.commit_url();
        let mut request = self
            .http_client
            .post(&url)
            .json(&TransactionRequest { statements });
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, password.as_deref());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(McqError::QueryError(format!("{} returned {}: {}", url, status, body)));
        }

        let body: TransactionResponse = response.json().await?;
        if let Some(msg) = body.error_message() {
            return Err(McqError::QueryError(msg));
        }
        Ok(body.results)
    }

    async fn run_one(&self, statement: Statement) -> McqResult<StatementResult> {
        debug!("Cypher: {}", statement.statement);
        Ok(self.run(vec![statement]).await?.into_iter().next().unwrap_or_default())
    }

    async fn require_node(&self, name: &str) -> McqResult<()> {
        match self.get_node(name).await? {
            Some(_) => Ok(()),
            None => Err(GraphError::NodeNotFound(name.to_string()).into()),
        }
    }
}

/// Backtick-quote a relationship type after checking it is a bare identifier
fn quoted_type(relationship: &Relationship) -> Result<String, GraphError> {
    if relationship.has_valid_type() {
        Ok(format!("`{}`", relationship.rel_type))
    } else {
        Err(GraphError::InvalidRelationshipType(relationship.rel_type.clone()))
    }
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Nodes from rows shaped `[name, info]`
fn node_rows(result: &StatementResult) -> Vec<Node> {
    result
        .data
        .iter()
        .filter_map(|row| {
            let name = as_string(row.row.first()?)?;
            let info = row.row.get(1).and_then(as_string);
            Some(Node { name, info })
        })
        .collect()
}

fn string_list(value: Option<&Value>) -> HashSet<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(as_string).collect())
        .unwrap_or_default()
}

/// Jaccard scores from rows shaped `[name, neighbours]`
fn jaccard_rows(source_neighbours: &HashSet<String>, result: &StatementResult) -> BTreeMap<String, f64> {
    result
        .data
        .iter()
        .filter_map(|row| {
            let name = as_string(row.row.first()?)?;
            let neighbours = string_list(row.row.get(1));
            Some((name, jaccard_coefficient(source_neighbours, &neighbours)))
        })
        .collect()
}

#[async_trait]
impl GraphBackend for RemoteGraph {
    async fn random_relationship(&self, seed: Option<u64>) -> McqResult<Relationship> {
        let counted = self
            .run_one(Statement::new(
                "MATCH (:Entity)-[r]->(:Entity) RETURN count(r) AS total",
            ))
            .await?;
        let total = counted
            .column("total")
            .first()
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if total == 0 {
            return Err(GraphError::EmptyGraph.into());
        }

        let skip = seeded_rng(seed).gen_range(0..total);
        let picked = self
            .run_one(
                Statement::new(
                    "MATCH (s:Entity)-[r]->(t:Entity) \
                     RETURN s.name AS source, type(r) AS type, t.name AS target \
                     ORDER BY source, type, target SKIP $skip LIMIT 1",
                )
                .param("skip", skip),
            )
            .await?;

        let row = picked.data.first().ok_or(GraphError::EmptyGraph)?;
        match (
            row.row.first().and_then(as_string),
            row.row.get(1).and_then(as_string),
            row.row.get(2).and_then(as_string),
        ) {
            (Some(source), Some(rel_type), Some(target)) => {
                let relationship = Relationship::new(source, rel_type, target);
                debug!("Picked relationship {} of {}: {}", skip, total, relationship);
                Ok(relationship)
            }
            _ => Err(McqError::QueryError("malformed relationship row".to_string())),
        }
    }

    async fn get_node(&self, name: &str) -> McqResult<Option<Node>> {
        let result = self
            .run_one(
                Statement::new("MATCH (n:Entity {name: $name}) RETURN n.name AS name, n.info AS info")
                    .param("name", name),
            )
            .await?;
        Ok(node_rows(&result).into_iter().next())
    }

    async fn has_relationship(&self, relationship: &Relationship) -> McqResult<bool> {
        let cypher = format!(
            "MATCH (:Entity {{name: $source}})-[r:{}]->(:Entity {{name: $target}}) RETURN count(r) AS total",
            quoted_type(relationship)?
        );
        let result = self
            .run_one(
                Statement::new(cypher)
                    .param("source", relationship.source.as_str())
                    .param("target", relationship.target.as_str()),
            )
            .await?;
        Ok(result
            .column("total")
            .first()
            .and_then(|v| v.as_u64())
            .is_some_and(|n| n > 0))
    }

    async fn related_nodes(&self, relationship: &Relationship) -> McqResult<Vec<Node>> {
        let cypher = format!(
            "MATCH (n:Entity)-[:{}]->(:Entity {{name: $target}}) \
             RETURN DISTINCT n.name AS name, n.info AS info ORDER BY name",
            quoted_type(relationship)?
        );
        let result = self
            .run_one(Statement::new(cypher).param("target", relationship.target.as_str()))
            .await?;
        Ok(node_rows(&result))
    }

    async fn connected_nodes(&self, node: &Node) -> McqResult<Vec<Node>> {
        self.require_node(&node.name).await?;
        let result = self
            .run_one(
                Statement::new(
                    "MATCH (a:Entity {name: $name})--(n:Entity) WHERE n <> a \
                     RETURN DISTINCT n.name AS name, n.info AS info ORDER BY name",
                )
                .param("name", node.name.as_str()),
            )
            .await?;
        Ok(node_rows(&result))
    }

    async fn similarity_matrix(&self, node: &Node) -> McqResult<BTreeMap<String, f64>> {
        self.require_node(&node.name).await?;

        let neighbours = Statement::new(
            "MATCH (a:Entity {name: $name})--(n:Entity) WHERE n <> a \
             RETURN collect(DISTINCT n.name) AS neighbours",
        )
        .param("name", node.name.as_str());
        // variable-length bounds cannot be parameters
        let candidates = Statement::new(format!(
            "MATCH (a:Entity {{name: $name}})-[*1..{}]-(other:Entity) \
             WHERE other <> a AND NOT (a)--(other) \
             WITH DISTINCT other \
             OPTIONAL MATCH (other)--(n:Entity) WHERE n <> other \
             RETURN other.name AS name, collect(DISTINCT n.name) AS neighbours",
            self.similarity_radius
        ))
        .param("name", node.name.as_str());

        let results = self.run(vec![neighbours, candidates]).await?;
        let (Some(own), Some(others)) = (results.first(), results.get(1)) else {
            return Err(McqError::QueryError("missing similarity results".to_string()));
        };

        let source_neighbours = string_list(own.column("neighbours").first().copied());
        let matrix = jaccard_rows(&source_neighbours, others);
        debug!("Similarity for '{}': {} candidates", node.name, matrix.len());
        Ok(matrix)
    }

    async fn create_nodes(&self, nodes: Vec<Node>) -> McqResult<usize> {
        let mut seen = HashSet::new();
        let mut duplicates: BTreeSet<String> = nodes
            .iter()
            .filter(|n| !seen.insert(n.name.as_str()))
            .map(|n| n.name.clone())
            .collect();

        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        let existing = self
            .run_one(
                Statement::new("MATCH (n:Entity) WHERE n.name IN $names RETURN n.name AS name")
                    .param("names", json!(names)),
            )
            .await?;
        duplicates.extend(existing.column("name").into_iter().filter_map(as_string));
        if !duplicates.is_empty() {
            return Err(GraphError::DuplicateNodes {
                names: duplicates.into_iter().collect(),
            }
            .into());
        }

        let created = nodes.len();
        self.run_one(
            Statement::new(
                "UNWIND $nodes AS node CREATE (n:Entity {name: node.name}) SET n.info = node.info",
            )
            .param("nodes", serde_json::to_value(&nodes)?),
        )
        .await?;
        info!("Created {} nodes", created);
        Ok(created)
    }

    async fn create_relationships(&self, relationships: Vec<Relationship>) -> McqResult<usize> {
        let mut by_type: BTreeMap<String, Vec<&Relationship>> = BTreeMap::new();
        for relationship in &relationships {
            by_type
                .entry(quoted_type(relationship)?)
                .or_default()
                .push(relationship);
        }

        let endpoints: BTreeSet<&str> = relationships
            .iter()
            .flat_map(|r| [r.source.as_str(), r.target.as_str()])
            .collect();
        let found = self
            .run_one(
                Statement::new("MATCH (n:Entity) WHERE n.name IN $names RETURN n.name AS name")
                    .param("names", json!(endpoints)),
            )
            .await?;
        let found: HashSet<String> = found.column("name").into_iter().filter_map(as_string).collect();
        if let Some(missing) = endpoints.iter().find(|name| !found.contains(**name)) {
            return Err(GraphError::NodeNotFound(missing.to_string()).into());
        }

        let statements = by_type
            .into_iter()
            .map(|(rel_type, rels)| {
                Ok(Statement::new(format!(
                    "UNWIND $rels AS rel \
                     MATCH (s:Entity {{name: rel.source}}), (t:Entity {{name: rel.target}}) \
                     CREATE (s)-[:{}]->(t)",
                    rel_type
                ))
                .param("rels", serde_json::to_value(rels)?))
            })
            .collect::<McqResult<Vec<_>>>()?;
        if !statements.is_empty() {
            self.run(statements).await?;
        }
        info!("Created {} relationships", relationships.len());
        Ok(relationships.len())
    }

    async fn delete_all(&self) -> McqResult<()> {
        self.run_one(Statement::new("MATCH (n) DETACH DELETE n")).await?;
        info!("Cleared graph at {}", self.http_base_url);
        Ok(())
    }

    async fn stats(&self) -> McqResult<GraphStats> {
        let result = self
            .run_one(Statement::new(
                "MATCH (n:Entity) WITH count(n) AS nodes \
                 OPTIONAL MATCH (:Entity)-[r]->(:Entity) \
                 RETURN nodes, count(r) AS relationships",
            ))
            .await?;
        let count = |column: &str| {
            result
                .column(column)
                .first()
                .and_then(|v| v.as_u64())
                .unwrap_or(0)
        };
        Ok(GraphStats {
            nodes: count("nodes"),
            relationships: count("relationships"),
        })
    }
}
