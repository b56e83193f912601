//! Configuration for question generation and backend selection
//!
//! Loaded from YAML; every field has a default so partial files are fine.
//!
//! ```yaml
//! generator:
//!   distractor_count: 2
//!   fake_word_threshold: 0.6
//! backend:
//!   kind: memory
//!   concepts: ./concepts.yaml
//!   similarity:
//!     measure: jaccard
//!     radius: 5
//! ```

use crate::algo::SimRankConfig;
use crate::error::{McqError, McqResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McqConfig {
    pub generator: GeneratorConfig,
    pub backend: BackendConfig,
}

impl McqConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> McqResult<Self> {
        let config: McqConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> McqResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> McqResult<()> {
        self.generator.validate()?;
        if let BackendConfig::Memory { similarity, .. } = &self.backend {
            similarity.validate()?;
        }
        if let BackendConfig::Remote { url, radius, .. } = &self.backend {
            if url.trim().is_empty() {
                return Err(McqError::ConfigError("remote backend needs a url".to_string()));
            }
            if *radius == 0 {
                return Err(McqError::ConfigError("similarity radius must be at least 1".to_string()));
            }
        }
        Ok(())
    }
}

/// Knobs for [`McqGenerator`](crate::engine::McqGenerator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// How many distractors to sample per question
    pub distractor_count: usize,
    /// How many blended fake words to try for per question
    pub fake_word_limit: usize,
    /// Minimum similarity (exclusive) a blend needs against some real word
    pub fake_word_threshold: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            distractor_count: 2,
            fake_word_limit: 1,
            fake_word_threshold: 0.6,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> McqResult<()> {
        if !(0.0..=1.0).contains(&self.fake_word_threshold) {
            return Err(McqError::ConfigError(format!(
                "fake_word_threshold must be within [0, 1], got {}",
                self.fake_word_threshold
            )));
        }
        Ok(())
    }
}

/// Which graph backend to talk to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// In-process graph, optionally seeded from a concept file
    Memory {
        #[serde(default)]
        concepts: Option<PathBuf>,
        #[serde(default)]
        similarity: SimilarityMeasure,
    },
    /// Neo4j reached over its HTTP API
    Remote {
        url: String,
        #[serde(default = "default_database")]
        database: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
        /// Hops scanned around the source node when scoring similarity
        #[serde(default = "default_radius")]
        radius: usize,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Memory {
            concepts: None,
            similarity: SimilarityMeasure::default(),
        }
    }
}

fn default_database() -> String {
    "neo4j".to_string()
}

/// Structural similarity used to rank distractors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "measure", rename_all = "snake_case")]
pub enum SimilarityMeasure {
    /// Jaccard coefficient of neighbour sets within an undirected ego network
    Jaccard {
        #[serde(default = "default_radius")]
        radius: usize,
    },
    /// SimRank, restricted to nodes within `radius` hops
    SimRank {
        #[serde(default = "default_radius")]
        radius: usize,
        #[serde(default = "default_importance")]
        importance: f64,
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
    },
}

impl Default for SimilarityMeasure {
    fn default() -> Self {
        SimilarityMeasure::Jaccard {
            radius: default_radius(),
        }
    }
}

fn default_radius() -> usize {
    5
}

fn default_importance() -> f64 {
    SimRankConfig::default().importance
}

fn default_max_iterations() -> usize {
    SimRankConfig::default().max_iterations
}

fn default_tolerance() -> f64 {
    SimRankConfig::default().tolerance
}

impl SimilarityMeasure {
    /// Neighbourhood radius scored around the source node
    pub fn radius(&self) -> usize {
        match self {
            SimilarityMeasure::Jaccard { radius } => *radius,
            SimilarityMeasure::SimRank { radius, .. } => *radius,
        }
    }

    pub fn validate(&self) -> McqResult<()> {
        if self.radius() == 0 {
            return Err(McqError::ConfigError("similarity radius must be at least 1".to_string()));
        }
        if let SimilarityMeasure::SimRank { importance, .. } = self {
            if !(*importance > 0.0 && *importance < 1.0) {
                return Err(McqError::ConfigError(format!(
                    "SimRank importance must be within (0, 1), got {}",
                    importance
                )));
            }
        }
        Ok(())
    }
}
