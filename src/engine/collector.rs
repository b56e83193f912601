//! Candidate collection for one chosen relationship

use std::collections::BTreeSet;
use tracing::debug;

use crate::backend::GraphBackend;
use crate::error::McqResult;
use crate::graph::{GraphError, Relationship};

/// Names gathered around a chosen relationship.
///
/// `distractors` never contains a name from `answers` or `exclusions`, nor
/// either end of the relationship.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    /// Every source sharing the relationship's type and target
    pub answers: BTreeSet<String>,
    /// Everything adjacent to the relationship's source
    pub exclusions: BTreeSet<String>,
    /// Structurally similar names, most similar first, ties by name
    pub distractors: Vec<String>,
}

pub struct CandidateCollector<'a> {
    backend: &'a dyn GraphBackend,
}

impl<'a> CandidateCollector<'a> {
    pub fn new(backend: &'a dyn GraphBackend) -> Self {
        Self { backend }
    }

    pub async fn collect(&self, relationship: &Relationship) -> McqResult<CandidatePool> {
        let mut answers: BTreeSet<String> = self
            .backend
            .related_nodes(relationship)
            .await?
            .into_iter()
            .map(|node| node.name)
            .collect();
        answers.insert(relationship.source.clone());

        let source = self
            .backend
            .get_node(&relationship.source)
            .await?
            .ok_or_else(|| GraphError::NodeNotFound(relationship.source.clone()))?;

        let exclusions: BTreeSet<String> = self
            .backend
            .connected_nodes(&source)
            .await?
            .into_iter()
            .map(|node| node.name)
            .collect();

        let mut ranked: Vec<(String, f64)> = self
            .backend
            .similarity_matrix(&source)
            .await?
            .into_iter()
            .filter(|(name, score)| {
                score.is_finite()
                    && !answers.contains(name)
                    && !exclusions.contains(name)
                    && *name != relationship.source
                    && *name != relationship.target
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        debug!(
            "Collected {} answers, {} exclusions, {} distractors for {}",
            answers.len(),
            exclusions.len(),
            ranked.len(),
            relationship
        );

        Ok(CandidatePool {
            answers,
            exclusions,
            distractors: ranked.into_iter().map(|(name, _)| name).collect(),
        })
    }
}
