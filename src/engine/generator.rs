//! Question assembly
//!
//! `PickEdge -> CollectCandidates -> SampleDistractors -> SynthesizeFake ->
//! AssembleChoices`. Any failure aborts the call; a missing fake word does not.

use indexmap::IndexSet;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::collector::CandidateCollector;
use super::fake_word::{FakeWordRequest, FakeWordSynthesizer};
use super::seeded_rng;
use super::splitter::WordSplitter;
use crate::backend::GraphBackend;
use crate::config::GeneratorConfig;
use crate::error::McqResult;

/// A finished multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    /// The correct choice
    pub answer: String,
    /// What the question is about
    pub topic: String,
    /// Shuffled choices, `answer` among them, no duplicates
    pub choices: Vec<String>,
}

/// Builds questions from a graph backend
pub struct McqGenerator {
    backend: Arc<dyn GraphBackend>,
    splitter: Arc<WordSplitter>,
    config: GeneratorConfig,
}

impl McqGenerator {
    /// Generator with the English hyphenation dictionaries and default settings
    pub fn new(backend: Arc<dyn GraphBackend>) -> McqResult<Self> {
        Ok(Self::with_splitter(backend, Arc::new(WordSplitter::english()?)))
    }

    /// Generator sharing an already loaded splitter
    pub fn with_splitter(backend: Arc<dyn GraphBackend>, splitter: Arc<WordSplitter>) -> Self {
        Self {
            backend,
            splitter,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn backend(&self) -> &Arc<dyn GraphBackend> {
        &self.backend
    }

    /// Build one question. The same seed over the same graph gives the same question.
    pub async fn generate(&self, seed: Option<u64>) -> McqResult<Mcq> {
        let relationship = self.backend.random_relationship(seed).await?;
        debug!("Generating question from {}", relationship);

        let pool = CandidateCollector::new(self.backend.as_ref())
            .collect(&relationship)
            .await?;

        let answer = relationship.target;
        let topic = relationship.source;

        let mut rng = seeded_rng(seed);
        let sampled: Vec<String> = pool
            .distractors
            .choose_multiple(&mut rng, self.config.distractor_count)
            .cloned()
            .collect();

        let request = FakeWordRequest::new(pool.answers.iter().chain(&pool.distractors).cloned())
            .excluding(std::iter::once(answer.clone()).chain(sampled.iter().cloned()))
            .limit(self.config.fake_word_limit)
            .threshold(self.config.fake_word_threshold)
            .seed(seed);
        let fakes = FakeWordSynthesizer::new(&self.splitter).generate(&request);
        if fakes.len() < self.config.fake_word_limit {
            debug!(
                "Found {} of {} fake words for '{}'",
                fakes.len(),
                self.config.fake_word_limit,
                answer
            );
        }

        let mut choices: Vec<String> = std::iter::once(answer.clone())
            .chain(sampled)
            .chain(fakes)
            .collect::<IndexSet<String>>()
            .into_iter()
            .collect();
        choices.shuffle(&mut rng);

        let mcq = Mcq {
            answer,
            topic,
            choices,
        };
        debug!("Generated {:?}", mcq);
        Ok(mcq)
    }
}
