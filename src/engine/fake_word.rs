//! Fake word synthesis
//!
//! A fake word is the prefix of one real word glued to a suffix harvested from
//! another, kept only if it still looks like some real word of the pool.
//! The search is lazy: candidates are built and scored one at a time and the
//! first acceptable blend wins.

use indexmap::IndexSet;
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use super::seeded_rng;
use super::similarity::similarity_score;
use super::splitter::{is_vowel, WordSplitter};

/// Parameters of one synthesis run
#[derive(Debug, Clone, PartialEq)]
pub struct FakeWordRequest {
    /// Real words: the source of prefixes, suffixes and the similarity check
    pub pool: Vec<String>,
    /// Words never used as a base
    pub excluded: BTreeSet<String>,
    /// Upper bound on the number of fake words
    pub limit: usize,
    /// A blend must score strictly above this against some pool word
    pub threshold: f64,
    pub seed: Option<u64>,
}

impl FakeWordRequest {
    pub fn new<I, S>(pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pool: pool.into_iter().map(Into::into).collect(),
            excluded: BTreeSet::new(),
            limit: 1,
            threshold: 0.6,
            seed: None,
        }
    }

    pub fn excluding<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Whether `prefix + suffix` has a pronounceable seam.
///
/// Accepts a vowel/consonant alternation across the cut, or two consonants
/// when the suffix continues with a vowel.
pub fn is_valid_blend(prefix: &str, suffix: &str) -> bool {
    let (Some(last), Some(first)) = (prefix.chars().last(), suffix.chars().next()) else {
        return false;
    };

    if is_vowel(last) != is_vowel(first) {
        return true;
    }

    !is_vowel(last)
        && !is_vowel(first)
        && suffix.chars().nth(1).is_some_and(is_vowel)
}

/// Searches blended words; borrows a shared splitter, holds no other state.
pub struct FakeWordSynthesizer<'a> {
    splitter: &'a WordSplitter,
}

impl<'a> FakeWordSynthesizer<'a> {
    pub fn new(splitter: &'a WordSplitter) -> Self {
        Self { splitter }
    }

    /// Fake words, in the order their base words were drawn
    pub fn generate(&self, request: &FakeWordRequest) -> Vec<String> {
        self.generate_pairs(request)
            .into_iter()
            .map(|(_, fake)| fake)
            .collect()
    }

    /// `(base word, fake word)` pairs; base words without a match are left out
    pub fn generate_pairs(&self, request: &FakeWordRequest) -> Vec<(String, String)> {
        let mut rng = seeded_rng(request.seed);
        self.search(request, &mut rng)
    }

    fn search(&self, request: &FakeWordRequest, rng: &mut StdRng) -> Vec<(String, String)> {
        let pool: IndexSet<&str> = request.pool.iter().map(String::as_str).collect();

        // second parts shared by every base word
        let mut corpus: Vec<String> = pool
            .iter()
            .flat_map(|word| self.splitter.split(word))
            .map(|pair| pair.suffix)
            .filter(|suffix| !suffix.is_empty())
            .collect::<IndexSet<String>>()
            .into_iter()
            .collect();

        let bases: Vec<&str> = pool
            .iter()
            .copied()
            .filter(|word| !request.excluded.contains(*word))
            .collect();
        let picks = index::sample(rng, bases.len(), request.limit.min(bases.len()));

        let mut search_pool: Vec<&str> = pool.iter().copied().collect();
        let mut found = Vec::new();

        for pick in picks.into_iter() {
            let base = bases[pick];
            corpus.shuffle(rng);

            let pairs = self.splitter.split(base);
            let Some(prefix) = pairs.choose(rng).map(|pair| pair.prefix.as_str()) else {
                continue;
            };
            let exceptions: HashSet<&str> = pairs.iter().map(|pair| pair.suffix.as_str()).collect();

            let mut blends = corpus
                .iter()
                .filter(|suffix| !exceptions.contains(suffix.as_str()))
                .filter(|suffix| is_valid_blend(prefix, suffix))
                .map(|suffix| format!("{}{}", prefix, suffix))
                .filter(|blend| !pool.contains(blend.as_str()));

            search_pool.shuffle(rng);
            let matched = blends.find(|blend| {
                search_pool
                    .iter()
                    .any(|word| similarity_score(blend, word) > request.threshold)
            });

            match matched {
                Some(fake) => {
                    debug!("Blended '{}' into '{}'", base, fake);
                    found.push((base.to_string(), fake));
                }
                None => debug!("No blend of '{}' above {}", base, request.threshold),
            }
        }

        found
    }
}
