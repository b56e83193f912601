//! Question generation engine
//!
//! Leaves first:
//! - `similarity`: normalised edit-distance score between two strings
//! - `splitter`: hyphenation-based `(prefix, suffix)` segmentation
//! - `fake_word`: seeded lazy search for plausible blended words
//! - `collector`: answers / exclusions / distractors for a chosen edge
//! - `generator`: orchestrates the above into an [`Mcq`]
//!
//! Every call owns its random source; nothing is shared between calls
//! except the loaded hyphenation dictionaries.

pub mod collector;
pub mod fake_word;
pub mod generator;
pub mod similarity;
pub mod splitter;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use collector::{CandidateCollector, CandidatePool};
pub use fake_word::{is_valid_blend, FakeWordRequest, FakeWordSynthesizer};
pub use generator::{Mcq, McqGenerator};
pub use similarity::{levenshtein, similarity_score};
pub use splitter::{WordPair, WordSplitter};

/// Random source for one call: reproducible with a seed, entropy-seeded without
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
