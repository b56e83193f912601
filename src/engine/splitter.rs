//! Word segmentation at hyphenation points
//!
//! Break positions come from Liang hyphenation patterns (the TeX pattern
//! sets). The first dictionary that yields any break wins; the rest are
//! fallbacks.

use hyphenation::{Hyphenator, Language, Load, Standard};
use std::fmt;

use crate::error::{McqError, McqResult};

/// Fewest characters kept on either side of a break
const MINIMA: (usize, usize) = (2, 2);

/// Lowercase vowels; uppercase letters count as consonants
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// One way of cutting a word in two
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordPair {
    pub prefix: String,
    pub suffix: String,
}

impl WordPair {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// The same cut moved one character earlier, when the prefix ends in a
    /// consonant and the suffix starts with a vowel (`Greet|ings` -> `Gree|tings`).
    pub fn shifted(&self) -> Option<WordPair> {
        let last = self.prefix.chars().last()?;
        let first = self.suffix.chars().next()?;
        if is_vowel(last) || !is_vowel(first) {
            return None;
        }

        let cut = self.prefix.len() - last.len_utf8();
        if cut == 0 {
            return None;
        }
        Some(WordPair {
            prefix: self.prefix[..cut].to_string(),
            suffix: format!("{}{}", last, self.suffix),
        })
    }
}

impl fmt::Display for WordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.suffix)
    }
}

/// Splits words into `(prefix, suffix)` pairs.
///
/// Loading the embedded dictionaries is the expensive part; build one
/// splitter and share it.
pub struct WordSplitter {
    dictionaries: Vec<Standard>,
}

impl WordSplitter {
    /// en-US patterns, falling back to en-GB
    pub fn english() -> McqResult<Self> {
        let dictionaries = [Language::EnglishUS, Language::EnglishGB]
            .into_iter()
            .map(load)
            .collect::<McqResult<Vec<_>>>()?;
        Ok(Self { dictionaries })
    }

    /// Use the given dictionaries, in priority order
    pub fn with_dictionaries(dictionaries: Vec<Standard>) -> Self {
        Self { dictionaries }
    }

    /// Every pair for `word`, longest prefix first, then the shifted pairs in the same order.
    ///
    /// A word without any break point yields the single pair `(word, "")`.
    pub fn split(&self, word: &str) -> Vec<WordPair> {
        let mut pairs: Vec<WordPair> = self
            .breaks(word)
            .into_iter()
            .rev()
            .map(|at| WordPair::new(&word[..at], &word[at..]))
            .collect();

        let shifted: Vec<WordPair> = pairs.iter().filter_map(WordPair::shifted).collect();
        pairs.extend(shifted);

        if pairs.is_empty() {
            pairs.push(WordPair::new(word, ""));
        }
        pairs
    }

    /// Byte offsets of the break points of `word`, ascending
    fn breaks(&self, word: &str) -> Vec<usize> {
        if word.is_empty() {
            return Vec::new();
        }
        // patterns are lowercase; only look up the lowered form when offsets still line up
        let lowered = word.to_lowercase();
        let key = if lowered.len() == word.len() {
            lowered.as_str()
        } else {
            word
        };

        for dictionary in &self.dictionaries {
            let breaks: Vec<usize> = dictionary
                .hyphenate(key)
                .breaks
                .into_iter()
                .filter(|&at| at > 0 && at < word.len() && word.is_char_boundary(at))
                .collect();
            if !breaks.is_empty() {
                return breaks;
            }
        }
        Vec::new()
    }
}

/// Load an embedded dictionary with two-character minima on both sides
pub fn load(lang: Language) -> McqResult<Standard> {
    let mut dictionary = Standard::from_embedded(lang)
        .map_err(|e| McqError::DictionaryError(format!("{:?}: {}", lang, e)))?;
    dictionary.minima = MINIMA;
    Ok(dictionary)
}

impl fmt::Debug for WordSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordSplitter")
            .field("dictionaries", &self.dictionaries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> WordSplitter {
        WordSplitter::english().unwrap()
    }

    #[test]
    fn test_shifted_pair() {
        let pair = WordPair::new("Greet", "ings");
        assert_eq!(pair.shifted(), Some(WordPair::new("Gree", "tings")));

        // vowel before the cut, consonant after, or a one-letter prefix: no shift
        assert_eq!(WordPair::new("Dopa", "mine").shifted(), None);
        assert_eq!(WordPair::new("Hel", "lo").shifted(), None);
        assert_eq!(WordPair::new("G", "aba").shifted(), None);
        assert_eq!(WordPair::new("Hello", "").shifted(), None);
    }

    #[test]
    fn test_pairs_rebuild_the_word() {
        let splitter = splitter();
        for word in ["Greetings", "Dopamine", "Acetylcholine", "Norepinephrine"] {
            let pairs = splitter.split(word);
            assert!(!pairs.is_empty());
            let fallback = pairs == vec![WordPair::new(word, "")];
            for pair in &pairs {
                assert_eq!(format!("{}{}", pair.prefix, pair.suffix), word);
                assert!(!pair.prefix.is_empty());
                assert!(fallback || !pair.suffix.is_empty(), "{} split into {}", word, pair);
            }
        }
    }

    #[test]
    fn test_every_shiftable_pair_has_its_shift() {
        let splitter = splitter();
        for word in ["Acetylcholine", "Greetings", "Epinephrine"] {
            let pairs = splitter.split(word);
            for shifted in pairs.iter().filter_map(WordPair::shifted) {
                assert!(pairs.contains(&shifted), "{} missing {}", word, shifted);
            }
        }
    }

    #[test]
    fn test_longest_prefix_first() {
        let splitter = splitter();
        let pairs = splitter.split("Norepinephrine");
        let longest = pairs.iter().map(|p| p.prefix.len()).max().unwrap_or(0);
        assert_eq!(pairs[0].prefix.len(), longest);
    }

    #[test]
    fn test_unsplittable_word_falls_back() {
        let splitter = splitter();
        assert_eq!(splitter.split("ATP"), vec![WordPair::new("ATP", "")]);
        assert_eq!(splitter.split(""), vec![WordPair::new("", "")]);
    }

    #[test]
    fn test_two_letters_either_side() {
        let splitter = splitter();
        assert_eq!(splitter.split("Hello"), vec![WordPair::new("Hel", "lo")]);
        assert_eq!(splitter.split("GABA"), vec![WordPair::new("GA", "BA")]);
        assert_eq!(splitter.split("Goodbye"), vec![WordPair::new("Good", "bye")]);
        assert_eq!(
            splitter.split("Greetings"),
            vec![WordPair::new("Greet", "ings"), WordPair::new("Gree", "tings")]
        );
    }

    #[test]
    fn test_both_locales_load() {
        for lang in [Language::EnglishUS, Language::EnglishGB] {
            let dictionary = load(lang).unwrap();
            assert_eq!(dictionary.language(), lang);
            assert_eq!(dictionary.minima, MINIMA);
        }
    }

    #[test]
    fn test_british_patterns_are_the_fallback() {
        let us_only = WordSplitter::with_dictionaries(vec![load(Language::EnglishUS).unwrap()]);
        assert_eq!(us_only.split("colour"), vec![WordPair::new("colour", "")]);

        assert_eq!(
            splitter().split("colour"),
            vec![WordPair::new("col", "our"), WordPair::new("co", "lour")]
        );
    }

    #[test]
    fn test_split_is_deterministic() {
        let splitter = splitter();
        assert_eq!(splitter.split("Greetings"), splitter.split("Greetings"));
        assert_eq!(splitter.split("Phenylalanine"), splitter.split("Phenylalanine"));
    }

    #[test]
    fn test_no_dictionaries_means_no_breaks() {
        let splitter = WordSplitter::with_dictionaries(Vec::new());
        assert_eq!(splitter.split("Greetings"), vec![WordPair::new("Greetings", "")]);
    }
}
