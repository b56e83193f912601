//! String similarity based on Levenshtein edit distance

/// Single-character insert/delete/substitute distance, counted in chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, &ac) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// `1 - distance / max_len`, case-insensitive, in `[0, 1]`.
///
/// Two empty strings are identical and score 1.0.
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a.to_lowercase(), &b.to_lowercase());
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("héllo", "hello"), 1);
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity_score("Glycine", "Glycine"), 1.0);
        assert_eq!(similarity_score("GABA", "gaba"), 1.0);
        assert_eq!(similarity_score("", ""), 1.0);
        assert_eq!(similarity_score("abc", "xyz"), 0.0);
        assert_eq!(similarity_score("abc", ""), 0.0);

        let s = similarity_score("Helings", "Hello");
        assert!((s - (1.0 - 4.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        for (a, b) in [("Greetlo", "Greetings"), ("Dopamine", "Dopa"), ("x", "xyzzy")] {
            assert_eq!(similarity_score(a, b), similarity_score(b, a));
        }
    }
}
