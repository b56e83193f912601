use mcqgraph::engine::{is_valid_blend, similarity_score, FakeWordRequest, FakeWordSynthesizer, WordSplitter};
use std::collections::HashSet;

const POOL: [&str; 3] = ["Hello", "Goodbye", "Greetings"];

fn splitter() -> WordSplitter {
    WordSplitter::english().unwrap()
}

#[test]
fn test_blends_are_prefix_plus_foreign_suffix() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);
    let harvested: HashSet<String> = POOL
        .iter()
        .flat_map(|w| splitter.split(w))
        .map(|p| p.suffix)
        .filter(|s| !s.is_empty())
        .collect();

    for seed in 0..20 {
        let request = FakeWordRequest::new(POOL).limit(3).threshold(0.0).seed(Some(seed));
        for (base, fake) in synthesizer.generate_pairs(&request) {
            assert!(!POOL.contains(&fake.as_str()), "{} is a real word", fake);

            // some prefix of the base word followed by a suffix harvested from another word
            let own = splitter.split(&base);
            let own_suffixes: HashSet<&str> = own.iter().map(|p| p.suffix.as_str()).collect();
            let explained = own.iter().any(|pair| {
                fake.strip_prefix(pair.prefix.as_str()).is_some_and(|suffix| {
                    harvested.contains(suffix)
                        && !own_suffixes.contains(suffix)
                        && is_valid_blend(&pair.prefix, suffix)
                })
            });
            assert!(explained, "{} is not a blend of {}", fake, base);
        }
    }
}

#[test]
fn test_same_seed_same_output() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);
    let request = FakeWordRequest::new(POOL).limit(3).threshold(0.0).seed(Some(2));

    let first = synthesizer.generate(&request);
    for _ in 0..5 {
        assert_eq!(synthesizer.generate(&request), first);
    }

    // a fresh splitter gives the same result too
    let other = splitter_and_generate(&request);
    assert_eq!(other, first);
}

fn splitter_and_generate(request: &FakeWordRequest) -> Vec<String> {
    let splitter = splitter();
    FakeWordSynthesizer::new(&splitter).generate(request)
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(b, f)| (b.to_string(), f.to_string())).collect()
}

#[test]
fn test_seeded_blends_are_pinned() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);
    let request = |seed| FakeWordRequest::new(POOL).limit(3).threshold(0.0).seed(Some(seed));

    assert_eq!(
        synthesizer.generate_pairs(&request(2)),
        pairs(&[("Greetings", "Greelo"), ("Goodbye", "Goodlo"), ("Hello", "Helings")])
    );
    assert_eq!(
        synthesizer.generate_pairs(&request(0)),
        pairs(&[("Hello", "Heltings"), ("Goodbye", "Goodings"), ("Greetings", "Greetlo")])
    );
    assert_eq!(
        synthesizer.generate(&request(1)),
        vec!["Goodlo", "Greetlo", "Helings"]
    );
}

#[test]
fn test_seeded_blend_above_threshold_is_pinned() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);
    let request = FakeWordRequest::new(POOL).limit(1).threshold(0.6).seed(Some(2));
    assert_eq!(synthesizer.generate_pairs(&request), pairs(&[("Hello", "Heltings")]));
}

#[test]
fn test_mapping_keys_are_distinct_pool_words() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);
    let request = FakeWordRequest::new(POOL).limit(3).threshold(0.0).seed(Some(11));

    let pairs = synthesizer.generate_pairs(&request);
    let keys: HashSet<&str> = pairs.iter().map(|(base, _)| base.as_str()).collect();
    assert_eq!(keys.len(), pairs.len());
    assert!(keys.iter().all(|k| POOL.contains(k)));
    assert_eq!(
        synthesizer.generate(&request),
        pairs.into_iter().map(|(_, fake)| fake).collect::<Vec<_>>()
    );
}

#[test]
fn test_threshold_is_respected() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);
    let pool = ["Serotonin", "Dopamine", "Epinephrine", "Norepinephrine", "Acetylcholine"];

    for seed in 0..10 {
        let request = FakeWordRequest::new(pool).limit(5).threshold(0.6).seed(Some(seed));
        for fake in synthesizer.generate(&request) {
            let best = pool
                .iter()
                .map(|w| similarity_score(&fake, w))
                .fold(0.0_f64, f64::max);
            assert!(best > 0.6, "{} scored {}", fake, best);
        }
    }
}

#[test]
fn test_limit_bounds_output() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);

    for limit in 0..5 {
        let request = FakeWordRequest::new(POOL).limit(limit).threshold(0.0).seed(Some(3));
        assert!(synthesizer.generate(&request).len() <= limit.min(POOL.len()));
    }
}

#[test]
fn test_everything_excluded() {
    let splitter = splitter();
    let synthesizer = FakeWordSynthesizer::new(&splitter);
    let request = FakeWordRequest::new(POOL)
        .excluding(POOL)
        .limit(3)
        .threshold(0.0)
        .seed(Some(1));
    assert!(synthesizer.generate(&request).is_empty());
}
