use proptest::prelude::*;
use rand::RngCore;
use rs_markov_core::{trim_to_sentence, Chain, Generator};

/// Always yields zero, so every suffix pick lands on index 0.
struct FirstChoice;

impl RngCore for FirstChoice {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

const CAT: &str = "the cat sat on the mat the cat ran";

#[test]
fn cat_scenario_keys_and_first_choice_walk() {
    let mut chain = Chain::new(2).unwrap();
    chain.train_str(CAT);

    let suffixes = chain.suffixes("the cat");
    assert!(suffixes.iter().any(|w| w == "sat"));
    assert!(suffixes.iter().any(|w| w == "ran"));

    // Index 0 is always "sat", so the walk loops over the first sentence.
    let mut generator = Generator::with_rng(&chain, FirstChoice);
    assert_eq!(
        generator.generate_words(12),
        vec!["the", "cat", "sat", "on", "the", "mat", "the", "cat", "sat", "on", "the", "mat"]
    );
}

#[test]
fn short_unique_input_ends_early() {
    let mut chain = Chain::new(2).unwrap();
    chain.train_str("alpha beta gamma delta epsilon");
    for seed in 0..10 {
        let words = Generator::with_seed(&chain, seed).generate_words(1000);
        assert_eq!(words.len(), 5);
    }
}

#[test]
fn training_from_reader_matches_training_from_str() {
    let mut from_reader = Chain::new(3).unwrap();
    from_reader.train(std::io::Cursor::new(CAT.as_bytes().to_vec()));
    let mut from_str = Chain::new(3).unwrap();
    from_str.train_str(CAT);
    assert_eq!(from_reader, from_str);
}

#[test]
fn generated_words_are_trained_words() {
    let text = "a quick brown fox jumps over a lazy dog and a quick cat";
    let mut chain = Chain::new(1).unwrap();
    chain.train_str(text);
    let vocabulary: Vec<&str> = text.split_whitespace().collect();
    let words = Generator::with_seed(&chain, 11).generate_words(200);
    assert!(!words.is_empty());
    assert!(words.iter().all(|w| vocabulary.contains(w)));
}

proptest! {
    #[test]
    fn trim_is_idempotent(s in "[a-z .]{0,80}") {
        prop_assume!(s.contains('.'));
        let once = trim_to_sentence(&s);
        prop_assert_eq!(trim_to_sentence(&once), once);
    }

    #[test]
    fn trim_ends_on_period_or_is_empty(s in ".{0,80}") {
        let trimmed = trim_to_sentence(&s);
        prop_assert!(trimmed.is_empty() || trimmed.ends_with('.'));
        prop_assert!(s.starts_with(&trimmed));
    }

    #[test]
    fn generation_never_exceeds_max_words(max_words in 0usize..60, seed in any::<u64>()) {
        let mut chain = Chain::new(2).unwrap();
        chain.train_str("one fish two fish red fish blue fish one fish two fish");
        let words = Generator::with_seed(&chain, seed).generate_words(max_words);
        prop_assert!(words.len() <= max_words);
    }
}
