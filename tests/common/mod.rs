//! Shared test utilities and fixtures.

#![allow(dead_code)]

use proptest::prelude::*;
use tally::{BitStorage, Corpus, Index, IndexedLookup, LinearScanOracle};

// Re-export canonical test utilities from tally::testing
pub use tally::testing::{corpus_of, reference_count, repeated, synthetic_corpus};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Terms from a tiny alphabet so corpora repeat terms often.
pub fn term_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,2}").unwrap()
}

/// Query terms: mostly in-alphabet, sometimes absent, sometimes odd.
pub fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => term_strategy(),
        1 => prop::string::string_regex("[e-z]{1,4}").unwrap(),
        1 => Just(String::new()),
        1 => Just("a ".to_string()),
    ]
}

/// Corpora from empty up past two 64-bit words.
pub fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(term_strategy(), 0..200)
}

/// Universe plus a set of positions inside it.
pub fn positions_strategy() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0usize..300).prop_flat_map(|universe| {
        let positions = if universe == 0 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec(0..universe, 0..64).boxed()
        };
        (Just(universe), positions)
    })
}

// ============================================================================
// ENGINES
// ============================================================================

/// Both engines over the same corpus.
pub fn engines(terms: Vec<String>) -> (IndexedLookup, LinearScanOracle) {
    let corpus = Corpus::from_terms(terms);
    (
        IndexedLookup::build(corpus.clone()),
        LinearScanOracle::new(corpus),
    )
}

/// Panic with the first broken invariant, if any.
pub fn assert_index_well_formed<B: BitStorage>(index: &Index<B>) {
    if let Err(err) = tally::verify_index(index) {
        panic!("index not well formed: {}", err);
    }
}
