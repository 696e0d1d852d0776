//! Test utilities shared across unit tests, integration tests, and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::corpus::Corpus;

/// Small vocabulary for synthetic corpora. Skewed on purpose: the first few
/// words get picked far more often, like real text.
pub const VOCABULARY: &[&str] = &[
    "the", "of", "and", "to", "in", "index", "bit", "vector", "word", "term", "query", "corpus",
    "count", "scan", "oracle", "builder", "capture", "universe", "popcount", "position",
    "partition", "lookup", "hash", "packed", "frozen", "reader", "writer", "linear", "exact",
    "match",
];

/// Corpus from string literals.
pub fn corpus_of(terms: &[&str]) -> Corpus {
    terms.iter().copied().collect()
}

/// `n` copies of one term.
pub fn repeated(term: &str, n: usize) -> Corpus {
    Corpus::from_terms(vec![term.to_string(); n])
}

/// Deterministic corpus of `len` terms drawn from [`VOCABULARY`].
///
/// Index `i` maps to a vocabulary slot through a fixed multiplicative hash,
/// squared to skew toward the front. Same `(len, seed)`, same corpus.
pub fn synthetic_corpus(len: usize, seed: u64) -> Corpus {
    Corpus::from_terms(
        (0..len)
            .map(|i| VOCABULARY[skewed_slot(i as u64, seed, VOCABULARY.len())].to_string())
            .collect(),
    )
}

/// Query terms: the whole vocabulary plus `misses` terms that never occur.
pub fn synthetic_queries(misses: usize) -> Vec<String> {
    VOCABULARY
        .iter()
        .map(|w| w.to_string())
        .chain((0..misses).map(|i| format!("absent{}", i)))
        .collect()
}

fn skewed_slot(i: u64, seed: u64, slots: usize) -> usize {
    let h = (i ^ seed)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .rotate_left(29);
    // Uniform in [0, 1), squared, scaled: low slots are denser.
    let unit = (h >> 11) as f64 / (1u64 << 53) as f64;
    ((unit * unit) * slots as f64) as usize % slots
}

/// Reference count: how many entries equal `term`. The obviously-correct version.
pub fn reference_count<S: AsRef<str>>(corpus: &[S], term: &str) -> usize {
    corpus.iter().filter(|t| t.as_ref() == term).count()
}
