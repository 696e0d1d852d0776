//! Query engines: the precomputed index and the linear-scan oracle.
//!
//! Both answer the same question, "how many positions hold exactly this
//! term?", through the [`Lookup`] trait. That shared shape is what lets the
//! harness time them side by side and diff their answers term by term.
//!
//! | Engine              | Build cost          | `matches` cost        |
//! |---------------------|---------------------|-----------------------|
//! | `IndexedLookup`     | O(N) once           | O(1) hash + O(N/64)   |
//! | `LinearScanOracle`  | none                | O(N) string compares  |
//!
//! The popcount sweep in `IndexedLookup::matches` is O(N/64) words, not O(1)
//! strictly; in practice it's a few hundred nanoseconds per million positions
//! against milliseconds for the scan.
//!
//! # Equivalence
//!
//! For every corpus `C` and term `t`:
//! `IndexedLookup::new(C, build(C)).matches(t) == LinearScanOracle::new(C).matches(t)`.
//! `tests/property/oracle_differential.rs` hammers this with random corpora.

use crate::bits::{BitStorage, BitVector};
use crate::corpus::Corpus;
use crate::index::{Builder, Index};
use crate::verify::contracts;

/// A read-only occurrence-count query surface.
///
/// `Sync` is required: engines are shared across reader threads once built.
pub trait Lookup: Send + Sync {
    /// Display name for reports.
    fn name(&self) -> &str;

    /// Number of corpus positions holding exactly `term`. Zero if absent.
    fn matches(&self, term: &str) -> usize;
}

/// Occurrence counts answered from a precomputed [`Index`].
#[derive(Debug, Clone)]
pub struct IndexedLookup<B: BitStorage = BitVector> {
    corpus: Corpus,
    index: Index<B>,
    name: String,
}

impl<B: BitStorage> IndexedLookup<B> {
    /// Pair a corpus with the index built from it.
    ///
    /// The caller guarantees the pairing. Debug builds check the lengths agree;
    /// nothing checks the terms (see `verify::verify_against_corpus` for that).
    pub fn new(corpus: Corpus, index: Index<B>) -> Self {
        contracts::check_lookup_pairing(corpus.len(), index.universe());
        Self {
            corpus,
            index,
            name: format!("IndexedLookup<{}>", B::name()),
        }
    }

    /// Build the index for `corpus` and wrap both.
    pub fn build(corpus: Corpus) -> Self {
        let index = Builder::build(&corpus);
        Self::new(corpus, index)
    }

    /// Occurrence count for `term`.
    #[inline]
    pub fn matches(&self, term: &str) -> usize {
        self.index.count(term)
    }

    /// Corpus positions holding `term`, ascending.
    pub fn positions(&self, term: &str) -> Vec<usize> {
        self.index
            .get(term)
            .map(BitStorage::positions)
            .unwrap_or_default()
    }

    /// Positions holding any of `terms` (union of their sets).
    ///
    /// Repeated terms count once. Absent terms contribute nothing.
    pub fn matches_any<'t>(&self, terms: impl IntoIterator<Item = &'t str>) -> usize {
        let mut union: Option<B> = None;
        for bits in terms.into_iter().filter_map(|t| self.index.get(t)) {
            union = Some(match union {
                Some(acc) => acc.or(bits),
                None => bits.clone(),
            });
        }
        union.map_or(0, |u| u.count())
    }

    /// Positions holding `term` but not `excluded`.
    ///
    /// With exact-term keys the two sets only intersect when the terms are
    /// equal, so this is `matches(term)` unless `term == excluded`.
    pub fn matches_excluding(&self, term: &str, excluded: &str) -> usize {
        match (self.index.get(term), self.index.get(excluded)) {
            (Some(bits), Some(other)) => bits.and_not(other).count(),
            (Some(bits), None) => bits.count(),
            (None, _) => 0,
        }
    }

    pub fn index(&self) -> &Index<B> {
        &self.index
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }
}

impl<B: BitStorage> Lookup for IndexedLookup<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, term: &str) -> usize {
        IndexedLookup::matches(self, term)
    }
}

/// Brute-force reference engine. No precomputation, O(N) per query.
#[derive(Debug, Clone)]
pub struct LinearScanOracle {
    corpus: Corpus,
}

impl LinearScanOracle {
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    /// Count positions equal to `term`.
    pub fn matches(&self, term: &str) -> usize {
        self.corpus.iter().filter(|entry| entry.as_str() == term).count()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }
}

impl Lookup for LinearScanOracle {
    fn name(&self) -> &str {
        "LinearScanOracle"
    }

    fn matches(&self, term: &str) -> usize {
        LinearScanOracle::matches(self, term)
    }
}
