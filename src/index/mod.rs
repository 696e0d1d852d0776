// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The frozen term index: every distinct term mapped to the positions holding it.
//!
//! An [`Index`] only comes out of [`Builder::capture`]. There is no `&mut`
//! method on it, so once the builder hands it over, the type system is the
//! lock: any number of readers, no writers.
//!
//! # Invariants
//!
//! - **UNIVERSE_ALIGNED**: every set's universe equals the corpus length.
//! - **PARTITION**: the sets are pairwise disjoint and their union is
//!   `[0, universe)`, so `total_count() == universe()`.
//! - **NON_EMPTY**: every key has at least one position.
//!
//! Debug builds assert all three at capture time (see [`crate::verify::contracts`]);
//! [`crate::verify::verify_index`] checks them on demand and reports which one broke.

mod builder;

pub use builder::Builder;

use std::collections::HashMap;

use serde::Serialize;

use crate::bits::{BitStorage, BitVector};

/// Immutable term → position-set mapping.
#[derive(Debug, Clone)]
pub struct Index<B: BitStorage = BitVector> {
    terms: HashMap<String, B>,
    universe: usize,
}

impl<B: BitStorage> Index<B> {
    /// Only the builder assembles an index.
    pub(crate) fn from_parts(terms: HashMap<String, B>, universe: usize) -> Self {
        Self { terms, universe }
    }

    /// Position set for `term`, if the term occurs at all.
    #[inline]
    pub fn get(&self, term: &str) -> Option<&B> {
        self.terms.get(term)
    }

    /// Occurrences of `term`. Zero when absent.
    #[inline]
    pub fn count(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, BitStorage::count)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Corpus length the index was built over.
    #[inline]
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Distinct terms, unordered.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// `(term, positions)` pairs, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &B)> {
        self.terms.iter().map(|(t, b)| (t.as_str(), b))
    }

    /// Sum of popcounts across all keys. Equals `universe()` under PARTITION.
    pub fn total_count(&self) -> usize {
        self.terms.values().map(BitStorage::count).sum()
    }

    /// Bit sets plus key bytes (`len`, not capacity). Ignores hash table
    /// overhead. Equals `bitset_bytes + key_bytes` in [`Index::stats`].
    pub fn heap_bytes(&self) -> usize {
        self.terms
            .iter()
            .map(|(t, b)| t.len() + b.heap_bytes())
            .sum()
    }

    /// Summary for reports.
    pub fn stats(&self) -> IndexStats {
        let mut bitset_bytes = 0;
        let mut key_bytes = 0;
        let mut most_frequent: Option<(&str, usize)> = None;

        for (term, bits) in &self.terms {
            bitset_bytes += bits.heap_bytes();
            key_bytes += term.len();
            let count = bits.count();
            // Ties broken by term so the report is stable across runs.
            let better = match most_frequent {
                None => true,
                Some((best, best_count)) => {
                    count > best_count || (count == best_count && term.as_str() < best)
                }
            };
            if better {
                most_frequent = Some((term.as_str(), count));
            }
        }

        IndexStats {
            universe: self.universe,
            distinct_terms: self.terms.len(),
            total_positions: self.total_count(),
            bitset_bytes,
            key_bytes,
            most_frequent_term: most_frequent.map(|(t, _)| t.to_string()),
            most_frequent_count: most_frequent.map_or(0, |(_, c)| c),
        }
    }
}

/// Shape of a built index, for the CLI and JSON reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub universe: usize,
    pub distinct_terms: usize,
    pub total_positions: usize,
    pub bitset_bytes: usize,
    pub key_bytes: usize,
    pub most_frequent_term: Option<String>,
    pub most_frequent_count: usize,
}
