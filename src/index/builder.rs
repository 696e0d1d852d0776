// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-pass index construction.
//!
//! One writer, one pass, one capture:
//!
//! ```text
//! Builder::new(N) ──add(corpus)──▶ Builder ──capture()──▶ Index
//!   (empty map,                  (term → set,           (frozen,
//!    capacity N)                  bits being set)        Sync)
//! ```
//!
//! `add` takes `&mut self` and `capture` takes `self`, so the borrow checker
//! rules out concurrent writers, queries against a half-built index, and
//! reuse after capture. None of those need a runtime flag.

use std::collections::HashMap;

use tracing::debug;

use super::Index;
use crate::bits::{BitStorage, BitVector};
use crate::verify::contracts;

/// Accumulates term → position sets for a corpus of known length.
#[derive(Debug)]
pub struct Builder<B: BitStorage = BitVector> {
    universe: usize,
    terms: HashMap<String, B>,
    consumed: bool,
}

impl<B: BitStorage> Builder<B> {
    /// Builder for a corpus of exactly `expected_size` terms.
    ///
    /// The term map is sized for the worst case (every term distinct) so the
    /// construction pass never rehashes.
    pub fn new(expected_size: usize) -> Self {
        Self {
            universe: expected_size,
            terms: HashMap::with_capacity(expected_size),
            consumed: false,
        }
    }

    /// Index every position of `corpus`.
    ///
    /// Each term's set is created the first time the term is seen and gets
    /// one bit per occurrence. Panics if `corpus.len()` differs from the size
    /// the builder was created with, or if called twice: both mean the caller
    /// is pairing the wrong corpus with this builder.
    pub fn add<S: AsRef<str>>(&mut self, corpus: &[S]) {
        assert_eq!(
            corpus.len(),
            self.universe,
            "corpus length {} does not match builder universe {}",
            corpus.len(),
            self.universe
        );
        assert!(!self.consumed, "Builder::add called twice");
        self.consumed = true;

        for (position, term) in corpus.iter().enumerate() {
            let term = term.as_ref();
            // get_mut first: the common case is a repeat term, and it must not allocate a key.
            match self.terms.get_mut(term) {
                Some(bits) => bits.set(position),
                None => {
                    let mut bits = B::with_universe(self.universe);
                    bits.set(position);
                    self.terms.insert(term.to_owned(), bits);
                }
            }
        }

        debug!(
            positions = self.universe,
            distinct_terms = self.terms.len(),
            "corpus added to builder"
        );
    }

    /// Distinct terms seen so far.
    pub fn distinct_terms(&self) -> usize {
        self.terms.len()
    }

    /// Universe the builder was created for.
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Freeze into an [`Index`]. Consumes the builder.
    pub fn capture(mut self) -> Index<B> {
        self.terms.shrink_to_fit();
        let index = Index::from_parts(self.terms, self.universe);

        contracts::check_index_partition(&index);

        debug!(
            universe = index.universe(),
            distinct_terms = index.len(),
            heap_bytes = index.heap_bytes(),
            "index captured"
        );
        index
    }

    /// `new` + `add` + `capture` in one call.
    pub fn build<S: AsRef<str>>(corpus: &[S]) -> Index<B> {
        let mut builder = Self::new(corpus.len());
        builder.add(corpus);
        builder.capture()
    }
}
