// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for engine equivalence.
//!
//! Builds an index from arbitrary terms and checks every query against the
//! linear scan. Terms come from raw bytes, so empty strings, whitespace and
//! multi-byte characters all show up as keys.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tally::{verify_against_corpus, Corpus, IndexedLookup, LinearScanOracle};

#[derive(Debug, Arbitrary)]
struct LookupInput {
    corpus: Vec<String>,
    queries: Vec<String>,
}

fuzz_target!(|input: LookupInput| {
    // Cap sizes to avoid timeouts
    let terms: Vec<String> = input.corpus.into_iter().take(512).collect();
    let corpus = Corpus::from_terms(terms);

    let indexed: IndexedLookup = IndexedLookup::build(corpus.clone());
    let oracle = LinearScanOracle::new(corpus.clone());

    verify_against_corpus(indexed.index(), &corpus).expect("built index must verify");
    assert_eq!(indexed.index().total_count(), corpus.len());

    for term in corpus.iter().chain(input.queries.iter()).take(1024) {
        assert_eq!(
            indexed.matches(term),
            oracle.matches(term),
            "engines disagree on {:?}",
            term
        );
    }
});
