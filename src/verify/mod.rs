// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: checked invariant passes and runtime contracts.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Checked passes** ([`verify_index`], [`verify_against_corpus`]) that walk a
//!    built index and return the first broken invariant as an [`InvariantError`].
//!    The CLI runs these after `tally stats`; tests run them everywhere.
//!
//! 2. **Runtime contracts** ([`contracts`]) that panic in debug builds when an
//!    invariant is violated. Zero-cost in release.
//!
//! The type split between `Builder` and `Index` already rules out mutation after
//! capture. What's left to check is arithmetic: did every position land in
//! exactly one set, and does every set span the right universe.

pub mod contracts;
mod types;

pub use types::*;

use crate::bits::{BitStorage, BitVector};
use crate::index::Index;

/// Check UNIVERSE_ALIGNED, TAIL_CLEAR, NON_EMPTY and PARTITION.
///
/// O(N + distinct_terms × N / word_bits): one pass over every set, one
/// scratch bit vector to detect overlaps.
pub fn verify_index<B: BitStorage>(index: &Index<B>) -> Result<VerificationReport, InvariantError> {
    let universe = index.universe();
    let mut seen = BitVector::new(universe);
    let mut overlap: Option<(usize, String)> = None;
    let mut positions_checked = 0;

    for (term, bits) in index.iter() {
        if bits.universe() != universe {
            return Err(InvariantError::UniverseMismatch {
                term: term.to_string(),
                expected: universe,
                actual: bits.universe(),
            });
        }
        if !bits.tail_is_clear() {
            return Err(InvariantError::TailBitsSet {
                term: term.to_string(),
            });
        }
        if bits.none() {
            return Err(InvariantError::EmptyPositionSet {
                term: term.to_string(),
            });
        }

        bits.for_each_set(|position| {
            positions_checked += 1;
            if seen.test(position) {
                overlap.get_or_insert_with(|| (position, term.to_string()));
            } else {
                seen.set(position);
            }
        });
        if let Some((position, term)) = overlap {
            return Err(InvariantError::OverlappingPosition { position, term });
        }
    }

    if let Some(position) = first_clear(&seen) {
        return Err(InvariantError::UncoveredPosition { position });
    }

    Ok(VerificationReport {
        terms_checked: index.len(),
        positions_checked,
        corpus_checked: false,
    })
}

/// [`verify_index`] plus: the index was built from exactly this corpus.
pub fn verify_against_corpus<B: BitStorage, S: AsRef<str>>(
    index: &Index<B>,
    corpus: &[S],
) -> Result<VerificationReport, InvariantError> {
    if corpus.len() != index.universe() {
        return Err(InvariantError::CorpusLengthMismatch {
            corpus_len: corpus.len(),
            universe: index.universe(),
        });
    }

    let mut report = verify_index(index)?;

    for (term, bits) in index.iter() {
        let mut mismatch: Option<usize> = None;
        bits.for_each_set(|position| {
            if mismatch.is_none() && corpus[position].as_ref() != term {
                mismatch = Some(position);
            }
        });
        if let Some(position) = mismatch {
            return Err(InvariantError::TermMismatch {
                position,
                indexed: term.to_string(),
                actual: corpus[position].as_ref().to_string(),
            });
        }
    }

    report.corpus_checked = true;
    Ok(report)
}

fn first_clear(bits: &BitVector) -> Option<usize> {
    bits.words()
        .iter()
        .enumerate()
        .find(|&(_, &w)| w != u64::MAX)
        .map(|(i, &w)| i * 64 + (!w).trailing_zeros() as usize)
        .filter(|&p| p < bits.len())
}
