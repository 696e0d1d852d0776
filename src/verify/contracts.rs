// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index invariants.
//!
//! Debug-mode assertions on the properties listed in [`crate::index`]:
//!
//! 1. **Zero-cost in release builds** (`debug_assert!` / `cfg!(debug_assertions)`)
//! 2. **Early failure** at the point the invariant breaks, not at the first wrong answer
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function         | Invariant                                 |
//! |---------------------------|-------------------------------------------|
//! | `check_index_partition`   | UNIVERSE_ALIGNED, TAIL_CLEAR, PARTITION   |
//! | `check_lookup_pairing`    | Index universe equals the wrapped corpus  |

use crate::bits::BitStorage;
use crate::index::Index;

use super::verify_index;

/// Check that a freshly captured index partitions its universe.
///
/// # Panics (debug builds only)
/// Panics with the first violated invariant.
#[inline]
pub fn check_index_partition<B: BitStorage>(index: &Index<B>) {
    if cfg!(debug_assertions) {
        if let Err(err) = verify_index(index) {
            panic!("Contract violation: Index.Partition - {}", err);
        }
    }
}

/// Check that an index is being paired with a corpus of the right length.
///
/// Length is all we can check cheaply. A same-length foreign corpus slips
/// through; `verify_against_corpus` catches that, at O(N) cost.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_lookup_pairing(corpus_len: usize, universe: usize) {
    debug_assert_eq!(
        corpus_len, universe,
        "Contract violation: IndexedLookup pairing - corpus.len() {} != index.universe() {}",
        corpus_len, universe
    );
}
