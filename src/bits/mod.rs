// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-universe bit sets: the one hot path in the whole crate.
//!
//! An index entry is "the set of corpus positions holding this term". With a
//! universe of N positions, that set packs into N/64 machine words and its
//! cardinality is a popcount sweep over those words. No branch per bit, no
//! per-position allocation.
//!
//! Two layers:
//!
//! - [`BitStorage`]: the contract the builder and the query engines are written
//!   against. Swap the representation, keep the callers.
//! - [`PackedBits<W>`]: the packed implementation, generic over the backing
//!   [`Word`] width. [`BitVector`] (64-bit words) is what everything defaults to.
//!
//! # Invariants
//!
//! - **FIXED_UNIVERSE**: `universe()` is decided at construction and never changes.
//! - **TAIL_CLEAR**: bits at positions `>= universe()` in the last word are zero.
//!   `count()` relies on this: it sums whole words without masking.
//! - **SAME_UNIVERSE**: boolean combinators only accept operands of equal universe.

mod packed;
pub mod popcount;
mod word;

pub use packed::{Ones, PackedBits};
pub use word::Word;

use std::fmt;

/// The default bit set: 64-bit words, native popcount.
pub type BitVector = PackedBits<u64>;

/// A set over the integers `[0, universe)`.
///
/// Implementations are write-once in practice: the builder calls [`set`](Self::set)
/// while it owns the value, then hands it to an immutable index. Nothing here
/// synchronizes, so the `Sync` bound only holds because queries never mutate.
///
/// Out-of-range positions and universe mismatches are programming errors and
/// panic.
pub trait BitStorage: Clone + Send + Sync + fmt::Debug + 'static {
    /// Create an empty set over `[0, universe)`.
    fn with_universe(universe: usize) -> Self;

    /// Size of the universe (not the number of set bits).
    fn universe(&self) -> usize;

    /// Mark `position` as present.
    fn set(&mut self, position: usize);

    /// Whether `position` is present.
    fn test(&self, position: usize) -> bool;

    /// Number of set bits.
    fn count(&self) -> usize;

    /// Intersection. Panics if the universes differ.
    fn and(&self, other: &Self) -> Self;

    /// Union. Panics if the universes differ.
    fn or(&self, other: &Self) -> Self;

    /// Difference (`self & !other`). Panics if the universes differ.
    fn and_not(&self, other: &Self) -> Self;

    /// Call `f` with every set position, ascending.
    fn for_each_set(&self, f: impl FnMut(usize));

    /// Whether the TAIL_CLEAR invariant holds. Used by contracts and verification.
    fn tail_is_clear(&self) -> bool;

    /// Approximate heap footprint in bytes.
    fn heap_bytes(&self) -> usize;

    /// Storage label, e.g. `PackedBits<u64>`.
    fn name() -> String;

    /// Set positions collected into a vector.
    fn positions(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.count());
        self.for_each_set(|p| out.push(p));
        out
    }

    /// Whether no bit is set.
    fn none(&self) -> bool {
        self.count() == 0
    }
}

impl<W: Word> BitStorage for PackedBits<W> {
    #[inline]
    fn with_universe(universe: usize) -> Self {
        PackedBits::new(universe)
    }

    #[inline]
    fn universe(&self) -> usize {
        self.len()
    }

    #[inline]
    fn set(&mut self, position: usize) {
        PackedBits::set(self, position);
    }

    #[inline]
    fn test(&self, position: usize) -> bool {
        PackedBits::test(self, position)
    }

    #[inline]
    fn count(&self) -> usize {
        PackedBits::count(self)
    }

    fn and(&self, other: &Self) -> Self {
        PackedBits::and(self, other)
    }

    fn or(&self, other: &Self) -> Self {
        PackedBits::or(self, other)
    }

    fn and_not(&self, other: &Self) -> Self {
        PackedBits::and_not(self, other)
    }

    fn for_each_set(&self, f: impl FnMut(usize)) {
        self.ones().for_each(f);
    }

    fn tail_is_clear(&self) -> bool {
        PackedBits::tail_is_clear(self)
    }

    fn heap_bytes(&self) -> usize {
        PackedBits::heap_bytes(self)
    }

    fn name() -> String {
        format!("PackedBits<{}>", W::NAME)
    }

    fn none(&self) -> bool {
        PackedBits::none(self)
    }
}
