// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Packed bit set over a fixed universe.
//!
//! Position `i` lives in word `i / W::BITS` at bit `i % W::BITS`. The word
//! array is allocated once, sized `ceil(len / W::BITS)`, and never grows.

use std::fmt;

use super::popcount::count_words;
use super::Word;

/// A fixed-universe bit set backed by a boxed slice of `W` words.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PackedBits<W: Word = u64> {
    words: Box<[W]>,
    len: usize,
}

impl<W: Word> PackedBits<W> {
    /// Empty set over `[0, len)`. `len == 0` allocates nothing.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![W::ZERO; len.div_ceil(W::BITS)].into_boxed_slice(),
            len,
        }
    }

    /// Build from positions. Duplicates are harmless; out-of-range positions panic.
    pub fn from_positions(len: usize, positions: impl IntoIterator<Item = usize>) -> Self {
        let mut bits = Self::new(len);
        for p in positions {
            bits.set(p);
        }
        bits
    }

    /// Universe size.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the universe is empty (not whether no bits are set, see [`none`](Self::none)).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing words, tail bits clear.
    #[inline]
    pub fn words(&self) -> &[W] {
        &self.words
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    fn locate(&self, position: usize) -> (usize, W) {
        assert!(
            position < self.len,
            "bit position {} out of range for universe {}",
            position,
            self.len
        );
        (position / W::BITS, W::bit(position % W::BITS))
    }

    #[inline]
    pub fn set(&mut self, position: usize) {
        let (word, mask) = self.locate(position);
        self.words[word] |= mask;
    }

    #[inline]
    pub fn test(&self, position: usize) -> bool {
        let (word, mask) = self.locate(position);
        self.words[word] & mask != W::ZERO
    }

    /// Number of set bits. Whole-word popcount, no masking needed thanks to TAIL_CLEAR.
    #[inline]
    pub fn count(&self) -> usize {
        count_words(self.words())
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != W::ZERO)
    }

    pub fn none(&self) -> bool {
        !self.any()
    }

    pub fn and(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & b)
    }

    pub fn or(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a | b)
    }

    /// `self & !other`. `!other` sets the tail, but `self`'s tail is clear so the result's is too.
    pub fn and_not(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & !b)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(W, W) -> W) -> Self {
        assert_eq!(
            self.len, other.len,
            "bit set universe mismatch: {} vs {}",
            self.len, other.len
        );
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Self {
            words,
            len: self.len,
        }
    }

    /// Ascending iterator over set positions.
    pub fn ones(&self) -> Ones<'_, W> {
        Ones {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(W::ZERO),
        }
    }

    /// Whether every bit at a position `>= len` is zero.
    pub fn tail_is_clear(&self) -> bool {
        let used = self.len % W::BITS;
        match self.words.last() {
            Some(&last) if used != 0 => last & !W::low_mask(used) == W::ZERO,
            _ => true,
        }
    }

    pub fn heap_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<W>()
    }
}

impl<W: Word> fmt::Debug for PackedBits<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedBits")
            .field("len", &self.len)
            .field("word_bits", &W::BITS)
            .field("count", &self.count())
            .finish()
    }
}

/// Iterator over the set positions of a [`PackedBits`].
pub struct Ones<'a, W: Word> {
    words: &'a [W],
    index: usize,
    current: W,
}

impl<W: Word> Iterator for Ones<'_, W> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == W::ZERO {
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
        let offset = self.current.lowest_set() as usize;
        self.current &= !W::bit(offset);
        Some(self.index * W::BITS + offset)
    }
}
