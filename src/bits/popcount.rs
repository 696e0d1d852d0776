// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Population count, three ways.
//!
//! `count_ones` lowers to a single `popcnt`/`cnt` instruction when the target
//! has one and to a libcall otherwise. The two portable versions exist for
//! targets without hardware support and as cross-checks for each other:
//!
//! - **SWAR**: the classic "sideways add" reduction, branch-free, a handful of
//!   shifts and masks per 64-bit word.
//! - **Table**: eight lookups into a 256-entry byte table.
//!
//! The `portable-popcount` feature routes [`Word::popcount`](super::Word::popcount)
//! through [`swar`]. The table version is only used in tests and benchmarks.

use super::Word;

/// Hardware popcount (via `count_ones`).
#[inline(always)]
pub fn native(x: u64) -> u32 {
    x.count_ones()
}

/// Branch-free SWAR popcount.
#[inline(always)]
pub const fn swar(x: u64) -> u32 {
    const M1: u64 = 0x5555_5555_5555_5555;
    const M2: u64 = 0x3333_3333_3333_3333;
    const M4: u64 = 0x0F0F_0F0F_0F0F_0F0F;
    const H01: u64 = 0x0101_0101_0101_0101;

    let x = x - ((x >> 1) & M1);
    let x = (x & M2) + ((x >> 2) & M2);
    let x = (x + (x >> 4)) & M4;
    (x.wrapping_mul(H01) >> 56) as u32
}

const fn build_byte_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 1;
    while i < 256 {
        // popcount(i) = popcount(i / 2) + lowest bit
        table[i] = table[i >> 1] + (i & 1) as u8;
        i += 1;
    }
    table
}

/// Bit count of every byte value.
pub static BYTE_TABLE: [u8; 256] = build_byte_table();

/// Look-up table popcount.
#[inline]
pub fn table(x: u64) -> u32 {
    x.to_le_bytes()
        .iter()
        .map(|&b| u32::from(BYTE_TABLE[b as usize]))
        .sum()
}

/// Sum of popcounts over a word slice.
///
/// Four independent accumulators so the adds don't serialize on one register.
#[inline]
pub fn count_words<W: Word>(words: &[W]) -> usize {
    let mut chunks = words.chunks_exact(4);
    let (mut a, mut b, mut c, mut d) = (0usize, 0usize, 0usize, 0usize);
    for chunk in &mut chunks {
        a += chunk[0].popcount() as usize;
        b += chunk[1].popcount() as usize;
        c += chunk[2].popcount() as usize;
        d += chunk[3].popcount() as usize;
    }
    let rest: usize = chunks
        .remainder()
        .iter()
        .map(|w| w.popcount() as usize)
        .sum();
    a + b + c + d + rest
}
