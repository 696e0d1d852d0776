// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for tally's bit addressing arithmetic.
//!
//! This standalone crate extracts the word/bit addressing, tail masking and
//! SWAR popcount used by the packed bit sets, and proves them correct for
//! every input using Kani.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Addressing**: `locate(p)` lands inside the word array for every `p < len`
//!    and distinct positions never share a (word, mask) pair
//! 2. **Tail mask**: `low_mask(len % 64)` keeps exactly the in-universe bits
//! 3. **SWAR popcount**: equals `count_ones` for every u64

pub const WORD_BITS: usize = 64;

// ============================================================================
// ADDRESSING (mirrors src/bits/packed.rs and src/bits/word.rs for u64)
// ============================================================================

/// Words needed for a universe of `len` bits.
pub fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// (word index, single-bit mask) for a position.
pub fn locate(position: usize) -> (usize, u64) {
    (position / WORD_BITS, 1u64 << (position % WORD_BITS))
}

/// Mask with the low `bits` bits set.
pub fn low_mask(bits: usize) -> u64 {
    if bits >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Whether the last word of a `len`-bit set has no bits past `len`.
pub fn tail_is_clear(len: usize, last: u64) -> bool {
    let used = len % WORD_BITS;
    used == 0 || last & !low_mask(used) == 0
}

// ============================================================================
// POPCOUNT (mirrors src/bits/popcount.rs)
// ============================================================================

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

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Every in-range position addresses an existing word with exactly one bit.
    #[kani::proof]
    fn verify_locate_in_bounds() {
        let len: usize = kani::any_where(|&n: &usize| n > 0 && n <= 1 << 20);
        let position: usize = kani::any_where(|&p: &usize| p < len);

        let (word, mask) = locate(position);
        kani::assert(word < word_count(len), "word index must be inside the array");
        kani::assert(mask.count_ones() == 1, "mask must have exactly one bit");
    }

    /// Two distinct positions never map to the same (word, mask).
    #[kani::proof]
    fn verify_locate_injective() {
        let a: usize = kani::any_where(|&p: &usize| p < 1 << 20);
        let b: usize = kani::any_where(|&p: &usize| p < 1 << 20);
        kani::assume(a != b);
        kani::assert(locate(a) != locate(b), "distinct positions must not collide");
    }

    /// The word/bit split is invertible.
    #[kani::proof]
    fn verify_locate_roundtrip() {
        let position: usize = kani::any_where(|&p: &usize| p < 1 << 20);
        let (word, mask) = locate(position);
        let rebuilt = word * WORD_BITS + mask.trailing_zeros() as usize;
        kani::assert(rebuilt == position, "locate must be invertible");
    }

    /// A bit set below `len` never dirties the tail; one at or past it always does.
    #[kani::proof]
    fn verify_tail_mask() {
        let len: usize = kani::any_where(|&n: &usize| n > 0 && n <= 1 << 20);
        let offset: usize = kani::any_where(|&o: &usize| o < WORD_BITS);
        let last_word_start = (word_count(len) - 1) * WORD_BITS;
        let position = last_word_start + offset;
        let (_, mask) = locate(position);

        if position < len {
            kani::assert(tail_is_clear(len, mask), "in-universe bit must keep tail clear");
        } else {
            kani::assert(!tail_is_clear(len, mask), "out-of-universe bit must dirty tail");
        }
    }

    /// low_mask(b) has exactly b bits set.
    #[kani::proof]
    fn verify_low_mask_width() {
        let bits: usize = kani::any_where(|&b: &usize| b <= WORD_BITS);
        kani::assert(
            low_mask(bits).count_ones() as usize == bits,
            "low_mask must set exactly `bits` bits",
        );
    }

    /// SWAR popcount matches the hardware count for every word.
    #[kani::proof]
    fn verify_swar_popcount() {
        let x: u64 = kani::any();
        kani::assert(swar(x) == x.count_ones(), "swar must equal count_ones");
    }
}
