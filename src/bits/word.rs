// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Backing word types for [`PackedBits`](super::PackedBits).

use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[cfg(feature = "portable-popcount")]
use super::popcount;

/// An unsigned integer used as a block of bits.
///
/// Implemented for `u8` through `u128`. Wider words mean fewer iterations in
/// the popcount sweep; `u64` matches the native register on every target we
/// care about, which is why [`BitVector`](super::BitVector) uses it.
pub trait Word:
    Copy
    + Eq
    + Hash
    + Default
    + Send
    + Sync
    + fmt::Debug
    + fmt::Binary
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + 'static
{
    /// Bits per word.
    const BITS: usize;
    /// All bits clear.
    const ZERO: Self;
    /// All bits set.
    const MAX: Self;
    /// Type name, for engine labels.
    const NAME: &'static str;

    /// A word with only bit `offset` set. `offset < Self::BITS`.
    fn bit(offset: usize) -> Self;

    /// A word with the low `bits` bits set. `bits` is clamped to `Self::BITS`.
    fn low_mask(bits: usize) -> Self;

    /// Population count.
    fn popcount(self) -> u32;

    /// Index of the lowest set bit. Undefined for zero.
    fn lowest_set(self) -> u32;
}

macro_rules! impl_word {
    ($($t:ty),*) => {$(
        impl Word for $t {
            const BITS: usize = <$t>::BITS as usize;
            const ZERO: Self = 0;
            const MAX: Self = <$t>::MAX;
            const NAME: &'static str = stringify!($t);

            #[inline(always)]
            fn bit(offset: usize) -> Self {
                1 << offset
            }

            #[inline(always)]
            fn low_mask(bits: usize) -> Self {
                if bits >= <Self as Word>::BITS {
                    Self::MAX
                } else {
                    (1 << bits) - 1
                }
            }

            #[cfg(not(feature = "portable-popcount"))]
            #[inline(always)]
            fn popcount(self) -> u32 {
                self.count_ones()
            }

            #[cfg(feature = "portable-popcount")]
            #[inline(always)]
            fn popcount(self) -> u32 {
                popcount::swar(u64::from(self))
            }

            #[inline(always)]
            fn lowest_set(self) -> u32 {
                self.trailing_zeros()
            }
        }
    )*};
}

impl_word!(u8, u16, u32, u64);

impl Word for u128 {
    const BITS: usize = 128;
    const ZERO: Self = 0;
    const MAX: Self = u128::MAX;
    const NAME: &'static str = "u128";

    #[inline(always)]
    fn bit(offset: usize) -> Self {
        1 << offset
    }

    #[inline(always)]
    fn low_mask(bits: usize) -> Self {
        if bits >= <Self as Word>::BITS {
            Self::MAX
        } else {
            (1 << bits) - 1
        }
    }

    #[cfg(not(feature = "portable-popcount"))]
    #[inline(always)]
    fn popcount(self) -> u32 {
        self.count_ones()
    }

    #[cfg(feature = "portable-popcount")]
    #[inline(always)]
    fn popcount(self) -> u32 {
        popcount::swar(self as u64) + popcount::swar((self >> 64) as u64)
    }

    #[inline(always)]
    fn lowest_set(self) -> u32 {
        self.trailing_zeros()
    }
}
