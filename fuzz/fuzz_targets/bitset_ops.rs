// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for packed bit set operations.
//!
//! Drives a random chain of set/AND/OR/AND-NOT against a `BTreeSet` model.
//! Every step must keep the popcount equal to the model's length and the
//! tail bits clear; `count()` sums whole words and trusts the tail.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use tally::{BitVector, PackedBits};

#[derive(Debug, Arbitrary)]
enum Op {
    Set(u16),
    And(Vec<u16>),
    Or(Vec<u16>),
    AndNot(Vec<u16>),
}

#[derive(Debug, Arbitrary)]
struct BitsInput {
    universe: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: BitsInput| {
    // Cap to keep each run fast
    let universe = (input.universe % 1024) as usize;
    if universe == 0 {
        let empty = BitVector::new(0);
        assert_eq!(empty.count(), 0);
        return;
    }

    let clamp = |p: &u16| *p as usize % universe;
    let mut bits = BitVector::new(universe);
    let mut narrow = PackedBits::<u8>::new(universe);
    let mut model: BTreeSet<usize> = BTreeSet::new();

    for op in input.ops.iter().take(64) {
        match op {
            Op::Set(p) => {
                let p = clamp(p);
                bits.set(p);
                narrow.set(p);
                model.insert(p);
            }
            Op::And(ps) | Op::Or(ps) | Op::AndNot(ps) => {
                let positions: BTreeSet<usize> = ps.iter().map(clamp).collect();
                let other = BitVector::from_positions(universe, positions.iter().copied());
                let other_narrow = PackedBits::<u8>::from_positions(universe, positions.iter().copied());
                match op {
                    Op::And(_) => {
                        bits = bits.and(&other);
                        narrow = narrow.and(&other_narrow);
                        model = model.intersection(&positions).copied().collect();
                    }
                    Op::Or(_) => {
                        bits = bits.or(&other);
                        narrow = narrow.or(&other_narrow);
                        model = model.union(&positions).copied().collect();
                    }
                    _ => {
                        bits = bits.and_not(&other);
                        narrow = narrow.and_not(&other_narrow);
                        model = model.difference(&positions).copied().collect();
                    }
                }
            }
        }

        assert_eq!(bits.count(), model.len(), "popcount drifted after {:?}", op);
        assert_eq!(narrow.count(), model.len(), "u8 popcount drifted after {:?}", op);
        assert!(bits.tail_is_clear(), "tail dirty after {:?}", op);
    }

    assert!(bits.ones().eq(model.iter().copied()));
    assert!(narrow.ones().eq(model.iter().copied()));
});
