//! Bit set properties: packed storage against the `BTreeSet` reference.

use super::common::positions_strategy;
use super::oracles::{oracle_popcount, RefSet};
use proptest::prelude::*;
use tally::bits::popcount;
use tally::{BitVector, PackedBits};

#[derive(Debug, Clone, Copy)]
enum Op {
    And,
    Or,
    AndNot,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::And), Just(Op::Or), Just(Op::AndNot)]
}

/// Universe, starting positions, and a chain of (op, operand positions).
fn op_chain_strategy() -> impl Strategy<Value = (usize, Vec<usize>, Vec<(Op, Vec<usize>)>)> {
    (1usize..260).prop_flat_map(|universe| {
        let set = prop::collection::vec(0..universe, 0..80);
        (
            Just(universe),
            set.clone(),
            prop::collection::vec((op_strategy(), set), 0..8),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// count() equals the number of distinct positions set.
    #[test]
    fn prop_count_is_cardinality((universe, positions) in positions_strategy()) {
        let bits = BitVector::from_positions(universe, positions.iter().copied());
        let reference = RefSet::new(universe, &positions);
        prop_assert_eq!(bits.count(), reference.bits.len());
        prop_assert_eq!(bits.ones().collect::<Vec<_>>(), reference.positions());
        prop_assert!(bits.tail_is_clear());
        prop_assert_eq!(bits.len(), universe);
    }

    /// Any AND/OR/AND-NOT chain keeps count and membership equal to the reference.
    #[test]
    fn prop_ops_match_reference((universe, start, chain) in op_chain_strategy()) {
        let mut bits = BitVector::from_positions(universe, start.iter().copied());
        let mut reference = RefSet::new(universe, &start);

        for (op, operand) in &chain {
            let other = BitVector::from_positions(universe, operand.iter().copied());
            let other_ref = RefSet::new(universe, operand);
            match op {
                Op::And => { bits = bits.and(&other); reference = reference.and(&other_ref); }
                Op::Or => { bits = bits.or(&other); reference = reference.or(&other_ref); }
                Op::AndNot => { bits = bits.and_not(&other); reference = reference.and_not(&other_ref); }
            }
            prop_assert_eq!(bits.count(), reference.bits.len(), "after {:?}", op);
            prop_assert!(bits.tail_is_clear(), "tail dirty after {:?}", op);
        }

        for p in 0..universe {
            prop_assert_eq!(bits.test(p), reference.bits.contains(&p), "position {}", p);
        }
    }

    /// Same positions, every word width, same answers.
    #[test]
    fn prop_word_widths_agree((universe, positions) in positions_strategy()) {
        let b8 = PackedBits::<u8>::from_positions(universe, positions.iter().copied());
        let b16 = PackedBits::<u16>::from_positions(universe, positions.iter().copied());
        let b32 = PackedBits::<u32>::from_positions(universe, positions.iter().copied());
        let b64 = PackedBits::<u64>::from_positions(universe, positions.iter().copied());
        let b128 = PackedBits::<u128>::from_positions(universe, positions.iter().copied());

        let expected: Vec<usize> = b64.ones().collect();
        prop_assert_eq!(b8.ones().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(b16.ones().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(b32.ones().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(b128.ones().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(b8.count(), b64.count());
        prop_assert!(b8.tail_is_clear() && b16.tail_is_clear() && b32.tail_is_clear() && b128.tail_is_clear());
    }

    /// Native, SWAR and table popcounts agree with the bit-at-a-time oracle.
    #[test]
    fn prop_popcount_variants_vs_oracle(word: u64) {
        let expected = oracle_popcount(word) as u32;
        prop_assert_eq!(popcount::native(word), expected);
        prop_assert_eq!(popcount::swar(word), expected);
        prop_assert_eq!(popcount::table(word), expected);
    }

    /// Set bits never leak: OR with a full set is full, AND-NOT with itself is empty.
    #[test]
    fn prop_identities((universe, positions) in positions_strategy()) {
        let bits = BitVector::from_positions(universe, positions.iter().copied());
        let full = BitVector::from_positions(universe, 0..universe);
        prop_assert_eq!(bits.or(&full).count(), universe);
        prop_assert_eq!(bits.and(&full), bits.clone());
        prop_assert!(bits.and_not(&bits).none());
        prop_assert_eq!(bits.and_not(&full).count(), 0);
    }
}

#[test]
fn zero_universe_counts_zero() {
    let bits = BitVector::new(0);
    assert_eq!(bits.count(), 0);
    assert!(bits.none());
    assert!(bits.tail_is_clear());
    assert_eq!(bits.ones().count(), 0);
}

#[test]
fn full_universe_at_word_boundaries() {
    for universe in [1, 63, 64, 65, 127, 128, 129] {
        let full = BitVector::from_positions(universe, 0..universe);
        assert_eq!(full.count(), universe, "universe {}", universe);
        assert!(full.tail_is_clear(), "universe {}", universe);
    }
}
