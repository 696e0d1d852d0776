//! Differential testing: the indexed engine against the linear scan and the
//! ordered-map oracle.

use super::common::{corpus_strategy, engines, query_strategy};
use super::oracles::oracle_postings;
use proptest::prelude::*;
use tally::{BitStorage, Builder, Corpus, Index, IndexedLookup, LinearScanOracle, PackedBits};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Both engines give the same count for every query.
    #[test]
    fn diff_indexed_vs_linear_scan(
        corpus in corpus_strategy(),
        queries in prop::collection::vec(query_strategy(), 1..20),
    ) {
        let (indexed, oracle) = engines(corpus);
        for q in &queries {
            prop_assert_eq!(indexed.matches(q), oracle.matches(q), "query {:?}", q);
        }
    }

    /// Every corpus term's count agrees, and positions match the oracle postings.
    #[test]
    fn diff_positions_vs_oracle_postings(corpus in corpus_strategy()) {
        let postings = oracle_postings(&corpus);
        let (indexed, oracle) = engines(corpus.clone());
        for (term, expected) in &postings {
            prop_assert_eq!(&indexed.positions(term), expected);
            prop_assert_eq!(indexed.matches(term), expected.len());
            prop_assert_eq!(oracle.matches(term), expected.len());
        }
        prop_assert_eq!(indexed.index().len(), postings.len());
    }

    /// A term that occurs nowhere counts zero on both engines.
    #[test]
    fn diff_absent_terms_are_zero(corpus in corpus_strategy()) {
        let (indexed, oracle) = engines(corpus);
        for absent in ["zzz", "", "A", "a b"] {
            prop_assert_eq!(indexed.matches(absent), 0);
            prop_assert_eq!(oracle.matches(absent), 0);
        }
    }

    /// Repeating a query never changes its answer.
    #[test]
    fn diff_matches_is_deterministic(
        corpus in corpus_strategy(),
        query in query_strategy(),
    ) {
        let (indexed, oracle) = engines(corpus);
        let first = indexed.matches(&query);
        for _ in 0..3 {
            prop_assert_eq!(indexed.matches(&query), first);
            prop_assert_eq!(oracle.matches(&query), first);
        }
    }

    /// Narrow words index the same as the default 64-bit words.
    #[test]
    fn diff_word_widths_agree(
        corpus in corpus_strategy(),
        queries in prop::collection::vec(query_strategy(), 1..10),
    ) {
        let corpus = Corpus::from_terms(corpus);
        let wide: IndexedLookup = IndexedLookup::build(corpus.clone());
        let narrow: IndexedLookup<PackedBits<u8>> = IndexedLookup::build(corpus.clone());
        let huge: IndexedLookup<PackedBits<u128>> = IndexedLookup::build(corpus);
        for q in &queries {
            prop_assert_eq!(wide.matches(q), narrow.matches(q));
            prop_assert_eq!(wide.matches(q), huge.matches(q));
        }
    }

    /// OR over several terms equals the sum of their counts (sets are disjoint).
    #[test]
    fn diff_matches_any_vs_sum(
        corpus in corpus_strategy(),
        terms in prop::collection::btree_set(query_strategy(), 0..5),
    ) {
        let (indexed, oracle) = engines(corpus);
        let expected: usize = terms.iter().map(|t| oracle.matches(t)).sum();
        prop_assert_eq!(indexed.matches_any(terms.iter().map(String::as_str)), expected);
    }

    /// AND-NOT of two terms is the first count, or zero when they are equal.
    #[test]
    fn diff_matches_excluding(
        corpus in corpus_strategy(),
        term in query_strategy(),
        excluded in query_strategy(),
    ) {
        let (indexed, oracle) = engines(corpus);
        let expected = if term == excluded { 0 } else { oracle.matches(&term) };
        prop_assert_eq!(indexed.matches_excluding(&term, &excluded), expected);
    }
}

#[test]
fn diff_builder_step_by_step_equals_build() {
    let corpus: Vec<String> = "to be or not to be".split(' ').map(String::from).collect();
    let mut builder: Builder = Builder::new(corpus.len());
    builder.add(&corpus);
    let stepwise = builder.capture();
    let direct: Index = Builder::build(&corpus);

    for term in ["to", "be", "or", "not", "that"] {
        assert_eq!(stepwise.count(term), direct.count(term), "{}", term);
        assert_eq!(
            stepwise.get(term).map(BitStorage::positions),
            direct.get(term).map(BitStorage::positions)
        );
    }
    let oracle = LinearScanOracle::new(Corpus::from_terms(corpus));
    assert_eq!(stepwise.count("to"), oracle.matches("to"));
}
