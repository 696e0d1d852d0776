use super::common::{corpus_of, engines, repeated};
use tally::{BitStorage, BitVector, Builder, Index, IndexedLookup, LinearScanOracle, Lookup};

#[test]
fn small_corpus_counts() {
    let (indexed, oracle) = engines(
        ["a", "b", "a", "c"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    let both: [&dyn Lookup; 2] = [&indexed, &oracle];
    for engine in both {
        assert_eq!(engine.matches("a"), 2, "{}", engine.name());
        assert_eq!(engine.matches("b"), 1, "{}", engine.name());
        assert_eq!(engine.matches("c"), 1, "{}", engine.name());
        assert_eq!(engine.matches("z"), 0, "{}", engine.name());
    }
}

#[test]
fn empty_corpus() {
    let corpus = corpus_of(&[]);
    let indexed: IndexedLookup = IndexedLookup::build(corpus.clone());
    let oracle = LinearScanOracle::new(corpus);

    assert_eq!(indexed.matches("anything"), 0);
    assert_eq!(oracle.matches("anything"), 0);
    assert!(indexed.index().is_empty());
    assert_eq!(indexed.index().universe(), 0);
    assert_eq!(BitVector::new(0).count(), 0);
}

#[test]
fn one_term_repeated() {
    let corpus = repeated("x", 1000);
    let indexed: IndexedLookup = IndexedLookup::build(corpus.clone());
    let oracle = LinearScanOracle::new(corpus);

    assert_eq!(indexed.matches("x"), 1000);
    assert_eq!(oracle.matches("x"), 1000);
    assert_eq!(indexed.index().len(), 1);
    assert_eq!(indexed.matches("y"), 0);
}

#[test]
fn matching_is_exact() {
    let (indexed, oracle) = engines(
        ["cat", "Cat", "cats", "cat", "ca", "café", "cafe"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    for (term, expected) in [
        ("cat", 2),
        ("Cat", 1),
        ("CAT", 0),
        ("ca", 1),
        ("c", 0),
        ("café", 1),
        ("cafe", 1),
    ] {
        assert_eq!(indexed.matches(term), expected, "{}", term);
        assert_eq!(oracle.matches(term), expected, "{}", term);
    }
}

#[test]
fn concurrent_readers_see_the_same_counts() {
    let corpus = tally::testing::synthetic_corpus(20_000, 11);
    let indexed: IndexedLookup = IndexedLookup::build(corpus.clone());
    let oracle = LinearScanOracle::new(corpus);
    let queries = tally::testing::synthetic_queries(3);
    let expected: Vec<usize> = queries.iter().map(|q| oracle.matches(q)).collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let got: Vec<usize> = queries.iter().map(|q| indexed.matches(q)).collect();
                assert_eq!(got, expected);
            });
        }
    });
}

#[test]
fn built_index_exposes_positions() {
    let index: Index = Builder::build(&["the", "cat", "the", "hat"]);
    assert_eq!(index.get("the").map(BitStorage::positions), Some(vec![0, 2]));
    assert_eq!(index.count("hat"), 1);
}
