use std::io::Write;
use std::time::Duration;

use tally::harness::{
    BenchConfig, Event, Harness, JsonReporter, ManualClock, Recorder, SystemClock,
};
use tally::{BitVector, IndexedLookup, LinearScanOracle};
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn full_pipeline_with_manual_clock() {
    let corpus_file = write_temp("a b a c\na d\n");
    let query_file = write_temp("a z c a\n");
    let mut recorder = Recorder::new();
    let config = BenchConfig {
        repeat: 2,
        ..BenchConfig::default()
    };
    let mut harness = Harness::new(
        ManualClock::ticking(Duration::from_millis(1)),
        &mut recorder,
        config,
    );

    let corpus = harness.load_timed(corpus_file.path()).unwrap();
    let queries = harness.load_timed(query_file.path()).unwrap();
    assert_eq!(corpus.elapsed, Duration::from_millis(1));
    assert_eq!(corpus.value.len(), 6);
    assert_eq!(queries.value.len(), 4);

    let index = harness.build_timed::<BitVector>(&corpus.value).unwrap();
    let indexed = IndexedLookup::new(corpus.value.clone(), index.value);
    let oracle = LinearScanOracle::new(corpus.value);

    let fast = harness.run_queries(&indexed, &queries.value).unwrap();
    let slow = harness.run_queries(&oracle, &queries.value).unwrap();
    // a=3, z=0, c=1, a=3 per pass, two passes
    assert_eq!(fast.matches, 14);
    assert_eq!(slow.matches, 14);
    assert_eq!(fast.elapsed, Duration::from_millis(1));

    let mismatches = harness.compare(&oracle, &indexed, &queries.value).unwrap();
    assert!(mismatches.is_empty());

    let kinds: Vec<&str> = recorder
        .events
        .iter()
        .map(|e| match e {
            Event::Loaded { .. } => "loaded",
            Event::Built { .. } => "built",
            Event::QueryRun(_) => "query_run",
            Event::Mismatch(_) => "mismatch",
            Event::Compared { .. } => "compared",
        })
        .collect();
    assert_eq!(
        kinds,
        ["loaded", "loaded", "built", "query_run", "query_run", "compared"]
    );
}

#[test]
fn json_reporter_emits_one_object_per_event() {
    let corpus_file = write_temp("x y x");
    let mut reporter = JsonReporter::new(Vec::new());
    {
        let mut harness = Harness::new(SystemClock::new(), &mut reporter, BenchConfig::default());
        let corpus = harness.load_timed(corpus_file.path()).unwrap().value;
        let oracle = LinearScanOracle::new(corpus);
        harness
            .run_queries(&oracle, &["x".to_string(), "q".to_string()])
            .unwrap();
    }

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "loaded");
    assert_eq!(events[0]["terms"], 3);
    assert_eq!(events[1]["event"], "query_run");
    assert_eq!(events[1]["matches"], 2);
    assert_eq!(events[1]["engine"], "LinearScanOracle");
    assert!(events[1]["elapsed_ms"].as_f64().unwrap() >= 0.0);
}
