use std::io::Write;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run_tally(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tally"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run tally")
}

fn path(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}

fn json_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_compare_exits_zero_when_engines_agree() {
    let corpus = write_temp("a b a c\na d\n");
    let queries = write_temp("a z c\n");

    let output = run_tally(&["compare", path(&corpus), path(&queries)]);
    assert!(
        output.status.success(),
        "compare failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_compare_json_reports_no_mismatches() {
    let corpus = write_temp("x y x\n");
    let queries = write_temp("x y w\n");

    let output = run_tally(&["compare", path(&corpus), path(&queries), "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let events = json_lines(&output);
    assert!(events.iter().all(|e| e["event"] != "mismatch"));
    assert_eq!(
        events.last().map(|e| e["event"].clone()),
        Some(Value::from("compared"))
    );
}

#[test]
fn test_stats_json_includes_verification() {
    let corpus = write_temp("b a b a c\n");

    let output = run_tally(&["stats", path(&corpus), "--json"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stats failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stats"]["universe"], 5);
    assert_eq!(value["stats"]["distinct_terms"], 3);
    assert_eq!(value["verification"]["corpus_checked"], true);
}

#[test]
fn test_bench_both_engines_event_order() {
    let corpus = write_temp("a b a c\n");
    let queries = write_temp("a c\n");

    let output = run_tally(&[
        "bench",
        path(&corpus),
        path(&queries),
        "--engine",
        "both",
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let events = json_lines(&output);
    let kinds: Vec<&str> = events.iter().filter_map(|e| e["event"].as_str()).collect();
    assert_eq!(kinds, ["loaded", "loaded", "query_run", "built", "query_run"]);

    assert_eq!(events[2]["engine"], "LinearScanOracle");
    assert_eq!(events[4]["engine"], "IndexedLookup<PackedBits<u64>>");
    assert_eq!(events[2]["matches"], events[4]["matches"]);
    assert_eq!(events[4]["matches"], 3);
}

#[test]
fn test_missing_corpus_exits_one() {
    let queries = write_temp("a\n");
    let missing = "/nonexistent/tally/corpus.txt";

    for args in [
        vec!["bench", missing, path(&queries)],
        vec!["compare", missing, path(&queries)],
        vec!["stats", missing],
    ] {
        let output = run_tally(&args);
        assert_eq!(output.status.code(), Some(1), "{:?}", args);
        assert!(
            String::from_utf8_lossy(&output.stderr).contains(missing),
            "{:?} should name the missing file",
            args
        );
    }
}
