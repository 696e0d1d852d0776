use std::io::Write;

use tally::{Corpus, IndexedLookup, LoadError};
use tempfile::NamedTempFile;

fn write_temp(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_splits_lines_and_spaces_in_order() {
    let file = write_temp(b"alpha beta\n  gamma\t\talpha\n\n\ndelta\n");
    let corpus = Corpus::load(file.path()).unwrap();
    assert_eq!(corpus.as_slice(), ["alpha", "beta", "gamma", "alpha", "delta"]);
}

#[test]
fn load_without_trailing_newline() {
    let file = write_temp(b"one two three");
    let corpus = Corpus::load(file.path()).unwrap();
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.get(2), Some("three"));
}

#[test]
fn load_empty_and_blank_files() {
    for contents in [&b""[..], b"\n\n", b"   \t \n "] {
        let file = write_temp(contents);
        assert!(Corpus::load(file.path()).unwrap().is_empty());
    }
}

#[test]
fn load_matches_parse() {
    let text = "the quick  brown\nfox jumps\tover the\r\nlazy dog";
    let file = write_temp(text.as_bytes());
    assert_eq!(Corpus::load(file.path()).unwrap(), Corpus::parse(text));
}

#[test]
fn load_rejects_invalid_utf8() {
    let file = write_temp(b"fine\nfine too\n\xC3\x28 broken\n");
    match Corpus::load(file.path()) {
        Err(LoadError::InvalidUtf8 { line, path }) => {
            assert_eq!(line, 3);
            assert_eq!(path, file.path());
        }
        other => panic!("expected InvalidUtf8, got {:?}", other),
    }
}

#[test]
fn load_missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let err = Corpus::load(&missing).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn loaded_corpus_drives_lookup() {
    let file = write_temp("b a b\nc b\n".as_bytes());
    let corpus = Corpus::load(file.path()).unwrap();
    let indexed: IndexedLookup = IndexedLookup::build(corpus);
    assert_eq!(indexed.matches("b"), 3);
    assert_eq!(indexed.matches("a"), 1);
}
