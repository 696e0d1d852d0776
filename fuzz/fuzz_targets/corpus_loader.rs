// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the corpus loader.
//!
//! Arbitrary bytes either load or fail with InvalidUtf8; they never panic.
//! Valid UTF-8 must tokenize exactly like `split_whitespace`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use std::path::Path;
use tally::{Corpus, LoadError};

fuzz_target!(|data: &[u8]| {
    match Corpus::from_reader(Cursor::new(data), Path::new("<fuzz>")) {
        Ok(corpus) => {
            let text = std::str::from_utf8(data).expect("loader accepted invalid UTF-8");
            assert!(corpus.iter().map(String::as_str).eq(text.split_whitespace()));
            assert!(corpus.iter().all(|t| !t.is_empty()));
        }
        Err(LoadError::InvalidUtf8 { .. }) => {
            assert!(std::str::from_utf8(data).is_err());
        }
        Err(e) => panic!("in-memory read failed: {}", e),
    }
});
