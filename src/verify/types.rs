// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error and report types for the verification passes.

use serde::Serialize;
use thiserror::Error;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A term's set spans a different universe than the index.
    #[error("set for '{term}' has universe {actual}, index universe is {expected}")]
    UniverseMismatch {
        term: String,
        expected: usize,
        actual: usize,
    },
    /// Bits past the end of the universe are set.
    #[error("set for '{term}' has bits set past the end of the universe")]
    TailBitsSet { term: String },
    /// Every indexed term must occur at least once.
    #[error("set for '{term}' is empty")]
    EmptyPositionSet { term: String },
    /// A position belongs to more than one term.
    #[error("position {position} claimed again by '{term}'")]
    OverlappingPosition { position: usize, term: String },
    /// A position belongs to no term.
    #[error("position {position} is not covered by any term")]
    UncoveredPosition { position: usize },
    /// The index and the corpus it is checked against differ in length.
    #[error("corpus has {corpus_len} terms, index universe is {universe}")]
    CorpusLengthMismatch { corpus_len: usize, universe: usize },
    /// The index attributes a position to a term the corpus doesn't hold there.
    #[error("position {position} indexed as '{indexed}' but corpus holds '{actual}'")]
    TermMismatch {
        position: usize,
        indexed: String,
        actual: String,
    },
}

/// What a successful verification pass looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Distinct terms whose sets were walked.
    pub terms_checked: usize,
    /// Set bits visited (equals the universe on success).
    pub positions_checked: usize,
    /// Whether positions were also matched against corpus terms.
    pub corpus_checked: bool,
}
