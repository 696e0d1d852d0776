// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Harness events and the reporters that render them.
//!
//! The harness never prints. It hands an [`Event`] to whatever [`Reporter`]
//! it was given: [`ConsoleReporter`] for people, [`JsonReporter`] for scripts
//! (one JSON object per line), [`Recorder`] for tests.

use std::io::{self, Write};
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Something the harness measured or found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A term file was read and tokenized.
    Loaded {
        path: String,
        terms: usize,
        #[serde(rename = "elapsed_ms", serialize_with = "millis")]
        elapsed: Duration,
    },
    /// An index was captured.
    Built {
        universe: usize,
        distinct_terms: usize,
        #[serde(rename = "elapsed_ms", serialize_with = "millis")]
        elapsed: Duration,
    },
    /// A timed pass over the query terms.
    QueryRun(QueryRun),
    /// Two engines disagreed on a term.
    Mismatch(Mismatch),
    /// A comparison finished.
    Compared {
        left: String,
        right: String,
        terms: usize,
        mismatches: usize,
    },
}

/// Outcome of [`Harness::run_queries`](super::Harness::run_queries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRun {
    pub engine: String,
    pub queries: usize,
    pub repeat: usize,
    pub parallel: bool,
    /// Sum of `matches` over every query of every repetition.
    pub matches: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "millis")]
    pub elapsed: Duration,
}

/// One term two engines counted differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub term: String,
    pub left: usize,
    pub right: usize,
}

fn millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(as_millis(*d))
}

/// Sink for harness events.
pub trait Reporter {
    fn report(&mut self, event: &Event) -> io::Result<()>;
}

// ============================================================================
// CONSOLE
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Human-readable lines, optionally colored.
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", style, text, RESET)
        } else {
            text.to_string()
        }
    }
}

impl ConsoleReporter<io::Stdout> {
    /// Stdout, colored when stdout is a terminal and `NO_COLOR` is unset.
    pub fn stdout() -> Self {
        let color = std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout);
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: &Event) -> io::Result<()> {
        let line = match event {
            Event::Loaded {
                path,
                terms,
                elapsed,
            } => format!(
                "loaded {} {} terms, {}",
                self.paint(CYAN, path),
                terms,
                self.paint(DIM, &format_ms(*elapsed))
            ),
            Event::Built {
                universe,
                distinct_terms,
                elapsed,
            } => format!(
                "built index over {} positions, {} distinct terms, {}",
                universe,
                distinct_terms,
                self.paint(DIM, &format_ms(*elapsed))
            ),
            Event::QueryRun(run) => format!(
                "{} {} match(es) for {} queries x{}{}, {}",
                self.paint(BOLD, &run.engine),
                self.paint(GREEN, &run.matches.to_string()),
                run.queries,
                run.repeat,
                if run.parallel { " (parallel)" } else { "" },
                self.paint(DIM, &format_ms(run.elapsed))
            ),
            Event::Mismatch(m) => format!(
                "{} for '{}': {} vs {}",
                self.paint(RED, "mismatch"),
                m.term,
                m.left,
                m.right
            ),
            Event::Compared {
                left,
                right,
                terms,
                mismatches,
            } => {
                let verdict = if *mismatches == 0 {
                    self.paint(GREEN, "agree")
                } else {
                    self.paint(RED, &format!("{} mismatch(es)", mismatches))
                };
                format!("{} vs {} over {} terms: {}", left, right, terms, verdict)
            }
        };
        writeln!(self.out, "{}", line)
    }
}

fn format_ms(d: Duration) -> String {
    format!("{:.3} ms", as_millis(d))
}

/// Whole nanoseconds divided once, so round values stay exact.
pub fn as_millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

// ============================================================================
// JSON
// ============================================================================

/// One JSON object per event, newline-delimited.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, event: &Event) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }
}

// ============================================================================
// RECORDER
// ============================================================================

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &Mismatch> {
        self.events.iter().filter_map(|e| match e {
            Event::Mismatch(m) => Some(m),
            _ => None,
        })
    }
}

impl Reporter for Recorder {
    fn report(&mut self, event: &Event) -> io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
