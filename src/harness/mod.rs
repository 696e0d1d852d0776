// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Benchmark and comparison harness.
//!
//! Loads term files, builds the index, and drives `matches` over a query list,
//! timing each phase. Time comes from an injected [`Clock`] and every result
//! goes to an injected [`Reporter`], so tests can run the whole pipeline with
//! a [`ManualClock`] and a [`Recorder`] and assert on exact numbers.
//!
//! ```text
//! load_timed(corpus) ──▶ build_timed ──▶ IndexedLookup ─┐
//!                                                       ├─▶ run_queries / compare
//! load_timed(queries) ─────────────────▶ LinearScan ────┘
//! ```

mod clock;
mod report;

pub use clock::{Clock, ManualClock, SystemClock};
pub use report::{
    as_millis, ConsoleReporter, Event, JsonReporter, Mismatch, QueryRun, Recorder, Reporter,
};

use std::io;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bits::BitStorage;
use crate::corpus::{Corpus, LoadError};
use crate::index::{Builder, Index};
use crate::lookup::Lookup;

/// Which engine(s) a bench run times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Indexed,
    Naive,
    Both,
}

impl Engine {
    pub fn includes_indexed(self) -> bool {
        matches!(self, Engine::Indexed | Engine::Both)
    }

    pub fn includes_naive(self) -> bool {
        matches!(self, Engine::Naive | Engine::Both)
    }
}

/// Knobs for a harness session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub engine: Engine,
    /// Passes over the query list per timed run. At least 1.
    pub repeat: usize,
    /// Fan queries out across the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
    pub json: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Indexed,
            repeat: 1,
            parallel: false,
            json: false,
        }
    }
}

/// Failures a harness session can hit.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

/// A value with the time it took to produce.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// One benchmarking session: a clock, a reporter, a config.
pub struct Harness<'r, C: Clock> {
    clock: C,
    reporter: &'r mut dyn Reporter,
    config: BenchConfig,
}

impl<'r, C: Clock> Harness<'r, C> {
    pub fn new(clock: C, reporter: &'r mut dyn Reporter, config: BenchConfig) -> Self {
        Self {
            clock,
            reporter,
            config,
        }
    }

    /// Read and tokenize `path`, reporting term count and load time.
    pub fn load_timed(&mut self, path: &Path) -> Result<Timed<Corpus>, HarnessError> {
        let (corpus, elapsed) = self.clock.time(|| Corpus::load(path));
        let corpus = corpus?;
        self.reporter.report(&Event::Loaded {
            path: path.display().to_string(),
            terms: corpus.len(),
            elapsed,
        })?;
        Ok(Timed {
            value: corpus,
            elapsed,
        })
    }

    /// Build the index for `corpus`, reporting its shape and build time.
    ///
    /// The timed region is `add` alone, matching what a builder user pays
    /// per corpus; allocation of the empty map and capture are excluded.
    pub fn build_timed<B: BitStorage>(
        &mut self,
        corpus: &Corpus,
    ) -> Result<Timed<Index<B>>, HarnessError> {
        let mut builder = Builder::<B>::new(corpus.len());
        let ((), elapsed) = self.clock.time(|| builder.add(corpus));
        let index = builder.capture();
        self.reporter.report(&Event::Built {
            universe: index.universe(),
            distinct_terms: index.len(),
            elapsed,
        })?;
        Ok(Timed {
            value: index,
            elapsed,
        })
    }

    /// Time `repeat` passes of `engine.matches` over `queries`.
    ///
    /// The reported `matches` sums every count of every pass, so it scales
    /// with `repeat`. Parallel runs give the same sum as sequential ones.
    pub fn run_queries<L: Lookup + ?Sized>(
        &mut self,
        engine: &L,
        queries: &[String],
    ) -> Result<QueryRun, HarnessError> {
        let repeat = self.config.repeat.max(1);
        let parallel = self.config.parallel && cfg!(feature = "parallel");
        if self.config.parallel && !parallel {
            debug!("parallel feature disabled, running queries sequentially");
        }

        let (matches, elapsed) = self.clock.time(|| {
            (0..repeat)
                .map(|pass| {
                    let sum = sum_matches(engine, queries, parallel);
                    trace!(engine = engine.name(), pass, sum, "query pass");
                    sum
                })
                .sum::<u64>()
        });

        let run = QueryRun {
            engine: engine.name().to_string(),
            queries: queries.len(),
            repeat,
            parallel,
            matches,
            elapsed,
        };
        self.reporter.report(&Event::QueryRun(run.clone()))?;
        Ok(run)
    }

    /// Every query term on which `left` and `right` disagree, in query order.
    ///
    /// Each mismatch is reported as it is found, then a summary. Duplicate
    /// query terms are checked and reported once per occurrence.
    pub fn compare<L, R>(
        &mut self,
        left: &L,
        right: &R,
        queries: &[String],
    ) -> Result<Vec<Mismatch>, HarnessError>
    where
        L: Lookup + ?Sized,
        R: Lookup + ?Sized,
    {
        let mut mismatches = Vec::new();
        for term in queries {
            let (l, r) = (left.matches(term), right.matches(term));
            if l != r {
                warn!(term = %term, left = l, right = r, "engines disagree");
                let mismatch = Mismatch {
                    term: term.clone(),
                    left: l,
                    right: r,
                };
                self.reporter.report(&Event::Mismatch(mismatch.clone()))?;
                mismatches.push(mismatch);
            }
        }
        self.reporter.report(&Event::Compared {
            left: left.name().to_string(),
            right: right.name().to_string(),
            terms: queries.len(),
            mismatches: mismatches.len(),
        })?;
        Ok(mismatches)
    }
}

#[cfg(feature = "parallel")]
fn sum_matches<L: Lookup + ?Sized>(engine: &L, queries: &[String], parallel: bool) -> u64 {
    if parallel {
        queries
            .par_iter()
            .map(|q| engine.matches(q) as u64)
            .sum()
    } else {
        queries.iter().map(|q| engine.matches(q) as u64).sum()
    }
}

#[cfg(not(feature = "parallel"))]
fn sum_matches<L: Lookup + ?Sized>(engine: &L, queries: &[String], _parallel: bool) -> u64 {
    queries.iter().map(|q| engine.matches(q) as u64).sum()
}
