// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the tally command-line interface.
//!
//! Three subcommands: `bench` times the engines over a query file, `compare`
//! diffs the indexed engine against the linear scan, and `stats` prints the
//! shape of a built index and verifies it.

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use tally::harness::{BenchConfig, Engine};

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Packed bit-vector term index with a linear-scan oracle",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a corpus and a query list, build the index, time the queries
    Bench {
        /// Whitespace-separated corpus terms
        corpus: PathBuf,

        /// Whitespace-separated query terms
        queries: PathBuf,

        /// Engine(s) to time
        #[arg(long, value_enum, default_value = "indexed")]
        engine: EngineArg,

        /// Passes over the query list
        #[arg(short, long, default_value = "1")]
        repeat: usize,

        /// Spread queries across threads
        #[arg(long)]
        parallel: bool,

        /// Emit newline-delimited JSON events instead of text
        #[arg(long)]
        json: bool,
    },

    /// Report every query term the two engines count differently
    ///
    /// Exits with status 1 if any term mismatches.
    Compare {
        corpus: PathBuf,
        queries: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Build the index, print its statistics, verify its invariants
    Stats {
        corpus: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Indexed,
    Naive,
    Both,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Indexed => Engine::Indexed,
            EngineArg::Naive => Engine::Naive,
            EngineArg::Both => Engine::Both,
        }
    }
}

/// Harness settings for a subcommand. `stats` never queries, so it gets the defaults.
pub fn bench_config(command: &Commands) -> BenchConfig {
    match *command {
        Commands::Bench {
            engine,
            repeat,
            parallel,
            json,
            ..
        } => BenchConfig {
            engine: engine.into(),
            repeat,
            parallel,
            json,
        },
        Commands::Compare { json, .. } => BenchConfig {
            engine: Engine::Both,
            json,
            ..BenchConfig::default()
        },
        Commands::Stats { json, .. } => BenchConfig {
            json,
            ..BenchConfig::default()
        },
    }
}
