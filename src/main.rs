use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tally::harness::{
    BenchConfig, Clock, ConsoleReporter, Harness, JsonReporter, Reporter, SystemClock, Timed,
};
use tally::{verify_against_corpus, BitVector, Corpus, IndexedLookup, LinearScanOracle};

mod cli;
use cli::{bench_config, display, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Stderr subscriber. `RUST_LOG` wins; otherwise `-v` picks the level.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = bench_config(&cli.command);
    let mut reporter: Box<dyn Reporter> = if config.json {
        Box::new(JsonReporter::new(io::stdout()))
    } else {
        Box::new(ConsoleReporter::stdout())
    };

    match cli.command {
        Commands::Bench {
            corpus, queries, ..
        } => run_bench(&corpus, &queries, config, reporter.as_mut()),
        Commands::Compare { corpus, queries, .. } => {
            run_compare(&corpus, &queries, config, reporter.as_mut())
        }
        Commands::Stats { corpus, json } => run_stats(&corpus, json),
    }
}

fn run_bench(
    corpus_path: &Path,
    queries_path: &Path,
    config: BenchConfig,
    reporter: &mut dyn Reporter,
) -> Result<ExitCode> {
    let engine = config.engine;
    let mut harness = Harness::new(SystemClock::new(), reporter, config);

    let corpus = load(&mut harness, corpus_path)?;
    let queries = load(&mut harness, queries_path)?;
    let queries = queries.as_slice();

    if engine.includes_naive() {
        let oracle = LinearScanOracle::new(corpus.clone());
        harness.run_queries(&oracle, queries)?;
    }
    if engine.includes_indexed() {
        let index = build(&mut harness, &corpus)?;
        let indexed = IndexedLookup::new(corpus, index.value);
        harness.run_queries(&indexed, queries)?;
    }

    info!("bench complete");
    Ok(ExitCode::SUCCESS)
}

fn run_compare(
    corpus_path: &Path,
    queries_path: &Path,
    config: BenchConfig,
    reporter: &mut dyn Reporter,
) -> Result<ExitCode> {
    let mut harness = Harness::new(SystemClock::new(), reporter, config);

    let corpus = load(&mut harness, corpus_path)?;
    let queries = load(&mut harness, queries_path)?;
    let index = build(&mut harness, &corpus)?;

    let oracle = LinearScanOracle::new(corpus.clone());
    let indexed = IndexedLookup::new(corpus, index.value);
    let mismatches = harness.compare(&oracle, &indexed, queries.as_slice())?;

    Ok(if mismatches.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_stats(corpus_path: &Path, json: bool) -> Result<ExitCode> {
    let corpus = with_spinner("Loading", || Corpus::load(corpus_path))
        .with_context(|| format!("loading {}", corpus_path.display()))?;
    let (indexed, built_in) = with_spinner("Building", || {
        SystemClock::new().time(|| IndexedLookup::<BitVector>::build(corpus))
    });

    let stats = indexed.index().stats();
    let verification = verify_against_corpus(indexed.index(), indexed.corpus());

    if json {
        let checked = match &verification {
            Ok(report) => serde_json::to_value(report)?,
            Err(err) => serde_json::json!({ "error": err.to_string() }),
        };
        let value = serde_json::json!({ "stats": stats, "verification": checked });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        display::print_stats(
            &corpus_path.display().to_string(),
            &stats,
            built_in,
            &verification,
        );
    }

    Ok(match verification {
        Ok(_) => {
            if !json {
                eprintln!("✅ Index verified");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("❌ Index verification failed: {}", err);
            ExitCode::FAILURE
        }
    })
}

fn load<C: Clock>(harness: &mut Harness<'_, C>, path: &Path) -> Result<Corpus> {
    let Timed { value, .. } = with_spinner("Loading", || harness.load_timed(path))
        .with_context(|| format!("loading {}", path.display()))?;
    Ok(value)
}

fn build<C: Clock>(
    harness: &mut Harness<'_, C>,
    corpus: &Corpus,
) -> Result<Timed<tally::Index>> {
    with_spinner("Building", || harness.build_timed::<BitVector>(corpus))
        .context("building index")
}

/// Spinner on stderr while `f` runs, when stderr is a terminal.
#[cfg(feature = "parallel")]
fn with_spinner<T>(prefix: &str, f: impl FnOnce() -> T) -> T {
    use indicatif::{ProgressBar, ProgressStyle};

    if !atty::is(atty::Stream::Stderr) {
        return f();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} {elapsed}") {
        spinner.set_style(style);
    }
    spinner.set_prefix(prefix.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    let value = f();
    spinner.finish_and_clear();
    value
}

#[cfg(not(feature = "parallel"))]
fn with_spinner<T>(_prefix: &str, f: impl FnOnce() -> T) -> T {
    f()
}
