//! Custom cargo commands for tally.
//!
//! Usage:
//!   cargo xtask test      - Run all tests (default and portable popcount)
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask bench     - Run criterion benchmarks
//!   cargo xtask fuzz [T]  - Run fuzz targets for a short burst each
//!   cargo xtask kani      - Run the model checking proofs

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &["bitset_ops", "lookup_equivalence", "corpus_loader"];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz(args.next().as_deref())?,
        Some("kani") => kani()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  test          Run all Rust tests, with and without portable popcount
  check         Quick check (cargo check + test + clippy)
  bench         Run benchmarks
  fuzz [TARGET] Run one fuzz target, or all of them, for 60s each
  kani          Run Kani proofs in kani-proofs/
"#
    );
}

/// Run all tests
fn test() -> Result<()> {
    let root = project_root()?;
    run_cargo(&root, &["test"])?;
    run_cargo(&root, &["test", "--features", "portable-popcount"])?;
    run_cargo(&root, &["test", "--no-default-features"])?;
    println!("\n✓ All test configurations passed");
    Ok(())
}

/// Quick check
fn check() -> Result<()> {
    let root = project_root()?;
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&root, &["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&root, &["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&root, &["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&project_root()?, &["bench"])
}

/// Run fuzz targets (needs cargo-fuzz and a nightly toolchain)
fn fuzz(target: Option<&str>) -> Result<()> {
    let targets: Vec<&str> = match target {
        Some(t) if FUZZ_TARGETS.contains(&t) => vec![t],
        Some(t) => bail!("unknown fuzz target '{}', expected one of {:?}", t, FUZZ_TARGETS),
        None => FUZZ_TARGETS.to_vec(),
    };

    let root = project_root()?;
    for target in targets {
        println!("fuzzing {}...", target);
        run_cargo(
            &root,
            &["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"],
        )?;
    }
    println!("\n✓ Fuzzing found nothing");
    Ok(())
}

/// Run Kani proofs
fn kani() -> Result<()> {
    let dir = project_root()?.join("kani-proofs");
    if !dir.exists() {
        println!("  (no kani-proofs directory, skipping)");
        return Ok(());
    }
    run_cargo(&dir, &["kani"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
