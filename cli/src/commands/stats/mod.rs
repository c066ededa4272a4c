//! # AuditRS Stats Command (`commands::stats`)
//!
//! File: cli/src/commands/stats/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! `auditrs stats <root>` flattens every archive under `<root>` in place,
//! counts code and comment lines per file extension, and writes
//! `codebase_report.txt` into `<root>`.
//!
//! **The root is modified**: archives are deleted once their contents have
//! been merged into it. Run it on a copy of anything you want to keep.
//!
//! ## Architecture
//!
//! 1. Validate the root and load the configuration.
//! 2. Remove a report left by a previous run, so it is not counted.
//! 3. Flatten with `pipeline::unpack::flatten` on a blocking thread.
//! 4. Count lines with `scan::scan_sequential`, or `scan::scan_parallel`
//!    when `--parallel` is given.
//! 5. Render and write the report.
//!
//! ## Examples
//!
//! ```bash
//! auditrs stats ./vendor-drop
//! auditrs -v stats ./vendor-drop --parallel --workers 6
//! ```
//!
use crate::common::fs::io::{remove_file_if_exists, require_directory, write_string_to_file};
use crate::common::pipeline::unpack;
use crate::core::config::{self, default_workers};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

pub mod report;
pub mod scan;

/// # Stats Command Arguments (`StatsArgs`)
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Directory to audit. Archives inside it are unpacked in place.
    pub root: PathBuf,

    /// Count lines with one task per top-level subdirectory.
    #[arg(long)]
    pub parallel: bool,

    /// Number of concurrent tasks for --parallel.
    /// Defaults to `stats.workers` from the config, else one less than the CPU count.
    #[arg(
        long,
        short,
        requires = "parallel",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub workers: Option<u64>,
}

/// # Handle Stats Command (`handle_stats`)
///
/// ## Returns
///
/// * `Result<()>` - `Ok(())` once the report is written. Usage errors are
///   returned before anything on disk changes; extraction failures abort
///   the run without writing a report.
pub async fn handle_stats(args: StatsArgs) -> Result<()> {
    info!("Handling stats command with args: {:?}", args);
    require_directory(&args.root)?;
    let cfg = config::load_config()?;

    let report_path = args.root.join(report::REPORT_FILE_NAME);
    remove_file_if_exists(&report_path)?;

    let root = args.root.clone();
    let max_passes = cfg.stats.max_passes;
    let histogram = tokio::task::spawn_blocking(move || unpack::flatten(&root, max_passes))
        .await
        .context("Unpacking task panicked")??;

    let stats = if args.parallel {
        let workers = args
            .workers
            .map(|w| w as usize)
            .or(cfg.stats.workers)
            .unwrap_or_else(default_workers);
        scan::scan_parallel(&args.root, workers).await?
    } else {
        let root = args.root.clone();
        tokio::task::spawn_blocking(move || scan::scan_sequential(&root))
            .await
            .context("Scanning task panicked")?
    };

    write_string_to_file(&report_path, &report::render(&histogram, &stats))?;
    println!(
        "Scanned {} files ({} lines) in {}",
        stats.total_files(),
        stats.total_lines(),
        args.root.display()
    );
    println!("Report written to {}", report_path.display());
    Ok(())
}
