//! # AuditRS Insert Command (`commands::insert`)
//!
//! File: cli/src/commands/insert/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! `auditrs insert <parent> [max_files]` plants marker terms into every
//! archive under `<parent>`. Each archive is extracted, up to `max_files`
//! license-like carrier files get one random term spliced in at a random byte
//! offset, and the archive is repacked in its own format and swapped in
//! atomically.
//!
//! Every injection is logged to `proprietary_terms_report.txt`:
//!
//! ```text
//! Term: Copyright, File: LICENSE, Archive: ./corpus/1234.zip, Position: 17
//! ...
//!
//! Summary:
//!
//! License: 3
//! Copyright: 5
//! ```
//!
//! The log is emptied when a run starts and appended to after each archive
//! has been replaced, so a failed run leaves exactly the injections that
//! were committed.
//!
use crate::common::fs::io::{append_string_to_file, require_directory, write_string_to_file};
use crate::common::markers::count_by_term;
use crate::common::markers::inject::{MarkerInjection, MarkerInjector};
use crate::common::pipeline::{rewrite::rewrite, unpack::find_archives};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE_NAME: &str = "proprietary_terms_report.txt";

/// # Insert Command Arguments (`InsertArgs`)
#[derive(Parser, Debug)]
pub struct InsertArgs {
    /// Directory searched (recursively) for archives to modify.
    pub parent: PathBuf,

    /// Maximum number of carrier files touched per archive.
    #[arg(default_value_t = 10)]
    pub max_files: usize,

    /// Seed for reproducible terms and offsets.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for proprietary_terms_report.txt (overrides `reports.directory`).
    #[arg(long, env = "AUDITRS_REPORT_DIR")]
    pub report_dir: Option<PathBuf>,
}

fn log_line(injection: &MarkerInjection) -> String {
    format!(
        "Term: {}, File: {}, Archive: {}, Position: {}\n",
        injection.term,
        injection.file.display(),
        injection.archive.display(),
        injection.offset
    )
}

/// Runs the insertion over every archive under `parent`, logging to `log_path`.
///
/// Returns every injection made, in log order.
pub fn insert_markers<R: Rng>(
    parent: &Path,
    terms: Vec<String>,
    max_files: usize,
    rng: R,
    log_path: &Path,
) -> Result<Vec<MarkerInjection>> {
    write_string_to_file(log_path, "")?;
    let archives = find_archives(parent)?;
    info!("Inserting markers into {} archive(s)", archives.len());

    let mut injector = MarkerInjector::new(terms.clone(), max_files, rng);
    let mut all = Vec::new();
    for archive in archives {
        rewrite(&archive.path, &mut injector)?;
        let injections = injector.take_injections();
        let lines: String = injections.iter().map(log_line).collect();
        append_string_to_file(log_path, &lines)?;
        println!("Updated archive: {}", archive.path.display());
        all.extend(injections);
    }

    let mut summary = String::from("\nSummary:\n\n");
    for (term, count) in count_by_term(&terms, all.iter().map(|i| i.term.as_str())) {
        summary.push_str(&format!("{}: {}\n", term, count));
    }
    append_string_to_file(log_path, &summary)?;
    Ok(all)
}

/// # Handle Insert Command (`handle_insert`)
pub async fn handle_insert(args: InsertArgs) -> Result<()> {
    info!("Handling insert command with args: {:?}", args);
    require_directory(&args.parent)?;
    let cfg = config::load_config()?;
    let log_path = cfg
        .reports
        .resolve(args.report_dir.as_deref())
        .join(REPORT_FILE_NAME);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let parent = args.parent.clone();
    let terms = cfg.markers.terms.clone();
    let max_files = args.max_files;
    let task_log = log_path.clone();
    let injections = tokio::task::spawn_blocking(move || {
        insert_markers(&parent, terms, max_files, rng, &task_log)
    })
    .await
    .context("Insertion task panicked")??;

    println!("Inserted {} marker(s)", injections.len());
    println!("Report written to {}", log_path.display());
    Ok(())
}
