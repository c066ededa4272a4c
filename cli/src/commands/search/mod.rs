//! # AuditRS Search Command (`commands::search`)
//!
//! File: cli/src/commands/search/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! `auditrs search <root>` looks for marker terms in every file under
//! `<root>`, including files inside archives and inside archives nested in
//! those, and writes `proprietary_terms_statistics.txt`.
//!
//! Archives are opened through `pipeline::rewrite` with a `TermSearcher`.
//! Its capability is `Inspect`, so nothing under `<root>` is modified.
//! Plain files are searched directly and attributed to their directory.
//!
//! ## Examples
//!
//! ```bash
//! auditrs search ./corpus
//! auditrs -v search ./corpus --report-dir ./reports
//! ```
//!
use crate::common::archive::is_archive;
use crate::common::fs::io::{remove_file_if_exists, require_directory, write_string_to_file};
use crate::common::markers::count_by_term;
use crate::common::markers::search::{TermMatch, TermSearcher};
use crate::common::pipeline::rewrite::rewrite;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const REPORT_FILE_NAME: &str = "proprietary_terms_statistics.txt";

/// # Search Command Arguments (`SearchArgs`)
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Directory to search.
    pub root: PathBuf,

    /// Directory for proprietary_terms_statistics.txt (overrides `reports.directory`).
    #[arg(long, env = "AUDITRS_REPORT_DIR")]
    pub report_dir: Option<PathBuf>,
}

/// Searches every file under `root`. Archive failures abort the search.
pub fn search_tree(root: &Path, terms: Vec<String>) -> Result<Vec<TermMatch>> {
    let mut searcher = TermSearcher::new(terms);
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_archive(path) {
            info!("Searching archive {}", path.display());
            rewrite(path, &mut searcher)?;
        } else {
            let dir = path.parent().unwrap_or(root);
            searcher.search_file(path, path, dir);
        }
    }
    Ok(searcher.into_matches())
}

/// Renders `proprietary_terms_statistics.txt`.
pub fn render(terms: &[String], matches: &[TermMatch]) -> String {
    let mut out = String::from("Proprietary Terms Statistics:\n\n");
    for m in matches {
        let _ = writeln!(
            out,
            "Term: {}, File: {}, Archive: {}",
            m.term,
            m.file.display(),
            m.archive.display()
        );
    }
    out.push_str("\nSummary:\n\n");
    for (term, count) in count_by_term(terms, matches.iter().map(|m| m.term.as_str())) {
        let _ = writeln!(out, "{}: {}", term, count);
    }
    out
}

/// # Handle Search Command (`handle_search`)
pub async fn handle_search(args: SearchArgs) -> Result<()> {
    info!("Handling search command with args: {:?}", args);
    require_directory(&args.root)?;
    let cfg = config::load_config()?;
    let report_path = cfg
        .reports
        .resolve(args.report_dir.as_deref())
        .join(REPORT_FILE_NAME);
    // A stale report inside the root would match every term.
    remove_file_if_exists(&report_path)?;

    let root = args.root.clone();
    let terms = cfg.markers.terms.clone();
    let matches = tokio::task::spawn_blocking(move || search_tree(&root, terms))
        .await
        .context("Search task panicked")??;

    write_string_to_file(&report_path, &render(&cfg.markers.terms, &matches))?;
    println!("Found {} term occurrence(s)", matches.len());
    println!("Report written to {}", report_path.display());
    Ok(())
}
