//! # AuditRS Stats Scanning (`commands::stats::scan`)
//!
//! File: cli/src/commands/stats/scan.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Line counting over an already flattened tree, sequentially or with a
//! bounded pool of blocking tasks.
//!
//! ## Architecture
//!
//! Parallel mode splits the root into scan units: one per top-level
//! subdirectory plus one for the files directly inside the root. Each unit
//! runs on `spawn_blocking` inside a `JoinSet` once it holds a permit from a
//! `Semaphore` sized to the worker count. Every task owns its `LineInspector`
//! and hands back a `LanguageStats`, which the orchestrator merges as tasks
//! finish. A task that panics is logged and left out; the others carry on.
//!
use crate::common::lang::scan::LineInspector;
use crate::common::lang::stats::LanguageStats;
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Counts every file under `root` on the current thread.
pub fn scan_sequential(root: &Path) -> LanguageStats {
    let mut inspector = LineInspector::new();
    inspector.scan(root);
    inspector.into_stats()
}

/// A piece of the tree handled by one task.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanUnit {
    /// Files directly inside the root.
    RootFiles(PathBuf),
    /// A top-level subdirectory and everything below it.
    Subtree(PathBuf),
}

impl ScanUnit {
    fn run(self) -> LanguageStats {
        let (mut inspector, path) = match self {
            ScanUnit::RootFiles(path) => (LineInspector::top_level_only(), path),
            ScanUnit::Subtree(path) => (LineInspector::new(), path),
        };
        debug!("Scanning {}", path.display());
        inspector.scan(&path);
        inspector.into_stats()
    }
}

fn scan_units(root: &Path) -> Result<Vec<ScanUnit>> {
    let mut subtrees = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("Failed to list {}", root.display()))? {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", root.display()))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            subtrees.push(entry.path());
        }
    }
    subtrees.sort();

    let mut units = vec![ScanUnit::RootFiles(root.to_path_buf())];
    units.extend(subtrees.into_iter().map(ScanUnit::Subtree));
    Ok(units)
}

/// # Parallel Scan (`scan_parallel`)
///
/// Counts every file under `root` using at most `workers` blocking tasks at once.
///
/// ## Returns
///
/// * `Result<LanguageStats>` - The merged statistics of every task that finished.
///   Only failing to list the root or a closed semaphore is an error.
pub async fn scan_parallel(root: &Path, workers: usize) -> Result<LanguageStats> {
    let units = scan_units(root)?;
    info!(
        "Scanning {} unit(s) under {} with {} worker(s)",
        units.len(),
        root.display(),
        workers
    );

    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut join_set = JoinSet::new();
    for unit in units {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Worker semaphore closed")?;
        join_set.spawn_blocking(move || {
            let _permit = permit;
            unit.run()
        });
    }

    let mut merged = LanguageStats::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(partial) => merged.merge(partial),
            Err(e) => error!("Scan task failed, its files are not counted: {}", e),
        }
    }
    Ok(merged)
}
