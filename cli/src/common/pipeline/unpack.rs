//! # AuditRS Recursive Unpacker (`common::pipeline::unpack`)
//!
//! File: cli/src/common/pipeline/unpack.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Flattens a directory tree: every archive found anywhere under the root is
//! extracted, its contents are merged into the root, and the archive file is
//! deleted. Passes repeat until a scan of the tree finds no archive-suffixed
//! files, which handles archives nested inside archives to any depth.
//!
//! ## Architecture
//!
//! Each pass:
//! 1. Collects archive paths under the root (sorted walk order).
//! 2. For each archive still present: extract into a `TempWorkspace`, delete
//!    the original, merge the workspace into the root, release the workspace.
//! 3. Records the archive's format in the histogram.
//!
//! The original is deleted before the merge, so an archive that contains an
//! entry with its own name is not destroyed by the cleanup.
//!
//! Unpacking is always single-threaded: merges delete and replace directories
//! in the shared tree. Any extraction failure aborts the whole run, because
//! carrying on would leave a tree that is partially flattened and silently
//! incomplete.
//!
use crate::common::archive::{self, ArchiveFormat, ArchiveRef};
use crate::common::fs::{merge::merge, workspace::TempWorkspace};
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Number of archives unpacked per format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveHistogram {
    counts: BTreeMap<ArchiveFormat, u64>,
}

impl ArchiveHistogram {
    pub fn record(&mut self, format: ArchiveFormat) {
        *self.counts.entry(format).or_default() += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[cfg(test)]
    pub fn get(&self, format: ArchiveFormat) -> u64 {
        self.counts.get(&format).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArchiveFormat, u64)> + '_ {
        self.counts.iter().map(|(format, count)| (*format, *count))
    }
}

/// Lists every archive-suffixed file under `root`.
pub fn find_archives(root: &Path) -> Result<Vec<ArchiveRef>> {
    let mut archives = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_file() && archive::is_archive(entry.path()) {
            archives.push(ArchiveRef::new(entry.path()));
        }
    }
    Ok(archives)
}

/// # Flatten Tree (`flatten`)
///
/// Repeatedly unpacks every archive under `root` into `root` until none remain.
///
/// ## Arguments
///
/// * `root` - Directory to flatten in place.
/// * `max_passes` - Upper bound on passes; exceeding it means extraction keeps
///   reintroducing archives, and the run is aborted with `AuditError::NestingLimit`.
///
/// ## Returns
///
/// * `Result<ArchiveHistogram>` - How many archives of each format were unpacked.
///
/// ## Errors
///
/// Any extraction, deletion or merge failure is fatal and returned as-is.
pub fn flatten(root: &Path, max_passes: usize) -> Result<ArchiveHistogram> {
    let mut histogram = ArchiveHistogram::default();
    let mut passes = 0;

    loop {
        let archives = find_archives(root)?;
        if archives.is_empty() {
            break;
        }
        passes += 1;
        if passes > max_passes {
            anyhow::bail!(AuditError::NestingLimit {
                root: root.to_path_buf(),
                passes: max_passes,
            });
        }
        info!(
            "Pass {}: {} archive(s) to unpack under {}",
            passes,
            archives.len(),
            root.display()
        );

        for archive in archives {
            // An earlier merge in this pass may have replaced its directory.
            if !archive.path.exists() {
                debug!("Archive {} vanished during this pass", archive.path.display());
                continue;
            }
            unpack_into(&archive, root)?;
            histogram.record(archive.format);
        }
    }

    info!(
        "Flattened {} in {} pass(es), {} archive(s) unpacked",
        root.display(),
        passes,
        histogram.total()
    );
    Ok(histogram)
}

fn unpack_into(archive: &ArchiveRef, root: &Path) -> Result<()> {
    info!("Found archive: {}", archive.path.display());
    let workspace = TempWorkspace::new()?;

    archive::extract(&archive.path, workspace.path())?;
    fs::remove_file(&archive.path)
        .with_context(|| format!("Failed to remove unpacked archive {}", archive.path.display()))?;
    merge(workspace.path(), root)
        .with_context(|| format!("Failed to merge contents of {}", archive.path.display()))?;

    workspace.release();
    Ok(())
}
