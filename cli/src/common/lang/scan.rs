//! # AuditRS Line Scanner (`common::lang::scan`)
//!
//! File: cli/src/common/lang/scan.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! Walks a directory, classifies every regular file and folds the results into
//! a `LanguageStats` owned by the scanner. Unreadable files are logged and
//! skipped; they never abort a scan.
//!
use super::classify::classify_bytes;
use super::stats::{FileRecord, LanguageStats};
use super::styles::{extension_key, style_for};
use crate::common::archive::is_archive;
use crate::common::pipeline::{Capability, ContentMutator};
use crate::core::error::{AuditError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Reads and classifies a single file.
pub fn scan_file(path: &Path) -> Result<FileRecord> {
    let bytes = fs::read(path).map_err(|e| AuditError::FileRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let extension = extension_key(path);
    let lines = classify_bytes(&bytes, &style_for(&extension));
    Ok(FileRecord {
        path: path.to_path_buf(),
        extension,
        bytes: bytes.len() as u64,
        lines,
    })
}

/// Counting mutator. Never writes, so it can also be handed to `rewrite`.
#[derive(Debug, Default)]
pub struct LineInspector {
    stats: LanguageStats,
    top_level_only: bool,
}

impl LineInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only scans files directly inside the root, not its subdirectories.
    pub fn top_level_only() -> Self {
        Self {
            top_level_only: true,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn stats(&self) -> &LanguageStats {
        &self.stats
    }

    pub fn into_stats(self) -> LanguageStats {
        self.stats
    }

    /// Scans `root` into this inspector's statistics.
    pub fn scan(&mut self, root: &Path) {
        let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
        if self.top_level_only {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || is_archive(entry.path()) {
                continue;
            }
            match scan_file(entry.path()) {
                Ok(record) => {
                    debug!(
                        "{}: {} lines ({} comments)",
                        record.path.display(),
                        record.lines.total,
                        record.lines.comments
                    );
                    self.stats.record(&record);
                }
                Err(e) => warn!("{:#}", e),
            }
        }
    }
}

impl ContentMutator for LineInspector {
    fn capability(&self) -> Capability {
        Capability::Inspect
    }

    fn apply(&mut self, root: &Path, _origin: &Path) -> Result<()> {
        self.scan(root);
        Ok(())
    }
}
