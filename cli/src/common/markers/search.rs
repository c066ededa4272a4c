//! # AuditRS Term Search (`common::markers::search`)
//!
//! File: cli/src/common/markers/search.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! `TermSearcher` is an inspecting `ContentMutator` that looks for marker
//! terms in extracted content. Archives met during the walk are extracted into
//! their own `TempWorkspace` and searched recursively, so terms buried several
//! archives deep are still found and attributed to the outermost archive.
//!
//! Matching is case-insensitive substring search over UTF-8 text. A file that
//! is not valid UTF-8 is treated as binary and skipped.
//!
use crate::common::archive::{self, is_archive};
use crate::common::fs::workspace::TempWorkspace;
use crate::common::pipeline::{Capability, ContentMutator};
use crate::core::error::{AuditError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One term found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    pub term: String,
    pub file: PathBuf,
    pub archive: PathBuf,
}

#[derive(Debug)]
pub struct TermSearcher {
    terms: Vec<String>,
    lowered: Vec<String>,
    matches: Vec<TermMatch>,
}

impl TermSearcher {
    pub fn new(terms: Vec<String>) -> Self {
        let lowered = terms.iter().map(|t| t.to_lowercase()).collect();
        Self {
            terms,
            lowered,
            matches: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn matches(&self) -> &[TermMatch] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<TermMatch> {
        self.matches
    }

    /// Searches a single plain file. `shown` is the path reported for it.
    ///
    /// Unreadable files are logged and skipped.
    pub fn search_file(&mut self, path: &Path, shown: &Path, archive: &Path) {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = AuditError::FileRead {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                };
                warn!("{}", err);
                return;
            }
        };
        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text.to_lowercase(),
            Err(_) => {
                info!("Skipping binary file: {}", path.display());
                return;
            }
        };

        for (term, lowered) in self.terms.iter().zip(&self.lowered) {
            if text.contains(lowered.as_str()) {
                debug!("'{}' found in {}", term, shown.display());
                self.matches.push(TermMatch {
                    term: term.clone(),
                    file: shown.to_path_buf(),
                    archive: archive.to_path_buf(),
                });
            }
        }
    }

    /// Walks `root`, reporting paths as `prefix/<path relative to root>`.
    fn search_tree(&mut self, root: &Path, prefix: &Path, archive: &Path) -> Result<()> {
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
            let inner = pathdiff::diff_paths(entry.path(), root)
                .unwrap_or_else(|| entry.path().to_path_buf());
            let relative = prefix.join(inner);

            if is_archive(entry.path()) {
                debug!("Searching nested archive {}", relative.display());
                let nested = TempWorkspace::new()?;
                archive::extract(entry.path(), nested.path())?;
                self.search_tree(nested.path(), &relative, archive)?;
                nested.release();
            } else {
                self.search_file(entry.path(), &relative, archive);
            }
        }
        Ok(())
    }
}

impl ContentMutator for TermSearcher {
    fn capability(&self) -> Capability {
        Capability::Inspect
    }

    fn apply(&mut self, root: &Path, origin: &Path) -> Result<()> {
        self.search_tree(root, Path::new(""), origin)
    }
}
