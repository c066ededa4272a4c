//! # AuditRS Marker Injection (`common::markers::inject`)
//!
//! File: cli/src/common/markers/inject.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! `MarkerInjector` is the mutating `ContentMutator`. For each carrier file
//! name (see `carrier_file_names`) it takes the file's current bytes, or empty
//! content when the archive has no such file, splices one randomly chosen term
//! wrapped in newlines at a random byte offset, writes the file back and
//! records a `MarkerInjection`.
//!
//! The random source is a type parameter so tests can pass a seeded
//! `StdRng` and get reproducible offsets.
//!
//! ## Examples
//!
//! ```rust
//! let mut injector = MarkerInjector::new(terms, 10, rand::thread_rng());
//! pipeline::rewrite::rewrite(&archive, &mut injector)?;
//! for injection in injector.take_injections() {
//!     println!("{} -> {}", injection.term, injection.file.display());
//! }
//! ```
//!
use super::carrier_file_names;
use crate::common::pipeline::{Capability, ContentMutator};
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One planted term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerInjection {
    pub term: String,
    /// Relative to the archive's content root.
    pub file: PathBuf,
    /// Byte offset of the inserted newline.
    pub offset: usize,
    pub archive: PathBuf,
}

/// Returns `content` with `"\n" + term + "\n"` inserted at `offset`.
pub fn splice_term(content: &[u8], offset: usize, term: &str) -> Vec<u8> {
    let offset = offset.min(content.len());
    let mut spliced = Vec::with_capacity(content.len() + term.len() + 2);
    spliced.extend_from_slice(&content[..offset]);
    spliced.push(b'\n');
    spliced.extend_from_slice(term.as_bytes());
    spliced.push(b'\n');
    spliced.extend_from_slice(&content[offset..]);
    spliced
}

pub struct MarkerInjector<R: Rng> {
    terms: Vec<String>,
    max_files: usize,
    rng: R,
    injections: Vec<MarkerInjection>,
}

impl<R: Rng> MarkerInjector<R> {
    pub fn new(terms: Vec<String>, max_files: usize, rng: R) -> Self {
        Self {
            terms,
            max_files,
            rng,
            injections: Vec::new(),
        }
    }

    /// Injections made since the last call, oldest first.
    pub fn take_injections(&mut self) -> Vec<MarkerInjection> {
        std::mem::take(&mut self.injections)
    }

    fn inject_file(&mut self, root: &Path, name: &str, archive: &Path) -> Result<()> {
        let path = root.join(name);
        let current = if path.is_file() {
            fs::read(&path).map_err(|e| AuditError::FileRead {
                path: path.clone(),
                reason: e.to_string(),
            })?
        } else {
            Vec::new()
        };

        let term = self
            .terms
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| AuditError::Config("Marker vocabulary is empty".to_string()))?;
        let offset = self.rng.gen_range(0..=current.len());

        fs::write(&path, splice_term(&current, offset, &term))
            .with_context(|| format!("Failed to write marker file {}", path.display()))?;
        debug!("Inserted '{}' into {} at byte {}", term, path.display(), offset);

        self.injections.push(MarkerInjection {
            term,
            file: PathBuf::from(name),
            offset,
            archive: archive.to_path_buf(),
        });
        Ok(())
    }
}

impl<R: Rng> ContentMutator for MarkerInjector<R> {
    fn capability(&self) -> Capability {
        Capability::Mutate
    }

    fn apply(&mut self, root: &Path, origin: &Path) -> Result<()> {
        for name in carrier_file_names(self.max_files) {
            self.inject_file(root, &name, origin)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn injector(max_files: usize) -> MarkerInjector<StdRng> {
        MarkerInjector::new(
            vec!["Confidential".to_string()],
            max_files,
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn test_splice_positions() {
        assert_eq!(splice_term(b"", 0, "X"), b"\nX\n");
        assert_eq!(splice_term(b"ab", 0, "X"), b"\nX\nab");
        assert_eq!(splice_term(b"ab", 1, "X"), b"a\nX\nb");
        assert_eq!(splice_term(b"ab", 2, "X"), b"ab\nX\n");
        // Out-of-range offsets clamp to the end.
        assert_eq!(splice_term(b"ab", 9, "X"), b"ab\nX\n");
    }

    #[test]
    fn test_creates_missing_carriers() -> Result<()> {
        let temp_dir = tempdir()?;
        let mut injector = injector(2);
        injector.apply(temp_dir.path(), Path::new("pkg.zip"))?;

        assert_eq!(fs::read_to_string(temp_dir.path().join("LICENSE"))?, "\nConfidential\n");
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("LICENSE.txt"))?,
            "\nConfidential\n"
        );
        let injections = injector.take_injections();
        assert_eq!(injections.len(), 2);
        assert_eq!(injections[0].file, PathBuf::from("LICENSE"));
        assert_eq!(injections[0].offset, 0);
        assert_eq!(injections[1].archive, PathBuf::from("pkg.zip"));
        assert!(injector.take_injections().is_empty());
        Ok(())
    }

    #[test]
    fn test_existing_content_is_preserved_around_term() -> Result<()> {
        let temp_dir = tempdir()?;
        let original = "line one\nline two\n";
        fs::write(temp_dir.path().join("LICENSE"), original)?;

        let mut injector = injector(1);
        injector.apply(temp_dir.path(), Path::new("pkg.tar"))?;
        let injection = &injector.take_injections()[0];

        let updated = fs::read_to_string(temp_dir.path().join("LICENSE"))?;
        assert_eq!(updated.len(), original.len() + "\nConfidential\n".len());
        assert!(injection.offset <= original.len());
        assert_eq!(&updated[..injection.offset], &original[..injection.offset]);
        assert_eq!(
            &updated[injection.offset..injection.offset + 14],
            "\nConfidential\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let mut injector = MarkerInjector::new(Vec::new(), 1, StdRng::seed_from_u64(1));
        assert!(injector.apply(temp_dir.path(), Path::new("a.zip")).is_err());
    }
}
