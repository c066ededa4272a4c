//! # AuditRS Archive Rewriter (`common::pipeline::rewrite`)
//!
//! File: cli/src/common/pipeline/rewrite.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! The shared extract / apply / repack skeleton. One archive is extracted into
//! a `TempWorkspace`, the injected `ContentMutator` runs on the content, and,
//! if the mutator writes, the content is repacked in the archive's original
//! format and put in place of the original.
//!
//! ## Architecture
//!
//! 1. Extract into a fresh workspace.
//! 2. Pick the content root: the single top-level directory if the workspace
//!    holds exactly one directory and nothing else, otherwise the workspace.
//! 3. `mutator.apply(content_root, archive)`.
//! 4. `Capability::Inspect`: done, the archive is never touched.
//! 5. `Capability::Mutate`: repack into a temporary file next to the archive,
//!    then rename it over the original. Tar-family archives with a single root
//!    directory are rebuilt under that directory's name; everything else is
//!    rebuilt from the workspace contents, so the entry layout matches what was
//!    extracted.
//!
//! The original archive is only replaced once the new one is fully written.
//! If extraction, mutation or repacking fails the original stays as it was.
//!
use super::mutator::{Capability, ContentMutator};
use crate::common::archive::{self, ArchiveFormat, ArchiveRef, EntryRoot};
use crate::common::fs::workspace::TempWorkspace;
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// # Rewrite Archive (`rewrite`)
///
/// Runs `mutator` on the contents of `archive_path`, repacking when it mutates.
///
/// ## Arguments
///
/// * `archive_path` - Archive to process. Its suffix selects the format.
/// * `mutator` - Step to apply to the extracted content.
///
/// ## Errors
///
/// - `AuditError::UnsupportedFormat` for unrecognised suffixes.
/// - `AuditError::Extraction` / `AuditError::Creation` from the codec.
/// - Whatever the mutator returns, with the archive name as context.
pub fn rewrite(archive_path: &Path, mutator: &mut dyn ContentMutator) -> Result<()> {
    let archive = ArchiveRef::new(archive_path);
    if archive.format == ArchiveFormat::Unknown {
        anyhow::bail!(AuditError::UnsupportedFormat {
            path: archive.path.clone()
        });
    }

    let workspace = TempWorkspace::new()?;
    archive::extract(&archive.path, workspace.path())?;
    let content_root = content_root(workspace.path())?;

    mutator
        .apply(&content_root, &archive.path)
        .with_context(|| format!("Failed to process contents of {}", archive.path.display()))?;

    if mutator.capability() == Capability::Inspect {
        debug!("Inspected {}, leaving it untouched", archive.path.display());
        workspace.release();
        return Ok(());
    }

    repack(&archive, workspace.path(), &content_root)?;
    workspace.release();
    info!("Rewrote archive {}", archive.path.display());
    Ok(())
}

/// The directory a mutator should see for an extracted archive.
fn content_root(workspace: &Path) -> Result<PathBuf> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(workspace)
        .with_context(|| format!("Failed to list workspace {}", workspace.display()))?
    {
        entries.push(entry.context("Failed to read workspace entry")?);
    }

    if let [only] = entries.as_slice() {
        if only.file_type().context("Failed to stat workspace entry")?.is_dir() {
            return Ok(only.path());
        }
    }
    Ok(workspace.to_path_buf())
}

fn repack(archive: &ArchiveRef, workspace: &Path, content_root: &Path) -> Result<()> {
    let parent = match archive.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".auditrs-")
        .suffix(".partial")
        .tempfile_in(parent)
        .map_err(|e| AuditError::creation(&archive.path, e))?;

    let (source, root) = if archive.format.is_tar_family() && content_root != workspace {
        (content_root, EntryRoot::SourceName)
    } else {
        (workspace, EntryRoot::SourceContents)
    };
    archive::create_with_root(source, staged.path(), archive.format, root)?;

    // Temporary files are created owner-only; keep the archive's own mode.
    if let Ok(metadata) = fs::metadata(&archive.path) {
        if let Err(e) = fs::set_permissions(staged.path(), metadata.permissions()) {
            debug!("Could not copy permissions onto {}: {}", archive.path.display(), e);
        }
    }

    staged
        .persist(&archive.path)
        .map_err(|e| AuditError::creation(&archive.path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Appends a line to every `.txt` file it sees.
    struct Stamp {
        capability: Capability,
        seen_origin: Option<PathBuf>,
    }

    impl Stamp {
        fn new(capability: Capability) -> Self {
            Self {
                capability,
                seen_origin: None,
            }
        }
    }

    impl ContentMutator for Stamp {
        fn capability(&self) -> Capability {
            self.capability
        }

        fn apply(&mut self, root: &Path, origin: &Path) -> Result<()> {
            self.seen_origin = Some(origin.to_path_buf());
            for entry in walkdir::WalkDir::new(root) {
                let entry = entry?;
                if entry.path().extension().map_or(false, |e| e == "txt") {
                    let mut text = fs::read_to_string(entry.path())?;
                    text.push_str("stamped\n");
                    fs::write(entry.path(), text)?;
                }
            }
            Ok(())
        }
    }

    struct Failing;

    impl ContentMutator for Failing {
        fn capability(&self) -> Capability {
            Capability::Mutate
        }

        fn apply(&mut self, _root: &Path, _origin: &Path) -> Result<()> {
            anyhow::bail!("refusing to touch content")
        }
    }

    fn build_archive(dir: &Path, name: &str) -> PathBuf {
        let source = dir.join("docs");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("notes.txt"), "hello\n").unwrap();
        fs::write(source.join("data.bin"), [0u8, 1, 2]).unwrap();
        let dest = dir.join(name);
        archive::create(&source, &dest, archive::detect_format(&dest)).unwrap();
        fs::remove_dir_all(&source).unwrap();
        dest
    }

    #[test]
    fn test_mutation_is_repacked_in_same_layout() -> Result<()> {
        for name in ["docs.tar", "docs.tar.gz", "docs.tar.bz2", "docs.zip"] {
            let temp_dir = tempdir()?;
            let archive_path = build_archive(temp_dir.path(), name);

            let mut stamp = Stamp::new(Capability::Mutate);
            rewrite(&archive_path, &mut stamp)?;
            assert_eq!(stamp.seen_origin.as_deref(), Some(archive_path.as_path()));

            let out = temp_dir.path().join("out");
            archive::extract(&archive_path, &out)?;
            let notes = if name.ends_with(".zip") {
                out.join("notes.txt")
            } else {
                out.join("docs/notes.txt")
            };
            assert_eq!(fs::read_to_string(notes)?, "hello\nstamped\n", "{}", name);
        }
        Ok(())
    }

    #[test]
    fn test_inspect_leaves_archive_bytes_untouched() -> Result<()> {
        let temp_dir = tempdir()?;
        let archive_path = build_archive(temp_dir.path(), "docs.tar.gz");
        let before = fs::read(&archive_path)?;

        let mut stamp = Stamp::new(Capability::Inspect);
        rewrite(&archive_path, &mut stamp)?;
        assert_eq!(fs::read(&archive_path)?, before);
        Ok(())
    }

    #[test]
    fn test_failed_mutation_keeps_original() -> Result<()> {
        let temp_dir = tempdir()?;
        let archive_path = build_archive(temp_dir.path(), "docs.zip");
        let before = fs::read(&archive_path)?;

        assert!(rewrite(&archive_path, &mut Failing).is_err());
        assert_eq!(fs::read(&archive_path)?, before);
        // No staged leftovers beside the archive.
        let leftovers = fs::read_dir(temp_dir.path())?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .count();
        assert_eq!(leftovers, 0);
        Ok(())
    }

    #[test]
    fn test_corrupt_archive_is_an_extraction_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let archive_path = temp_dir.path().join("broken.tgz");
        fs::write(&archive_path, "definitely not gzip")?;

        let err = rewrite(&archive_path, &mut Stamp::new(Capability::Mutate)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::Extraction { .. })
        ));
        assert_eq!(fs::read_to_string(&archive_path)?, "definitely not gzip");
        Ok(())
    }

    #[test]
    fn test_flat_zip_content_root_is_workspace() -> Result<()> {
        let workspace = tempdir()?;
        fs::write(workspace.path().join("a.txt"), "a")?;
        fs::create_dir(workspace.path().join("sub"))?;
        assert_eq!(content_root(workspace.path())?, workspace.path());

        let single = tempdir()?;
        fs::create_dir(single.path().join("only"))?;
        assert_eq!(content_root(single.path())?, single.path().join("only"));
        Ok(())
    }
}
