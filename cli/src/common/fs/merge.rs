//! # AuditRS Tree Merging (`common::fs::merge`)
//!
//! File: cli/src/common/fs/merge.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Moves the top-level entries of a freshly extracted directory into a
//! destination tree. Collisions are resolved last-writer-wins: a same-named
//! directory at the destination is deleted and replaced wholesale (never
//! deep-merged), and a same-named file is overwritten.
//!
//! The merge is deliberately non-recursive. Nested archives that land in the
//! destination are picked up by the next pass of the recursive unpacker.
//!
//! ## Architecture
//!
//! Moves are attempted with `std::fs::rename`. Temporary workspaces normally
//! live on a different filesystem from the tree being flattened, where rename
//! fails with `EXDEV`; in that case `fs_extra` performs a copy followed by a
//! delete of the source.
//!
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// # Merge Directory (`merge`)
///
/// Moves every top-level entry of `source` into `dest`, replacing whatever
/// already exists at `dest/<name>`.
///
/// ## Errors
///
/// Returns an `Err` if `source` cannot be listed, an existing destination
/// entry cannot be removed, or a move fails.
pub fn merge(source: &Path, dest: &Path) -> Result<()> {
    if !dest.is_dir() {
        anyhow::bail!(AuditError::FileSystem(format!(
            "Merge destination is not a directory: {:?}",
            dest
        )));
    }

    let entries = fs::read_dir(source)
        .with_context(|| format!("Failed to list extracted directory {:?}", source))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", source))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        remove_existing(&to)?;
        move_entry(&from, &to)?;
        debug!("Merged {:?} -> {:?}", from, to);
    }
    Ok(())
}

/// Clears the way for an incoming entry.
fn remove_existing(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("Failed to inspect {:?}", path)),
    };
    if metadata.is_dir() {
        debug!("Replacing existing directory {:?}", path);
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove existing directory {:?}", path))?;
    } else {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove existing file {:?}", path))?;
    }
    Ok(())
}

fn move_entry(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    warn!(
        "Rename {:?} -> {:?} failed, falling back to copy and delete",
        from, to
    );

    if from.is_dir() {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.copy_inside = true;
        fs_extra::dir::move_dir(from, to, &options)
            .map_err(|e| anyhow::anyhow!(e).context(format!("Failed to move dir {:?} to {:?}", from, to)))?;
    } else {
        let mut options = fs_extra::file::CopyOptions::new();
        options.overwrite = true;
        fs_extra::file::move_file(from, to, &options)
            .map_err(|e| anyhow::anyhow!(e).context(format!("Failed to move file {:?} to {:?}", from, to)))?;
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_merge_moves_files_and_dirs() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dest");
        fs::create_dir_all(source.join("lib"))?;
        fs::create_dir_all(&dest)?;
        fs::write(source.join("a.py"), "print(1)\n")?;
        fs::write(source.join("lib/b.py"), "print(2)\n")?;

        merge(&source, &dest)?;

        assert_eq!(fs::read_to_string(dest.join("a.py"))?, "print(1)\n");
        assert_eq!(fs::read_to_string(dest.join("lib/b.py"))?, "print(2)\n");
        assert_eq!(fs::read_dir(&source)?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_directory_collision_replaces_not_unions() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dest");
        fs::create_dir_all(source.join("X"))?;
        fs::create_dir_all(dest.join("X"))?;
        fs::write(source.join("X/new.c"), "new")?;
        fs::write(dest.join("X/old.c"), "old")?;

        merge(&source, &dest)?;

        assert!(dest.join("X/new.c").is_file());
        assert!(!dest.join("X/old.c").exists());
        Ok(())
    }

    #[test]
    fn test_file_collision_overwrites() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dest");
        fs::create_dir_all(&source)?;
        fs::create_dir_all(&dest)?;
        fs::write(source.join("README"), "incoming")?;
        fs::write(dest.join("README"), "existing")?;

        merge(&source, &dest)?;
        assert_eq!(fs::read_to_string(dest.join("README"))?, "incoming");
        Ok(())
    }

    #[test]
    fn test_merge_into_missing_dest_fails() {
        let temp_dir = tempdir().unwrap();
        let result = merge(temp_dir.path(), &temp_dir.path().join("nope"));
        assert!(result.is_err());
    }
}
