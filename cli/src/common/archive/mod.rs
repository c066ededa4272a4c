//! # AuditRS Archive Codec (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module is the single entry point for everything that touches archive
//! files. Every workflow (flattening, corpus generation, marker insertion and
//! term search) goes through the three operations defined here:
//!
//! - **`detect_format`**: suffix-based, case-insensitive, longest suffix wins.
//! - **`extract`**: unpacks an archive into a directory, preserving relative
//!   paths and directory structure.
//! - **`create`**: writes a directory back into a new archive.
//!
//! ## Architecture
//!
//! - **`format`**: `ArchiveFormat`, `ArchiveRef` and suffix detection.
//! - **`tar`**: `.tar`, `.tar.gz`/`.tgz` and `.tar.bz2` via `tar`, `flate2`, `bzip2`.
//! - **`zip`**: `.zip` via the `zip` crate.
//!
//! Tar-family archives are created with a single named root directory (the
//! source directory's basename) while zip archives hold the source directory's
//! contents directly. Synthetic corpora rely on this asymmetry, so `create`
//! keeps it; `create_with_root` is available when a caller needs the other
//! layout to round-trip an archive exactly.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, ArchiveFormat};
//! use std::path::Path;
//!
//! # fn run() -> anyhow::Result<()> {
//! archive::create(Path::new("./pkg"), Path::new("./pkg.tar.gz"), ArchiveFormat::TarGz)?;
//! archive::extract(Path::new("./pkg.tar.gz"), Path::new("./out"))?;
//! # Ok(())
//! # }
//! ```
//!
pub mod format;
pub mod tar;
pub mod zip;

pub use format::{detect_format, is_archive, ArchiveFormat, ArchiveRef};

use crate::core::error::{AuditError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// How entries are named inside a newly created archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRoot {
    /// Everything under `<basename(source)>/`.
    SourceName,
    /// The source directory's contents at the archive root.
    SourceContents,
}

impl EntryRoot {
    /// The layout `create` uses for each format.
    pub fn default_for(format: ArchiveFormat) -> Self {
        if format.is_tar_family() {
            EntryRoot::SourceName
        } else {
            EntryRoot::SourceContents
        }
    }
}

/// # Extract Archive (`extract`)
///
/// Unpacks `archive` into `dest`, creating `dest` if needed.
///
/// ## Errors
///
/// - `AuditError::UnsupportedFormat` if the suffix is not recognised.
/// - `AuditError::Extraction` if the archive is corrupt or unreadable.
pub fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let format = detect_format(archive);
    if format == ArchiveFormat::Unknown {
        anyhow::bail!(AuditError::UnsupportedFormat {
            path: archive.to_path_buf()
        });
    }
    fs::create_dir_all(dest).map_err(|e| AuditError::extraction(archive, e))?;
    debug!("Extracting {} ({}) into {}", archive.display(), format, dest.display());

    match format {
        ArchiveFormat::Zip => self::zip::extract_zip(archive, dest),
        _ => self::tar::extract_tar(archive, dest, format),
    }
}

/// # Create Archive (`create`)
///
/// Writes every file under `source` (recursively) into a new archive at
/// `dest`, named the default way for `format` (see `EntryRoot::default_for`).
pub fn create(source: &Path, dest: &Path, format: ArchiveFormat) -> Result<()> {
    create_with_root(source, dest, format, EntryRoot::default_for(format))
}

/// Same as `create`, with the entry layout chosen by the caller.
///
/// A partially written output file is removed when creation fails.
pub fn create_with_root(
    source: &Path,
    dest: &Path,
    format: ArchiveFormat,
    root: EntryRoot,
) -> Result<()> {
    if format == ArchiveFormat::Unknown {
        anyhow::bail!(AuditError::UnsupportedFormat {
            path: dest.to_path_buf()
        });
    }
    if !source.is_dir() {
        anyhow::bail!(AuditError::creation(
            dest,
            format!("source {} is not a directory", source.display())
        ));
    }
    debug!(
        "Creating {} ({}, {:?}) from {}",
        dest.display(),
        format,
        root,
        source.display()
    );

    let created = match format {
        ArchiveFormat::Zip => self::zip::create_zip(source, dest, root),
        _ => self::tar::create_tar(source, dest, format, root),
    };
    if created.is_err() && dest.exists() {
        let _ = fs::remove_file(dest);
    }
    created
}
