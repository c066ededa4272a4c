//! # AuditRS ZIP Archive Operations (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! Reading and writing `.zip` archives through the `zip` crate. Entries are
//! Deflate-compressed; directory entries are written explicitly so empty
//! directories survive a round trip.
//!
use super::EntryRoot;
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Unpacks a zip archive into `dest`.
///
/// `ZipArchive::extract` sanitizes entry names, so entries with absolute
/// paths or `..` components cannot land outside `dest`.
pub(super) fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| AuditError::extraction(archive, e))?;
    let mut zip_archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| AuditError::extraction(archive, e))?;
    zip_archive
        .extract(dest)
        .map_err(|e| AuditError::extraction(archive, e))?;
    Ok(())
}

/// Writes every file and directory under `source` into a new zip at `dest`.
pub(super) fn create_zip(source: &Path, dest: &Path, root: EntryRoot) -> Result<()> {
    let written = write_zip(source, dest, root);
    written.map_err(|e| AuditError::creation(dest, format!("{:#}", e)))?;
    Ok(())
}

fn write_zip(source: &Path, dest: &Path, root: EntryRoot) -> Result<()> {
    let prefix = match root {
        EntryRoot::SourceName => Some(
            source
                .file_name()
                .with_context(|| format!("Source directory {} has no name", source.display()))?
                .to_string_lossy()
                .into_owned(),
        ),
        EntryRoot::SourceContents => None,
    };

    let file = File::create(dest)
        .with_context(|| format!("Failed to create output file {}", dest.display()))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    if let Some(prefix) = &prefix {
        writer.add_directory(format!("{}/", prefix), options)?;
    }

    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let relative = entry.path().strip_prefix(source)?;
        let name = entry_name(prefix.as_deref(), relative);

        if entry.file_type().is_dir() {
            writer.add_directory(format!("{}/", name), options)?;
        } else {
            writer.start_file(name, options)?;
            let mut input = File::open(entry.path())
                .with_context(|| format!("Failed to open {}", entry.path().display()))?;
            io::copy(&mut input, &mut writer)
                .with_context(|| format!("Failed to compress {}", entry.path().display()))?;
        }
    }

    let mut inner = writer.finish().context("Failed to finalize zip archive")?;
    inner.flush().context("Failed to flush archive to disk")?;
    Ok(())
}

/// Zip entry names always use `/`, whatever the host separator is.
fn entry_name(prefix: Option<&str>, relative: &Path) -> String {
    let mut parts: Vec<String> = prefix.map(|p| vec![p.to_string()]).unwrap_or_default();
    parts.extend(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}
