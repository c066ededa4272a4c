//! # AuditRS TAR Archive Operations (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module reads and writes the tar family of archives: plain `.tar`,
//! gzipped `.tar.gz`/`.tgz` and bzip2-compressed `.tar.bz2`.
//!
//! ## Architecture
//!
//! The module leverages the `tar` crate for the archive structure, `flate2` for
//! Gzip and `bzip2` for Bzip2. Both directions are generic over the underlying
//! reader/writer so the compression layer is the only thing that differs
//! between the three formats.
//!
//! - Extraction uses `tar::Archive::unpack`, which refuses entries that would
//!   escape the destination directory.
//! - Creation uses `tar::Builder::append_dir_all`, naming entries either under
//!   the source directory's own name or directly under the archive root.
//!
use super::{ArchiveFormat, EntryRoot};
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Unpacks a tar-family archive into `dest`.
///
/// Any failure, including a corrupt compression stream, is reported as
/// `AuditError::Extraction` carrying the archive path.
pub(super) fn extract_tar(archive: &Path, dest: &Path, format: ArchiveFormat) -> Result<()> {
    let file = File::open(archive).map_err(|e| AuditError::extraction(archive, e))?;
    let reader = BufReader::new(file);
    let unpacked = match format {
        ArchiveFormat::TarGz => unpack(GzDecoder::new(reader), dest),
        ArchiveFormat::TarBz2 => unpack(BzDecoder::new(reader), dest),
        _ => unpack(reader, dest),
    };
    unpacked.map_err(|e| AuditError::extraction(archive, e))?;
    Ok(())
}

fn unpack<R: Read>(reader: R, dest: &Path) -> io::Result<()> {
    let mut archive = tar::Archive::new(reader);
    archive.unpack(dest)
}

/// # Create TAR Archive (`create_tar`)
///
/// Writes every file and directory under `source` into a new tar-family
/// archive at `dest`, compressed according to `format`.
///
/// ## Arguments
///
/// * `source` - Directory to archive. Must exist.
/// * `dest` - Path of the archive file to create (overwritten if present).
/// * `format` - `Tar`, `TarGz` or `TarBz2`.
/// * `root` - `EntryRoot::SourceName` puts everything under `<basename(source)>/`,
///   `EntryRoot::SourceContents` puts the contents at the archive root.
///
/// ## Errors
///
/// Returns `AuditError::Creation` if the source cannot be read, the output
/// cannot be written, or finishing the compression stream fails.
pub(super) fn create_tar(
    source: &Path,
    dest: &Path,
    format: ArchiveFormat,
    root: EntryRoot,
) -> Result<()> {
    let written = write_tar(source, dest, format, root);
    written.map_err(|e| AuditError::creation(dest, format!("{:#}", e)))?;
    Ok(())
}

fn write_tar(source: &Path, dest: &Path, format: ArchiveFormat, root: EntryRoot) -> Result<()> {
    let file = File::create(dest)
        .with_context(|| format!("Failed to create output file {}", dest.display()))?;
    let writer = BufWriter::new(file);

    let mut writer = match format {
        ArchiveFormat::TarGz => {
            build(GzEncoder::new(writer, flate2::Compression::default()), source, root)?
                .finish()
                .context("Failed to finish gzip compression stream")?
        }
        ArchiveFormat::TarBz2 => {
            build(BzEncoder::new(writer, bzip2::Compression::default()), source, root)?
                .finish()
                .context("Failed to finish bzip2 compression stream")?
        }
        _ => build(writer, source, root)?,
    };
    writer.flush().context("Failed to flush archive to disk")?;
    Ok(())
}

/// Appends the source tree to a tar builder and hands the inner writer back.
fn build<W: Write>(writer: W, source: &Path, root: EntryRoot) -> Result<W> {
    let mut tar_builder = tar::Builder::new(writer);
    let entry_root = match root {
        EntryRoot::SourceName => Path::new(
            source
                .file_name()
                .with_context(|| format!("Source directory {} has no name", source.display()))?,
        )
        .to_path_buf(),
        EntryRoot::SourceContents => Path::new(".").to_path_buf(),
    };

    tar_builder
        .append_dir_all(&entry_root, source)
        .with_context(|| {
            format!(
                "Failed to add directory '{}' contents to the tar archive",
                source.display()
            )
        })?;

    // Writes the closing records and returns the compression layer.
    tar_builder
        .into_inner()
        .context("Failed to finalize tar archive structure")
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn entry_names(archive: &Path) -> HashSet<String> {
        let decoder = GzDecoder::new(File::open(archive).unwrap());
        let mut tar_archive = tar::Archive::new(decoder);
        tar_archive
            .entries()
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                entry
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
                    .trim_end_matches('/')
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_create_tar_gz_named_root() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("pkg");
        fs::create_dir_all(source.join("subdir"))?;
        fs::write(source.join("file1.txt"), "hello")?;
        fs::write(source.join("subdir/file2.txt"), "world")?;

        let dest = temp_dir.path().join("pkg.tar.gz");
        create_tar(&source, &dest, ArchiveFormat::TarGz, EntryRoot::SourceName)?;

        let names = entry_names(&dest);
        assert!(names.contains("pkg/file1.txt"));
        assert!(names.contains("pkg/subdir/file2.txt"));
        Ok(())
    }

    #[test]
    fn test_create_tar_gz_flat_root() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("pkg");
        fs::create_dir_all(&source)?;
        fs::write(source.join("file1.txt"), "hello")?;

        let dest = temp_dir.path().join("flat.tgz");
        create_tar(&source, &dest, ArchiveFormat::TarGz, EntryRoot::SourceContents)?;

        let names = entry_names(&dest);
        assert!(names.iter().any(|n| n.trim_start_matches("./") == "file1.txt"));
        assert!(!names.iter().any(|n| n.starts_with("pkg")));
        Ok(())
    }

    #[test]
    fn test_bzip2_round_trip() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("src");
        fs::create_dir_all(&source)?;
        fs::write(source.join("main.c"), "int main() { return 0; }\n")?;

        let dest = temp_dir.path().join("src.tar.bz2");
        create_tar(&source, &dest, ArchiveFormat::TarBz2, EntryRoot::SourceName)?;

        let out = temp_dir.path().join("out");
        fs::create_dir_all(&out)?;
        extract_tar(&dest, &out, ArchiveFormat::TarBz2)?;
        assert_eq!(
            fs::read_to_string(out.join("src/main.c"))?,
            "int main() { return 0; }\n"
        );
        Ok(())
    }

    #[test]
    fn test_extract_corrupt_gzip_fails() -> Result<()> {
        let temp_dir = tempdir()?;
        let archive = temp_dir.path().join("broken.tar.gz");
        fs::write(&archive, b"definitely not gzip data")?;

        let result = extract_tar(&archive, temp_dir.path(), ArchiveFormat::TarGz);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::Extraction { .. })
        ));
        Ok(())
    }
}
