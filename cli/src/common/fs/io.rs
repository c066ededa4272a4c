//! # AuditRS Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module centralizes the small filesystem I/O helpers that the report
//! writers and command handlers share: making sure a directory exists,
//! writing a whole report, appending to an append-only log, and removing a
//! stale log at the start of a run. All of them attach the offending path to
//! any error via `anyhow::Context`.
//!
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist it is created along with its parents (like
/// `mkdir -p`). If the path exists but is not a directory,
/// `AuditError::FileSystem` is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(AuditError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Checks that a user-supplied root exists and is a directory.
///
/// Returns `AuditError::Usage` otherwise, before anything touches the disk.
pub fn require_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!(AuditError::Usage(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Writes string content to a file, creating parent directories and
/// overwriting any previous content.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Appends string content to a file, creating it if it does not exist.
pub fn append_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?} for appending", path))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to append to file {:?}", path))?;
    Ok(())
}

/// Deletes a file if it exists. Missing files are not an error.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed previous file {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
    }
}
