//! # AuditRS Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module defines the error types used throughout AuditRS. Domain
//! failures are modelled as variants of `AuditError`; they are raised through
//! `anyhow` so that call sites can attach context while the top level can still
//! downcast to the concrete variant.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `AuditError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The variants fall into two groups:
//! - Fatal errors that abort a run: `Usage`, `UnsupportedFormat`, `Extraction`,
//!   `Creation`, `NestingLimit`, `Config`, `FileSystem`.
//! - Per-file errors that are logged and skipped: `FileRead`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !root.is_dir() {
//!     anyhow::bail!(AuditError::Usage(format!("Not a directory: {}", root.display())));
//! }
//!
//! // Pattern matching on error types
//! match archive::extract(&path, dest) {
//!     Err(e) if matches!(e.downcast_ref::<AuditError>(), Some(AuditError::UnsupportedFormat { .. })) => {
//!         println!("Unsupported archive, aborting");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the AuditRS application.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Unknown archive format for file '{}'", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to extract archive '{}': {}", .path.display(), .reason)]
    Extraction { path: PathBuf, reason: String },

    #[error("Failed to create archive '{}': {}", .path.display(), .reason)]
    Creation { path: PathBuf, reason: String },

    #[error("Archives under '{}' are still nested after {} passes", .root.display(), .passes)]
    NestingLimit { root: PathBuf, passes: usize },

    #[error("Failed to read file '{}': {}", .path.display(), .reason)]
    FileRead { path: PathBuf, reason: String },
}

impl AuditError {
    /// Builds an `Extraction` error from any displayable cause.
    pub fn extraction(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        AuditError::Extraction {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Builds a `Creation` error from any displayable cause.
    pub fn creation(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        AuditError::Creation {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
