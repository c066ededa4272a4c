//! # AuditRS Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module groups the filesystem helpers used by the archive workflows.
//!
//! - **`io`**: Directory creation, report writing and append-only log helpers.
//! - **`merge`**: The tree merger that moves extracted entries into place with
//!   last-writer-wins collision handling.
//! - **`workspace`**: `TempWorkspace`, the scoped temporary directory every
//!   extraction happens in.
//!
//! Import from the specific submodule, e.g. `crate::common::fs::merge::merge`.
//!

/// Basic file I/O operations (e.g., `ensure_dir_exists`, `write_string_to_file`).
pub mod io;
/// Top-level directory merging with replacement semantics.
pub mod merge;
/// Scoped temporary extraction directories.
pub mod workspace;
