//! # AuditRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Shared building blocks used by every subcommand. Command modules
//! (`commands::`) only parse arguments, pick a mutator and format reports;
//! everything that touches archives or counts lines lives here.
//!
//! ## Architecture
//!
//! - **`archive`**: format detection, extraction and creation for `.tar`,
//!   `.tar.gz`/`.tgz`, `.tar.bz2` and `.zip`.
//! - **`fs`**: file I/O helpers, the last-writer-wins tree merge and scoped
//!   temporary workspaces.
//! - **`lang`**: comment styles, line classification, per-language statistics
//!   and the directory line scanner.
//! - **`markers`**: the marker vocabulary, the injecting mutator and the term
//!   searcher.
//! - **`pipeline`**: the `ContentMutator` trait, the recursive unpacker and the
//!   archive rewriter.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{lang::scan::LineInspector, pipeline::unpack};
//!
//! # fn run(root: &std::path::Path) -> anyhow::Result<()> {
//! let histogram = unpack::flatten(root, 64)?;
//! let mut inspector = LineInspector::new();
//! inspector.scan(root);
//! let stats = inspector.into_stats();
//! println!("{} archives, {} lines", histogram.total(), stats.total_lines());
//! # Ok(())
//! # }
//! ```
//!

/// Archive format detection, extraction and creation.
pub mod archive;
/// Filesystem helpers: I/O, tree merge, temporary workspaces.
pub mod fs;
/// Line classification and per-language statistics.
pub mod lang;
/// Marker vocabulary, injection and search.
pub mod markers;
/// Unpack and rewrite skeletons driven by a `ContentMutator`.
pub mod pipeline;
