//! # AuditRS Language Utilities (`common::lang`)
//!
//! File: cli/src/common/lang/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! Everything the line counter needs to know about source files:
//!
//! - **`styles`**: extension -> `CommentStyle` table and the extension key rule.
//! - **`classify`**: the heuristic code/comment line classifier.
//! - **`stats`**: `FileRecord` and the `LanguageStats` aggregation context.
//! - **`scan`**: `scan_file` and the `LineInspector` directory scanner.
//! - **`extensions`**: per-language extension lists used for generated files.
//!

pub mod classify;
pub mod extensions;
pub mod scan;
pub mod stats;
pub mod styles;
