//! # AuditRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the AuditRS CLI. Each one
//! defines its own clap arguments struct and an async `handle_*` function
//! that `main.rs` dispatches to.
//!
//! ## Commands
//!
//! - `stats`: flatten archives in place and report lines of code per language
//! - `generate`: build a synthetic corpus of nested archives
//! - `insert`: plant marker terms inside every archive
//! - `search`: find marker terms in files and nested archives
//!
//! Handlers validate their arguments, load the configuration, then run the
//! synchronous archive work on a blocking thread via `spawn_blocking`.
//!

/// Synthetic corpus generation.
pub mod generate;
/// Marker insertion into archives. Rewrites archives in place.
pub mod insert;
/// Marker term search across files and nested archives.
pub mod search;
/// Archive flattening and line statistics.
pub mod stats;
