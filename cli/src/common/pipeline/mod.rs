//! # AuditRS Processing Pipeline (`common::pipeline`)
//!
//! File: cli/src/common/pipeline/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! The reusable archive-processing skeletons every command is built from:
//!
//! - **`mutator`**: the `ContentMutator` trait and its `Capability`.
//! - **`unpack`**: in-place recursive flattening with a per-format histogram.
//! - **`rewrite`**: extract, apply a mutator, repack only when it mutates.
//!
//! Commands differ only in the mutator they plug in and in how they report.
//!
pub mod mutator;
pub mod rewrite;
pub mod unpack;

pub use mutator::{Capability, ContentMutator};
