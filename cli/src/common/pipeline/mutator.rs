//! # AuditRS Content Mutators (`common::pipeline::mutator`)
//!
//! File: cli/src/common/pipeline/mutator.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! A `ContentMutator` is the pluggable step that runs on extracted content.
//! The extraction and repack skeleton (`rewrite`) and the flatten-then-scan
//! statistics flow are shared; what differs between workflows is the mutator
//! that gets injected:
//!
//! | Implementation | Capability | Used by |
//! |----------------|------------|---------|
//! | `lang::scan::LineInspector` | `Inspect` | `auditrs stats` |
//! | `markers::search::TermSearcher` | `Inspect` | `auditrs search` |
//! | `markers::inject::MarkerInjector` | `Mutate` | `auditrs insert` |
//!
//! The capability tells the skeleton whether the content must be written back:
//! `Inspect` mutators leave the original archive untouched, `Mutate` mutators
//! cause a repack.
//!
use crate::core::error::Result;
use std::path::Path;

/// What a mutator does to the content it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Reads only; nothing is repacked.
    Inspect,
    /// Writes into the content; the archive is repacked afterwards.
    Mutate,
}

/// A step applied to an extracted directory tree.
pub trait ContentMutator {
    fn capability(&self) -> Capability;

    /// Processes the content under `root`. `origin` is the archive (or plain
    /// directory) the content came from and is only used for reporting.
    fn apply(&mut self, root: &Path, origin: &Path) -> Result<()>;
}
