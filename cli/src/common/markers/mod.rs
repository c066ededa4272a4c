//! # AuditRS Provenance Markers (`common::markers`)
//!
//! File: cli/src/common/markers/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Marker terms are short license-like phrases planted into archived content
//! so that later audits can check whether a scanner notices them.
//!
//! - **`inject`**: `MarkerInjector`, the mutating side (`auditrs insert`).
//! - **`search`**: `TermSearcher`, the inspecting side (`auditrs search`).
//!
//! The default vocabulary lives here and can be replaced through
//! `[markers] terms` in the configuration file.
//!
pub mod inject;
pub mod search;

use crate::common::lang::extensions::marker_extensions;

/// Default marker vocabulary.
pub const LICENSE_TERMS: [&str; 8] = [
    "License",
    "Copyright",
    "All rights reserved",
    "Proprietary",
    "Confidential",
    "Terms of use",
    "Redistribution",
    "Warranty",
];

/// Files that conventionally carry license text, tried first as carriers.
pub const CARRIER_FILE_NAMES: [&str; 6] = [
    "LICENSE",
    "LICENSE.txt",
    "COPYING",
    "README.md",
    "NOTICE",
    "DISCLAIMER",
];

/// Carrier file names in injection order, capped at `max_files`.
///
/// The fixed license-like names come first, then one `file<ext>` per source
/// extension.
pub fn carrier_file_names(max_files: usize) -> Vec<String> {
    CARRIER_FILE_NAMES
        .iter()
        .map(|name| name.to_string())
        .chain(marker_extensions().into_iter().map(|ext| format!("file{}", ext)))
        .take(max_files)
        .collect()
}

/// Occurrences per vocabulary term, in vocabulary order. Terms with no hits
/// are included with a count of zero; hits outside the vocabulary are ignored.
pub fn count_by_term<'a>(
    terms: &[String],
    hits: impl IntoIterator<Item = &'a str>,
) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = terms.iter().map(|t| (t.clone(), 0)).collect();
    for hit in hits {
        if let Some((_, count)) = counts.iter_mut().find(|(term, _)| term.as_str() == hit) {
            *count += 1;
        }
    }
    counts
}
