//! # AuditRS Language Statistics (`common::lang::stats`)
//!
//! File: cli/src/common/lang/stats.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! `LanguageStats` is the aggregation context for a line scan. Every scan (the
//! whole tree in sequential mode, or one subdirectory per task in parallel
//! mode) owns its own instance; the orchestrator combines them with `merge`
//! once the tasks are done. There is no shared mutable state between scans.
//!
//! Invariant: the per-extension `total` values always sum to `total_lines`.
//! `record` and `merge` are the only ways to change the counters and both
//! update the two sides together.
//!
use super::classify::LineCounts;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Result of classifying one file. Folded into `LanguageStats` and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub extension: String,
    pub bytes: u64,
    pub lines: LineCounts,
}

/// Aggregated per-extension line counts and file counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageStats {
    per_extension: BTreeMap<String, LineCounts>,
    file_counts: BTreeMap<String, u64>,
    total_lines: u64,
    total_files: u64,
}

impl LanguageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a single file's record into the aggregate.
    pub fn record(&mut self, record: &FileRecord) {
        *self
            .per_extension
            .entry(record.extension.clone())
            .or_default() += record.lines;
        *self.file_counts.entry(record.extension.clone()).or_default() += 1;
        self.total_lines += record.lines.total;
        self.total_files += 1;
    }

    /// Absorbs another aggregate, e.g. the result of a finished worker task.
    pub fn merge(&mut self, other: LanguageStats) {
        for (ext, lines) in other.per_extension {
            *self.per_extension.entry(ext).or_default() += lines;
        }
        for (ext, files) in other.file_counts {
            *self.file_counts.entry(ext).or_default() += files;
        }
        self.total_lines += other.total_lines;
        self.total_files += other.total_files;
    }

    pub fn per_extension(&self) -> &BTreeMap<String, LineCounts> {
        &self.per_extension
    }

    pub fn file_counts(&self) -> &BTreeMap<String, u64> {
        &self.file_counts
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    /// Share of all counted lines that belong to `lines`, as a percentage.
    pub fn percentage_of_total(&self, lines: u64) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            lines as f64 / self.total_lines as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ext: &str, total: u64, comments: u64) -> FileRecord {
        FileRecord {
            path: PathBuf::from(format!("file{}", ext)),
            extension: ext.to_string(),
            bytes: 0,
            lines: LineCounts {
                total,
                code: total - comments,
                comments,
            },
        }
    }

    fn sum_of_totals(stats: &LanguageStats) -> u64 {
        stats.per_extension().values().map(|c| c.total).sum()
    }

    #[test]
    fn test_record_accumulates_per_extension() {
        let mut stats = LanguageStats::new();
        stats.record(&record(".py", 3, 1));
        stats.record(&record(".py", 5, 0));
        stats.record(&record(".c", 2, 0));

        assert_eq!(stats.per_extension()[".py"].total, 8);
        assert_eq!(stats.per_extension()[".py"].comments, 1);
        assert_eq!(stats.file_counts()[".py"], 2);
        assert_eq!(stats.total_files(), 3);
        assert_eq!(sum_of_totals(&stats), stats.total_lines());
    }

    #[test]
    fn test_merge_keeps_sum_invariant() {
        let mut left = LanguageStats::new();
        left.record(&record(".js", 10, 4));
        let mut right = LanguageStats::new();
        right.record(&record(".js", 1, 1));
        right.record(&record("makefile", 7, 0));

        left.merge(right);
        assert_eq!(left.total_lines(), 18);
        assert_eq!(left.total_files(), 3);
        assert_eq!(left.per_extension()[".js"].comments, 5);
        assert_eq!(sum_of_totals(&left), left.total_lines());
    }

    #[test]
    fn test_percentage_handles_empty_scan() {
        let stats = LanguageStats::new();
        assert_eq!(stats.percentage_of_total(0), 0.0);
    }
}
