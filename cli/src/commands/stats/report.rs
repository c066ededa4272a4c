//! # AuditRS Codebase Report (`commands::stats::report`)
//!
//! File: cli/src/commands/stats/report.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! Renders `codebase_report.txt`. Extensions and archive formats are listed in
//! sorted order so two runs over the same tree produce identical reports.
//!
use crate::common::lang::stats::LanguageStats;
use crate::common::pipeline::unpack::ArchiveHistogram;
use std::fmt::Write;

/// File name of the report, written into the scanned root.
pub const REPORT_FILE_NAME: &str = "codebase_report.txt";

pub fn render(histogram: &ArchiveHistogram, stats: &LanguageStats) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, histogram, stats);
    out
}

fn write_report(
    out: &mut String,
    histogram: &ArchiveHistogram,
    stats: &LanguageStats,
) -> std::fmt::Result {
    writeln!(out, "Total archives found: {}", histogram.total())?;
    writeln!(out, "Archives by type:")?;
    for (format, count) in histogram.iter() {
        writeln!(out, "{}: {}", format, count)?;
    }

    writeln!(out)?;
    writeln!(out, "Total files found: {}", stats.total_files())?;
    writeln!(out, "Total lines of code found: {}", stats.total_lines())?;

    writeln!(out)?;
    writeln!(out, "Files of each type found:")?;
    for (ext, files) in stats.file_counts() {
        writeln!(out, "{}: {}", ext, files)?;
    }

    writeln!(out)?;
    writeln!(out, "Language statistics:")?;
    for (ext, lines) in stats.per_extension() {
        writeln!(
            out,
            "{}: {} lines [{} code - {} comments] ({:.2}%)",
            ext,
            lines.total,
            lines.code,
            lines.comments,
            stats.percentage_of_total(lines.total)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::archive::ArchiveFormat;
    use crate::common::lang::classify::LineCounts;
    use crate::common::lang::stats::FileRecord;
    use std::path::PathBuf;

    #[test]
    fn test_render_layout() {
        let mut histogram = ArchiveHistogram::default();
        histogram.record(ArchiveFormat::Zip);
        histogram.record(ArchiveFormat::TarGz);
        histogram.record(ArchiveFormat::Zip);

        let mut stats = LanguageStats::new();
        stats.record(&FileRecord {
            path: PathBuf::from("a.py"),
            extension: ".py".to_string(),
            bytes: 10,
            lines: LineCounts {
                total: 3,
                code: 2,
                comments: 1,
            },
        });
        stats.record(&FileRecord {
            path: PathBuf::from("b.c"),
            extension: ".c".to_string(),
            bytes: 4,
            lines: LineCounts {
                total: 1,
                code: 1,
                comments: 0,
            },
        });

        let expected = "\
Total archives found: 3
Archives by type:
.tar.gz: 1
.zip: 2

Total files found: 2
Total lines of code found: 4

Files of each type found:
.c: 1
.py: 1

Language statistics:
.c: 1 lines [1 code - 0 comments] (25.00%)
.py: 3 lines [2 code - 1 comments] (75.00%)
";
        assert_eq!(render(&histogram, &stats), expected);
    }

    #[test]
    fn test_render_empty_tree() {
        let report = render(&ArchiveHistogram::default(), &LanguageStats::new());
        assert!(report.starts_with("Total archives found: 0\nArchives by type:\n\n"));
        assert!(report.contains("Total lines of code found: 0"));
    }
}
