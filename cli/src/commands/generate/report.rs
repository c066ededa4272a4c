//! # AuditRS Generation Report (`commands::generate::report`)
//!
//! File: cli/src/commands/generate/report.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
use super::corpus::{CorpusParams, GenerationSummary};
use std::fmt::Write;

pub const REPORT_FILE_NAME: &str = "generation_statistics.txt";

/// Renders `generation_statistics.txt`. `generated_at` closes the report.
pub fn render(params: &CorpusParams, summary: &GenerationSummary, generated_at: &str) -> String {
    let mut out = String::new();
    let _ = write_report(&mut out, params, summary, generated_at);
    out
}

fn write_report(
    out: &mut String,
    params: &CorpusParams,
    summary: &GenerationSummary,
    generated_at: &str,
) -> std::fmt::Result {
    writeln!(out, "Parent directory: {}", params.parent.display())?;
    writeln!(out, "Number of subdirectories: {}", params.num_subdirs)?;
    writeln!(out, "Number of files per subdirectory: {}", params.num_files)?;
    writeln!(out, "Maximum subdirectory depth: {}", params.max_depth)?;

    writeln!(out)?;
    writeln!(out, "Total subdirectories created: {}", summary.subdirectories)?;
    writeln!(out, "Total files created: {}", summary.files)?;
    writeln!(out, "Total lines of code generated: {}", summary.lines)?;

    writeln!(out)?;
    writeln!(out, "Files of each type created:")?;
    for (ext, files) in &summary.file_counts {
        writeln!(out, "{}: {}", ext, files)?;
    }

    writeln!(out)?;
    writeln!(out, "Code statistics:")?;
    for (ext, lines) in &summary.line_counts {
        let percentage = if summary.lines == 0 {
            0.0
        } else {
            *lines as f64 / summary.lines as f64 * 100.0
        };
        writeln!(out, "{}: {} lines ({:.2}%)", ext, lines, percentage)?;
    }

    writeln!(out)?;
    writeln!(out, "Generated at: {}", generated_at)?;
    Ok(())
}
