//! # AuditRS Line Classification (`common::lang::classify`)
//!
//! File: cli/src/common/lang/classify.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Heuristic code/comment classification by line prefix. This is not a parser:
//! string literals are not recognised and a multi-line start marker at the
//! beginning of a line always opens a comment region. Reports are compared
//! across runs, so the rules below must stay exactly as they are.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`. For every line, after trimming
//! surrounding whitespace:
//! 1. Blank lines are not counted at all.
//! 2. Inside an open multi-line region the line is a comment; the region
//!    closes when the line contains the end marker.
//! 3. A line starting with the multi-line start marker is a comment. It opens
//!    a region unless the end marker also appears later on the same line.
//! 4. A line starting with the single-line marker is a comment.
//! 5. Anything else is code.
//!
use super::styles::CommentStyle;
use std::ops::AddAssign;

/// Per-file (or aggregated) line counts. `code + comments == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub total: u64,
    pub code: u64,
    pub comments: u64,
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.code += other.code;
        self.comments += other.comments;
    }
}

/// Classifies every line of `text` with the given comment style.
pub fn classify_text(text: &str, style: &CommentStyle) -> LineCounts {
    let mut counts = LineCounts::default();
    let mut in_block = false;

    for line in text.split(|c| c == '\n' || c == '\r').map(str::trim) {
        if line.is_empty() {
            continue;
        }
        counts.total += 1;

        if in_block {
            counts.comments += 1;
            if line.contains(style.multi_end) {
                in_block = false;
            }
        } else if let Some(rest) = line.strip_prefix(style.multi_start) {
            counts.comments += 1;
            in_block = !rest.contains(style.multi_end);
        } else if line.starts_with(style.single) {
            counts.comments += 1;
        }
    }

    counts.code = counts.total - counts.comments;
    counts
}

/// Classifies raw file bytes. Invalid UTF-8 sequences are dropped, never fatal.
pub fn classify_bytes(bytes: &[u8], style: &CommentStyle) -> LineCounts {
    match std::str::from_utf8(bytes) {
        Ok(text) => classify_text(text, style),
        Err(_) => classify_text(&strip_invalid_utf8(bytes), style),
    }
}

fn strip_invalid_utf8(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
