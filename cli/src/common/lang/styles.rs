//! # AuditRS Comment Styles (`common::lang::styles`)
//!
//! File: cli/src/common/lang/styles.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! Static extension -> comment marker table. Extensions not listed fall back
//! to the generic `#` / `"""..."""` style.
//!
use std::path::Path;

/// Single-line marker plus the multi-line start/end pair for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub single: &'static str,
    pub multi_start: &'static str,
    pub multi_end: &'static str,
}

const HASH_DOCSTRING: CommentStyle = CommentStyle {
    single: "#",
    multi_start: "\"\"\"",
    multi_end: "\"\"\"",
};

const SLASH_BLOCK: CommentStyle = CommentStyle {
    single: "//",
    multi_start: "/*",
    multi_end: "*/",
};

const HASH_BLOCK: CommentStyle = CommentStyle {
    single: "#",
    multi_start: "/*",
    multi_end: "*/",
};

/// The style used for any extension without an entry of its own.
pub const DEFAULT_STYLE: CommentStyle = HASH_DOCSTRING;

/// Looks up the comment style for an extension key such as `.py`.
pub fn style_for(extension: &str) -> CommentStyle {
    match extension {
        ".py" => HASH_DOCSTRING,
        ".cjs" | ".js" | ".mjs" | ".ts" | ".tsx" => SLASH_BLOCK,
        ".c" | ".h" | ".cpp" | ".cc" | ".cxx" | ".hpp" | ".hxx" | ".h++" | ".inl" | ".ipp"
        | ".tcc" | ".tpp" => SLASH_BLOCK,
        ".java" => SLASH_BLOCK,
        ".r" | ".rdata" | ".rds" => HASH_BLOCK,
        _ => DEFAULT_STYLE,
    }
}

/// Statistics key for a file: its lower-cased `.ext`, or the lower-cased
/// file name when there is no extension (e.g. `Makefile` -> `makefile`).
pub fn extension_key(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    }
}
