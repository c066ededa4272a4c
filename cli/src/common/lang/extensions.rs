//! # AuditRS Language Extensions (`common::lang::extensions`)
//!
//! File: cli/src/common/lang/extensions.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! Language -> file extension lists used when files are generated, either as
//! the random corpus or as marker carriers inside archives.
//!

/// Languages and the extensions the corpus generator draws from.
pub const CORPUS_LANGUAGES: [(&str, &[&str]); 7] = [
    ("javascript", &[".cjs", ".js", ".mjs"]),
    ("typescript", &[".ts", ".tsx"]),
    ("c", &[".c", ".h"]),
    ("python", &[".py", ".pyc", ".pyd", ".pyo", ".pyw"]),
    ("r", &[".r", ".rdata", ".rds"]),
    ("java", &[".java"]),
    (
        "cpp",
        &[
            ".cc", ".cpp", ".cxx", ".h", ".hpp", ".hxx", ".h++", ".inl", ".ipp", ".tcc", ".tpp",
        ],
    ),
];

/// Source extensions used for marker carrier files, in language order,
/// without duplicates (`.h` is listed by both C and C++).
pub fn marker_extensions() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for (language, extensions) in CORPUS_LANGUAGES {
        for ext in extensions.iter().copied() {
            // Compiled Python artefacts are not source files.
            if language == "python" && ext != ".py" {
                continue;
            }
            if !seen.contains(&ext) {
                seen.push(ext);
            }
        }
    }
    seen
}
