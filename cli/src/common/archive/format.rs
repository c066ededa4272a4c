//! # AuditRS Archive Format Detection (`common::archive::format`)
//!
//! File: cli/src/common/archive/format.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Archive formats are derived purely from a file name's suffix chain,
//! case-insensitively, with the longest known suffix winning (`.tar.gz` beats
//! `.gz`, which on its own is not a recognised archive). Anything else is
//! `ArchiveFormat::Unknown`, which callers must treat as a failure rather than
//! silently skipping the file.
//!
use std::fmt;
use std::path::{Path, PathBuf};

/// Container formats AuditRS can extract and create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchiveFormat {
    Tar,
    TarGz,
    TarBz2,
    Zip,
    Unknown,
}

/// Recognised suffixes, longest first.
const KNOWN_SUFFIXES: [(&str, ArchiveFormat); 5] = [
    (".tar.bz2", ArchiveFormat::TarBz2),
    (".tar.gz", ArchiveFormat::TarGz),
    (".tgz", ArchiveFormat::TarGz),
    (".tar", ArchiveFormat::Tar),
    (".zip", ArchiveFormat::Zip),
];

impl ArchiveFormat {
    /// Canonical suffix used when naming new archives of this format.
    pub fn suffix(self) -> &'static str {
        match self {
            ArchiveFormat::Tar => ".tar",
            ArchiveFormat::TarGz => ".tar.gz",
            ArchiveFormat::TarBz2 => ".tar.bz2",
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::Unknown => "",
        }
    }

    pub fn is_tar_family(self) -> bool {
        matches!(
            self,
            ArchiveFormat::Tar | ArchiveFormat::TarGz | ArchiveFormat::TarBz2
        )
    }

    /// The formats the corpus generator picks from.
    pub fn creatable() -> [ArchiveFormat; 4] {
        [
            ArchiveFormat::Zip,
            ArchiveFormat::Tar,
            ArchiveFormat::TarGz,
            ArchiveFormat::TarBz2,
        ]
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Unknown => write!(f, "unknown"),
            known => write!(f, "{}", known.suffix()),
        }
    }
}

/// Derives the archive format of `path` from its file name.
pub fn detect_format(path: &Path) -> ArchiveFormat {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return ArchiveFormat::Unknown,
    };
    KNOWN_SUFFIXES
        .iter()
        .find(|(suffix, _)| name.len() > suffix.len() && name.ends_with(suffix))
        .map(|(_, format)| *format)
        .unwrap_or(ArchiveFormat::Unknown)
}

/// True when `path` carries one of the recognised archive suffixes.
pub fn is_archive(path: &Path) -> bool {
    detect_format(path) != ArchiveFormat::Unknown
}

/// A filesystem path together with the format derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRef {
    pub path: PathBuf,
    pub format: ArchiveFormat,
}

impl ArchiveRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = detect_format(&path);
        Self { path, format }
    }
}
