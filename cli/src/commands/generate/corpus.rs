//! # AuditRS Synthetic Corpus (`commands::generate::corpus`)
//!
//! File: cli/src/commands/generate/corpus.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Builds a random tree of source files and packs it into nested archives,
//! giving `stats`, `insert` and `search` something realistic to chew on.
//!
//! ## Architecture
//!
//! 1. For every requested subdirectory, pick a depth in `1..=max_depth` and
//!    create a chain of directories with random four-digit names.
//! 2. Fill every directory of every chain with `num_files` files. Each file
//!    takes its extension from a random language, has a 5 to 10 character
//!    alphanumeric stem and holds 5 to 20 alphanumeric lines of 10 to 80
//!    characters. No line can look like a comment, so every generated line
//!    is counted as code by `stats`.
//! 3. Archive the directories deepest first, each into a random format next
//!    to itself, and remove the directory. Parents therefore contain their
//!    children as archives.
//!
//! All randomness comes from the caller's `Rng`; a seeded `StdRng` gives the
//! same corpus every time.
//!
use crate::common::archive::{self, ArchiveFormat};
use crate::common::fs::io::ensure_dir_exists;
use crate::common::lang::extensions::CORPUS_LANGUAGES;
use crate::core::error::Result;
use anyhow::Context;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What to generate.
#[derive(Debug, Clone)]
pub struct CorpusParams {
    pub parent: PathBuf,
    pub num_subdirs: usize,
    pub num_files: usize,
    pub max_depth: usize,
}

/// What was generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub subdirectories: usize,
    pub files: u64,
    pub lines: u64,
    pub file_counts: BTreeMap<String, u64>,
    pub line_counts: BTreeMap<String, u64>,
}

impl GenerationSummary {
    fn record(&mut self, extension: &str, lines: u64) {
        *self.file_counts.entry(extension.to_string()).or_default() += 1;
        *self.line_counts.entry(extension.to_string()).or_default() += lines;
        self.files += 1;
        self.lines += lines;
    }
}

fn random_string<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

fn random_extension<R: Rng>(rng: &mut R) -> &'static str {
    let (_, extensions) = CORPUS_LANGUAGES[rng.gen_range(0..CORPUS_LANGUAGES.len())];
    extensions[rng.gen_range(0..extensions.len())]
}

fn directory_chain<R: Rng>(rng: &mut R, parent: &Path, max_depth: usize) -> Result<Vec<PathBuf>> {
    let depth = rng.gen_range(1..=max_depth);
    let mut current = parent.to_path_buf();
    let mut chain = Vec::with_capacity(depth);
    for _ in 0..depth {
        current = current.join(rng.gen_range(1000..=9999).to_string());
        fs::create_dir_all(&current)
            .with_context(|| format!("Failed to create {}", current.display()))?;
        chain.push(current.clone());
    }
    Ok(chain)
}

fn write_random_file<R: Rng>(
    rng: &mut R,
    dir: &Path,
    summary: &mut GenerationSummary,
) -> Result<()> {
    let extension = random_extension(rng);
    let stem_len = rng.gen_range(5..=10);
    let name = format!("{}{}", random_string(rng, stem_len), extension);
    let num_lines = rng.gen_range(5..=20);
    let lines: Vec<String> = (0..num_lines)
        .map(|_| {
            let len = rng.gen_range(10..=80);
            random_string(rng, len)
        })
        .collect();

    let path = dir.join(name);
    fs::write(&path, lines.join("\n"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    summary.record(extension, num_lines as u64);
    Ok(())
}

fn archive_directory<R: Rng>(rng: &mut R, dir: &Path) -> Result<PathBuf> {
    let formats = ArchiveFormat::creatable();
    let format = formats[rng.gen_range(0..formats.len())];
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dest = dir.with_file_name(format!("{}{}", name, format.suffix()));

    archive::create(dir, &dest, format)?;
    fs::remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
    debug!("Packed {} into {}", dir.display(), dest.display());
    Ok(dest)
}

/// # Generate Corpus (`generate_corpus`)
///
/// Creates the random tree under `params.parent` and archives it.
///
/// ## Returns
///
/// * `Result<GenerationSummary>` - Counts of directories, files and lines
///   written, before archiving.
pub fn generate_corpus<R: Rng>(params: &CorpusParams, rng: &mut R) -> Result<GenerationSummary> {
    ensure_dir_exists(&params.parent)?;
    let mut summary = GenerationSummary::default();
    let mut created = BTreeSet::new();

    for _ in 0..params.num_subdirs {
        let chain = directory_chain(rng, &params.parent, params.max_depth.max(1))?;
        for dir in &chain {
            for _ in 0..params.num_files {
                write_random_file(rng, dir, &mut summary)?;
            }
        }
        created.extend(chain);
    }
    summary.subdirectories = created.len();
    info!(
        "Generated {} files in {} directories under {}",
        summary.files,
        summary.subdirectories,
        params.parent.display()
    );

    let mut deepest_first: Vec<PathBuf> = created.into_iter().collect();
    deepest_first.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));
    for dir in deepest_first {
        archive_directory(rng, &dir)?;
    }
    Ok(summary)
}
