//! # AuditRS Generate Command (`commands::generate`)
//!
//! File: cli/src/commands/generate/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! `auditrs generate <parent> <num_subdirs> <num_files> <max_depth>` writes a
//! synthetic corpus of random source files packed into nested archives under
//! `<parent>`, then writes `generation_statistics.txt` into the report
//! directory. Running `auditrs stats <parent>` afterwards reports the same
//! total line count as the generation report.
//!
//! ## Examples
//!
//! ```bash
//! auditrs generate ./corpus 5 10 3
//! auditrs generate ./corpus 5 10 3 --seed 42 --report-dir ./reports
//! ```
//!
use crate::common::fs::io::write_string_to_file;
use crate::core::config;
use crate::core::error::{AuditError, Result};
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

pub mod corpus;
pub mod report;

/// # Generate Command Arguments (`GenerateArgs`)
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Directory the corpus is created in (created if missing).
    pub parent: PathBuf,

    /// Number of top-level directory chains to create.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub num_subdirs: u64,

    /// Files written into every directory of every chain.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub num_files: u64,

    /// Maximum length of a directory chain.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub max_depth: u64,

    /// Seed for a reproducible corpus.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for generation_statistics.txt (overrides `reports.directory`).
    #[arg(long, env = "AUDITRS_REPORT_DIR")]
    pub report_dir: Option<PathBuf>,
}

/// # Handle Generate Command (`handle_generate`)
pub async fn handle_generate(args: GenerateArgs) -> Result<()> {
    info!("Handling generate command with args: {:?}", args);
    if args.parent.exists() && !args.parent.is_dir() {
        anyhow::bail!(AuditError::Usage(format!(
            "{} exists and is not a directory",
            args.parent.display()
        )));
    }
    let cfg = config::load_config()?;
    let report_path = cfg
        .reports
        .resolve(args.report_dir.as_deref())
        .join(report::REPORT_FILE_NAME);

    let params = corpus::CorpusParams {
        parent: args.parent.clone(),
        num_subdirs: args.num_subdirs as usize,
        num_files: args.num_files as usize,
        max_depth: args.max_depth as usize,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let task_params = params.clone();
    let summary =
        tokio::task::spawn_blocking(move || corpus::generate_corpus(&task_params, &mut rng))
            .await
            .context("Generation task panicked")??;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    write_string_to_file(
        &report_path,
        &report::render(&params, &summary, &generated_at),
    )?;
    println!(
        "Generated {} files ({} lines) under {}",
        summary.files,
        summary.lines,
        params.parent.display()
    );
    println!("Report written to {}", report_path.display());
    Ok(())
}
