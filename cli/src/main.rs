//! # AuditRS Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the AuditRS CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the subcommand handlers
//!
//! ## Architecture
//!
//! - Each subcommand (`stats`, `generate`, `insert`, `search`) is a variant
//!   of the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! auditrs --help
//!
//! # Count lines with increased verbosity
//! auditrs -vv stats ./drop --parallel
//! ```
//!
//! Exit codes: 0 on success (including `--help` and `--version`), 1 on any
//! usage or processing error. Errors are printed to stderr as `Error: ...`.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand arguments and handlers
mod common; // Archive, filesystem, language and pipeline utilities
mod core; // Errors and configuration

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "auditrs",
    about = "AuditRS: codebase auditing for archive-heavy source drops",
    long_about = "Flatten nested archives and count lines of code per language,\n\
                  generate synthetic corpora, and insert or search for marker terms.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Unpack every archive under a root and report lines of code.
    Stats(commands::stats::StatsArgs),
    /// Create a random corpus of source files in nested archives.
    Generate(commands::generate::GenerateArgs),
    /// Insert marker terms into files inside every archive.
    Insert(commands::insert::InsertArgs),
    /// Search files and nested archives for marker terms.
    Search(commands::search::SearchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Stats(args) => commands::stats::handle_stats(args).await,
        Commands::Generate(args) => commands::generate::handle_generate(args).await,
        Commands::Insert(args) => commands::insert::handle_insert(args).await,
        Commands::Search(args) => commands::search::handle_search(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
