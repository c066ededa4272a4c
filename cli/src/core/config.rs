//! # AuditRS Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module implements the configuration system for AuditRS, handling
//! loading, merging, validation, and access to configuration data. It combines
//! built-in defaults, user settings, and project-specific overrides.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.auditrs.toml` in current directory or ancestors
//! 2. User-specific `<config dir>/auditrs/config.toml`
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [reports]
//! directory = "~/audit-reports"
//!
//! [stats]
//! workers = 6
//! max_passes = 32
//!
//! [markers]
//! terms = ["License", "Copyright"]
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let report_dir = cfg.reports.directory_path();
//! let workers = cfg.stats.workers.unwrap_or_else(default_workers);
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the modules that need it. Command-line flags always win over it.
//!
use crate::common::markers::LICENSE_TERMS;
use crate::core::error::{AuditError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
}

/// Where report files of `generate`, `insert` and `search` are written.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ReportsConfig {
    /// Report directory (can use ~). Will be expanded.
    #[serde(default = "default_report_dir")]
    pub directory: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            directory: default_report_dir(),
        }
    }
}

impl ReportsConfig {
    pub fn directory_path(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }

    /// The report directory for this run: the CLI override when present,
    /// otherwise the configured directory.
    pub fn resolve(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.directory_path())
    }
}

/// Settings for `auditrs stats`.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    /// Worker count for `--parallel`. Falls back to `default_workers()`.
    #[serde(default)]
    pub workers: Option<usize>,
    /// Upper bound on flatten passes before the run is aborted.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            workers: None,
            max_passes: default_max_passes(),
        }
    }
}

/// Marker vocabulary shared by `insert` and `search`.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct MarkersConfig {
    #[serde(default = "default_terms")]
    pub terms: Vec<String>,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            terms: default_terms(),
        }
    }
}

fn default_report_dir() -> String {
    ".".to_string()
}
fn default_max_passes() -> usize {
    64
}
fn default_terms() -> Vec<String> {
    LICENSE_TERMS.iter().map(|t| t.to_string()).collect()
}

/// One less than the available hardware parallelism, never below one.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

const PROJECT_CONFIG_FILENAME: &str = ".auditrs.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "AuditRS", "auditrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.auditrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Ok(Some(project_config));
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.reports.directory = if project_cfg.reports.directory != default_report_dir() {
        project_cfg.reports.directory
    } else {
        user.reports.directory
    };
    merged.stats.workers = project_cfg.stats.workers.or(user.stats.workers);
    merged.stats.max_passes = if project_cfg.stats.max_passes != default_max_passes() {
        project_cfg.stats.max_passes
    } else {
        user.stats.max_passes
    };
    merged.markers.terms = if project_cfg.markers.terms != default_terms() {
        project_cfg.markers.terms
    } else {
        user.markers.terms
    };
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    config.reports.directory = shellexpand::tilde(&config.reports.directory).into_owned();
    debug!("Expanded report directory: {}", config.reports.directory);
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    let report_dir = config.reports.directory_path();
    if report_dir.exists() && !report_dir.is_dir() {
        return Err(anyhow!(AuditError::Config(format!(
            "Configured report path '{}' exists but is not a directory.",
            report_dir.display()
        ))));
    }
    if config.stats.workers == Some(0) {
        return Err(anyhow!(AuditError::Config(
            "stats.workers must be at least 1.".to_string()
        )));
    }
    if config.stats.max_passes == 0 {
        return Err(anyhow!(AuditError::Config(
            "stats.max_passes must be at least 1.".to_string()
        )));
    }
    if config.markers.terms.is_empty() {
        return Err(anyhow!(AuditError::Config(
            "markers.terms must contain at least one term.".to_string()
        )));
    }
    if config.markers.terms.iter().any(|t| t.trim().is_empty()) {
        return Err(anyhow!(AuditError::Config(
            "markers.terms cannot contain blank terms.".to_string()
        )));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
