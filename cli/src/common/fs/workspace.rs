//! # AuditRS Temporary Workspaces (`common::fs::workspace`)
//!
//! File: cli/src/common/fs/workspace.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! A `TempWorkspace` is an exclusively owned temporary directory created for a
//! single extraction. It is removed when dropped, so every exit path (success,
//! failed mutation, failed repack, early `?` return) cleans up after itself and
//! disk usage stays bounded to one archive's worth of extra space.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, warn};

const WORKSPACE_PREFIX: &str = ".auditrs-";

/// Scoped temporary directory backed by `tempfile::TempDir`.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    /// Creates a workspace in the system temporary directory.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .context("Failed to create temporary workspace")?;
        debug!("Created workspace {:?}", dir.path());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Removes the workspace now. Removal failures are logged, not returned:
    /// the caller's own result is what matters at this point.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove workspace {:?}: {}", path, e);
        } else {
            debug!("Released workspace {:?}", path);
        }
    }
}
