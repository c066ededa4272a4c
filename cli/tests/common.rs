//! # AuditRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: building the
//! `auditrs` command in an isolated environment and writing small archives
//! directly with the archive crates, independent of the code under test.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// # Get AuditRS Command (`auditrs_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `auditrs` binary.
///
/// The command runs inside `workdir` with `XDG_CONFIG_HOME` pointed there as
/// well, so neither a project `.auditrs.toml` nor the user's config leaks
/// into the test. `AUDITRS_REPORT_DIR` is cleared.
///
/// ## Panics
/// Panics if the `auditrs` binary cannot be found via `Command::cargo_bin`.
pub fn auditrs_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("auditrs").expect("Failed to find auditrs binary for testing");
    cmd.current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir)
        .env_remove("AUDITRS_REPORT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `<dest>` as a gzip tarball of `source`, stored under `root_name/`.
pub fn write_tar_gz(dest: &Path, source: &Path, root_name: &str) {
    let file = File::create(dest).expect("create tar.gz");
    let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all(root_name, source)
        .expect("append to tar");
    builder
        .into_inner()
        .expect("finish tar")
        .finish()
        .expect("finish gzip");
}

/// Writes `<dest>` as a zip holding the given `(name, bytes)` entries.
pub fn write_zip(dest: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(dest).expect("create zip");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(bytes).expect("write zip entry");
    }
    writer.finish().expect("finish zip");
}

/// Extracts a gzip tarball into `dest`.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) {
    let file = File::open(archive).expect("open tar.gz");
    tar::Archive::new(flate2::read::GzDecoder::new(file))
        .unpack(dest)
        .expect("unpack tar.gz");
}

/// Reads a report and returns the number after `"<label>: "`.
pub fn report_number(report: &str, label: &str) -> u64 {
    let prefix = format!("{}: ", label);
    report
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(|| panic!("'{}' not found in report:\n{}", label, report))
}

/// Lists the names of the entries directly inside `dir`, sorted.
pub fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
