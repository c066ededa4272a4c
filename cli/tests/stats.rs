//! # AuditRS CLI Stats Integration Tests
//!
//! File: cli/tests/stats.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! Integration tests for `auditrs stats`: line classification on plain files,
//! flattening of nested archives, parallel mode and failure handling.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// A lone Python file: one comment, two code lines, one blank line.
#[test]
fn test_stats_single_python_file() {
    let workdir = tempdir().unwrap();
    let root = workdir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.py"), "# hi\nx = 1\n\nprint(x)\n").unwrap();

    auditrs_cmd(workdir.path())
        .args(["stats", root.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let report = fs::read_to_string(root.join("codebase_report.txt")).unwrap();
    assert_eq!(report_number(&report, "Total archives found"), 0);
    assert_eq!(report_number(&report, "Total files found"), 1);
    assert_eq!(report_number(&report, "Total lines of code found"), 3);
    assert!(report.contains(".py: 3 lines [2 code - 1 comments] (100.00%)"));
}

/// archive1.zip contains archive2.tar.gz, which contains x.c.
#[test]
fn test_stats_flattens_nested_archives() {
    let workdir = tempdir().unwrap();
    let root = workdir.path().join("root");
    fs::create_dir(&root).unwrap();

    let staging = workdir.path().join("staging");
    fs::create_dir(&staging).unwrap();
    fs::write(staging.join("x.c"), "int a = 1;\nint b = 2;\n").unwrap();
    let inner = workdir.path().join("archive2.tar.gz");
    write_tar_gz(&inner, &staging, "src");
    let inner_bytes = fs::read(&inner).unwrap();
    write_zip(&root.join("archive1.zip"), &[("archive2.tar.gz", &inner_bytes)]);

    auditrs_cmd(workdir.path())
        .args(["stats", root.to_str().unwrap()])
        .assert()
        .success();

    let report = fs::read_to_string(root.join("codebase_report.txt")).unwrap();
    assert_eq!(report_number(&report, "Total archives found"), 2);
    assert_eq!(report_number(&report, ".zip"), 1);
    assert_eq!(report_number(&report, ".tar.gz"), 1);
    assert_eq!(report_number(&report, "Total lines of code found"), 2);
    assert!(report.contains(".c: 2 lines [2 code - 0 comments] (100.00%)"));

    // The tree is flattened in place.
    assert_eq!(entry_names(&root), vec!["codebase_report.txt", "src"]);
    assert!(root.join("src/x.c").is_file());
}

/// Same nesting, but the inner tar holds x.c at its own root.
#[test]
fn test_stats_rootless_inner_tar_flattens_into_root() {
    let workdir = tempdir().unwrap();
    let root = workdir.path().join("root");
    fs::create_dir(&root).unwrap();

    let staging = workdir.path().join("staging");
    fs::create_dir(&staging).unwrap();
    fs::write(staging.join("x.c"), "// lone\nint a;\n").unwrap();
    let inner = workdir.path().join("archive2.tar.gz");
    write_tar_gz(&inner, &staging, ".");
    let inner_bytes = fs::read(&inner).unwrap();
    write_zip(&root.join("archive1.zip"), &[("archive2.tar.gz", &inner_bytes)]);

    auditrs_cmd(workdir.path())
        .args(["stats", root.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(entry_names(&root), vec!["codebase_report.txt", "x.c"]);
    let report = fs::read_to_string(root.join("codebase_report.txt")).unwrap();
    assert_eq!(report_number(&report, "Total archives found"), 2);
    assert!(report.contains(".c: 2 lines [1 code - 1 comments] (100.00%)"));
}

#[test]
fn test_parallel_mode_matches_sequential() {
    let workdir = tempdir().unwrap();
    let build = |name: &str| {
        let root = workdir.path().join(name);
        fs::create_dir_all(root.join("lib/deep")).unwrap();
        fs::create_dir_all(root.join("app")).unwrap();
        fs::write(root.join("setup.py"), "\"\"\"\nDocs\n\"\"\"\nimport os\n").unwrap();
        fs::write(root.join("lib/a.js"), "/* a */\nlet a;\n").unwrap();
        fs::write(root.join("lib/deep/b.c"), "// b\nint b;\n").unwrap();
        fs::write(root.join("app/Main.java"), "class Main {}\n").unwrap();
        root
    };
    let sequential = build("seq");
    let parallel = build("par");

    auditrs_cmd(workdir.path())
        .args(["stats", sequential.to_str().unwrap()])
        .assert()
        .success();
    auditrs_cmd(workdir.path())
        .args(["stats", parallel.to_str().unwrap(), "--parallel", "--workers", "2"])
        .assert()
        .success();

    let seq_report = fs::read_to_string(sequential.join("codebase_report.txt")).unwrap();
    let par_report = fs::read_to_string(parallel.join("codebase_report.txt")).unwrap();
    assert_eq!(seq_report, par_report);
    assert_eq!(report_number(&seq_report, "Total files found"), 4);
    assert_eq!(report_number(&seq_report, "Total lines of code found"), 9);
}

#[test]
fn test_rerun_does_not_count_previous_report() {
    let workdir = tempdir().unwrap();
    let root = workdir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("main.c"), "int main;\n").unwrap();

    for _ in 0..2 {
        auditrs_cmd(workdir.path())
            .args(["stats", root.to_str().unwrap()])
            .assert()
            .success();
    }
    let report = fs::read_to_string(root.join("codebase_report.txt")).unwrap();
    assert_eq!(report_number(&report, "Total files found"), 1);
}

#[test]
fn test_corrupt_archive_fails_without_report() {
    let workdir = tempdir().unwrap();
    let root = workdir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("broken.tar.gz"), "this is not gzip").unwrap();

    auditrs_cmd(workdir.path())
        .args(["stats", root.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to extract archive"));
    assert!(!root.join("codebase_report.txt").exists());
}

#[test]
fn test_zero_workers_rejected() {
    let workdir = tempdir().unwrap();
    auditrs_cmd(workdir.path())
        .args(["stats", ".", "--parallel", "--workers", "0"])
        .assert()
        .code(1);
}

#[test]
fn test_workers_without_parallel_rejected() {
    let workdir = tempdir().unwrap();
    auditrs_cmd(workdir.path())
        .args(["stats", ".", "--workers", "2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--parallel"));
}
