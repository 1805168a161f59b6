//! Integration tests for the envsync command-line surface
//!
//! Each test runs the compiled binary inside an isolated temporary project
//! directory. The remote Convex CLI is replaced by a small shell script that
//! serves a canned `env list` response and records every `env set` call, so
//! exit codes, dry-run behavior, and best-effort push semantics can be
//! asserted end to end without a real deployment.

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FAKE_CLI: &str = r#"#!/bin/sh
if [ "$1" = "env" ] && [ "$2" = "list" ]; then
    cat remote-listing.txt 2>/dev/null
    exit 0
fi
if [ "$1" = "env" ] && [ "$2" = "set" ]; then
    echo "$@" >> set-calls.log
    case "$3" in
        FAIL_*) exit 1 ;;
    esac
    exit 0
fi
echo "unexpected arguments: $@" >&2
exit 1
"#;

/// Create a project directory with the fake remote CLI and a config
/// pointing envsync at it.
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();

    let cli_path = dir.path().join("fake-convex");
    fs::write(&cli_path, FAKE_CLI).unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&cli_path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fs::write(
        dir.path().join("envsync.toml"),
        "[remote]\nprogram = \"./fake-convex\"\nbase_args = []\n",
    )
    .unwrap();

    dir
}

fn envsync(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envsync"))
        .args(args)
        .current_dir(dir)
        .env_remove("ENVSYNC_CONFIG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn set_calls(dir: &Path) -> Vec<String> {
    match fs::read_to_string(dir.join("set-calls.log")) {
        Ok(content) => content.lines().map(|l| l.to_string()).collect(),
        Err(_) => Vec::new(),
    }
}

// =========================================================================
// Usage Errors
// =========================================================================

#[test]
fn test_missing_tier_exits_one_with_usage() {
    let dir = setup_project();
    let output = envsync(dir.path(), &["verify"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Expected tier"));
}

#[test]
fn test_invalid_tier_exits_one() {
    let dir = setup_project();
    let output = envsync(dir.path(), &["verify", "staging"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid tier: staging"));
}

#[test]
fn test_push_all_is_rejected() {
    let dir = setup_project();
    let output = envsync(dir.path(), &["push", "all"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not supported for push"));
}

#[test]
fn test_preview_name_rejected_outside_preview_tier() {
    let dir = setup_project();
    let output = envsync(dir.path(), &["verify", "dev", "feature-x"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("preview tier"));
}

// =========================================================================
// Verify
// =========================================================================

#[test]
fn test_verify_in_sync_exits_zero() {
    let dir = setup_project();
    fs::write(dir.path().join("remote-listing.txt"), "A=1\nB=2\n").unwrap();
    fs::write(
        dir.path().join(".env.convex.development"),
        "A=\"1\"\nB=\"2\"\n",
    )
    .unwrap();

    let output = envsync(dir.path(), &["verify", "dev"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("in sync"));
}

#[test]
fn test_verify_reports_drift_in_both_directions() {
    let dir = setup_project();
    fs::write(dir.path().join("remote-listing.txt"), "A=1\nB=2\n").unwrap();
    fs::write(
        dir.path().join(".env.convex.development"),
        "C=\"3\"\nA=\"1\"\n",
    )
    .unwrap();

    let output = envsync(dir.path(), &["verify", "development"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("missing on the deployment"));
    assert!(out.contains("- C"));
    assert!(out.contains("missing locally"));
    assert!(out.contains("- B"));
}

#[test]
fn test_verify_missing_file_points_to_pull() {
    let dir = setup_project();

    let output = envsync(dir.path(), &["verify", "dev"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("envsync pull development"));
}

#[test]
fn test_verify_all_aggregates_issue_status() {
    let dir = setup_project();
    fs::write(dir.path().join("remote-listing.txt"), "A=1\n").unwrap();
    // Development matches; production and preview files are missing.
    fs::write(dir.path().join(".env.convex.development"), "A=\"1\"\n").unwrap();

    let output = envsync(dir.path(), &["verify", "all"]);

    assert_eq!(output.status.code(), Some(1));
}

// =========================================================================
// Pull
// =========================================================================

#[test]
fn test_pull_writes_header_and_quoted_entries() {
    let dir = setup_project();
    fs::write(
        dir.path().join("remote-listing.txt"),
        "API_KEY=abc\nURL=https://x/?a=1&b=2\n",
    )
    .unwrap();

    let output = envsync(dir.path(), &["pull", "dev"]);

    assert_eq!(output.status.code(), Some(0));
    let content = fs::read_to_string(dir.path().join(".env.convex.development")).unwrap();
    assert!(content.starts_with("# Convex development environment variables\n"));
    assert!(content.contains("do not commit"));
    assert!(content.contains("API_KEY=\"abc\"\n"));
    assert!(content.contains("URL=\"https://x/?a=1&b=2\"\n"));
}

#[test]
fn test_pull_dry_run_leaves_absent_file_absent() {
    let dir = setup_project();
    fs::write(dir.path().join("remote-listing.txt"), "A=1\n").unwrap();

    let output = envsync(dir.path(), &["pull", "dev", "--dry-run"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(!dir.path().join(".env.convex.development").exists());
    let out = stdout(&output);
    assert!(out.contains("DRY RUN"));
    assert!(out.contains("A=\"1\""));
}

#[test]
fn test_pull_dry_run_leaves_existing_file_byte_identical() {
    let dir = setup_project();
    fs::write(dir.path().join("remote-listing.txt"), "NEW=value\n").unwrap();
    let target = dir.path().join(".env.convex.development");
    fs::write(&target, "OLD=\"content\"\n").unwrap();

    let output = envsync(dir.path(), &["pull", "dev", "--dry-run"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&target).unwrap(), "OLD=\"content\"\n");
}

// =========================================================================
// Push
// =========================================================================

#[test]
fn test_push_sends_each_key_unescaped() {
    let dir = setup_project();
    fs::write(
        dir.path().join(".env.convex.development"),
        "A=\"1\"\nQUOTED=\"say \\\"hi\\\"\"\n",
    )
    .unwrap();

    let output = envsync(dir.path(), &["push", "dev"]);

    assert_eq!(output.status.code(), Some(0));
    let calls = set_calls(dir.path());
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "env set A 1");
    assert_eq!(calls[1], "env set QUOTED say \"hi\"");
}

#[test]
fn test_push_dry_run_makes_no_remote_calls() {
    let dir = setup_project();
    fs::write(
        dir.path().join(".env.convex.development"),
        "A=\"1\"\nB=\"2\"\nC=\"3\"\n",
    )
    .unwrap();

    let output = envsync(dir.path(), &["push", "dev", "--dry-run"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(set_calls(dir.path()).is_empty());
    assert_eq!(stdout(&output).matches("Would run:").count(), 3);
}

#[test]
fn test_push_continues_past_per_key_failures() {
    let dir = setup_project();
    fs::write(
        dir.path().join(".env.convex.development"),
        "A=\"1\"\nFAIL_MID=\"2\"\nC=\"3\"\n",
    )
    .unwrap();

    let output = envsync(dir.path(), &["push", "dev"]);

    // The failing key is reported but the batch still completes.
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(set_calls(dir.path()).len(), 3);
    assert!(stderr(&output).contains("FAIL_MID"));
    assert!(stdout(&output).contains("1 failed"));
}

#[test]
fn test_push_missing_file_points_to_pull() {
    let dir = setup_project();

    let output = envsync(dir.path(), &["push", "production"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("envsync pull production"));
    assert!(set_calls(dir.path()).is_empty());
}

#[test]
fn test_preview_push_passes_deployment_flags() {
    let dir = setup_project();
    fs::write(dir.path().join("remote-listing.txt"), "X=base\n").unwrap();
    fs::write(dir.path().join(".env.convex.preview"), "X=\"override\"\n").unwrap();

    let output = envsync(dir.path(), &["push", "preview", "feature-x"]);

    assert_eq!(output.status.code(), Some(0));
    let calls = set_calls(dir.path());
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("--env-file .env.preview"));
    assert!(calls[0].contains("--preview-name feature-x"));
}

#[test]
fn test_preview_push_warns_and_proceeds_with_yes() {
    let dir = setup_project();
    // No remote listing at all: every preview key is missing from dev/prod.
    fs::write(dir.path().join(".env.convex.preview"), "X=\"1\"\n").unwrap();

    let output = envsync(dir.path(), &["push", "preview", "--yes"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Preview keys without a base value"));
    assert!(stdout(&output).contains("missing in development"));
    assert!(stdout(&output).contains("missing in production"));
    assert_eq!(set_calls(dir.path()).len(), 1);
}

#[test]
fn test_preview_push_dry_run_warns_without_blocking() {
    let dir = setup_project();
    fs::write(dir.path().join(".env.convex.preview"), "X=\"1\"\n").unwrap();

    // No --yes and no terminal: the gate must not block in dry-run mode.
    let output = envsync(dir.path(), &["push", "preview", "--dry-run"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Preview keys without a base value"));
    assert!(set_calls(dir.path()).is_empty());
}
