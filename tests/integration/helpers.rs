//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// The standard record fixture: version 1.2.3, build 40, one milestone.
/// Carries comments so tests can assert they survive mutations.
pub const FIXTURE: &str = r#"# Release metadata for the example app
build = 40
release-date = "2024-01-01"

[version]
major = 1
minor = 2
patch = 3

# Shipped milestones, oldest first
[[milestones]]
version = "1.2.3"
date = "2024-01-01"
features = ["x"]
"#;

/// A test workspace holding a release record, optionally with git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a workspace with the standard record fixture and no repository
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(path.join("release.toml"), FIXTURE)?;

    Ok(Self { _root: root, path })
  }

  /// Create a workspace with the fixture plus an initialized git repository
  pub fn with_git() -> Result<Self> {
    let ws = Self::new()?;

    git(&ws.path, &["init", "--initial-branch=main"])?;
    git(&ws.path, &["config", "user.name", "Test User"])?;
    git(&ws.path, &["config", "user.email", "test@example.com"])?;

    Ok(ws)
  }

  /// Record an empty commit (keeps the commit count deterministic)
  pub fn commit_empty(&self, message: &str) -> Result<()> {
    git(&self.path, &["commit", "--allow-empty", "-m", message])?;
    Ok(())
  }

  /// Replace the record content
  pub fn write_record(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("release.toml"), content)?;
    Ok(())
  }

  /// Read the record content
  pub fn read_record(&self) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join("release.toml"))?)
  }

  /// Date of the latest commit as git reports it (YYYY-MM-DD)
  pub fn last_commit_date(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%cs"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}

/// Today's date the way the binary stamps it
pub fn today() -> String {
  chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run relkeep and fail the test on a non-zero exit
pub fn run_relkeep(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_relkeep_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "relkeep command failed: relkeep {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run relkeep and hand back the raw output, whatever the exit status
pub fn run_relkeep_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let relkeep_bin = env!("CARGO_BIN_EXE_relkeep");

  Command::new(relkeep_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run relkeep")
}
