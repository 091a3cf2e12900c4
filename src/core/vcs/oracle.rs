//! Commit oracle - read-only queries against system git
//!
//! Answers two questions about the enclosing repository: the date of the
//! most recent commit and the number of commits reachable from HEAD. Uses
//! system git with an isolated subprocess environment; every failure mode
//! (binary missing, not a repository, empty history, malformed output,
//! deadline expired) degrades to `None`. Callers that cannot proceed without
//! an answer turn `None` into their own fatal error.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Read-only interface to the commit history
pub struct CommitOracle {
  /// Repository working directory
  repo_path: PathBuf,

  /// Deadline for a single git invocation
  timeout: Duration,
}

impl CommitOracle {
  /// Oracle for the repository at `path` with an explicit query deadline
  pub fn with_timeout(path: &Path, timeout: Duration) -> Self {
    Self {
      repo_path: path.to_path_buf(),
      timeout,
    }
  }

  /// Date of the most recent commit, in the committer's local calendar
  pub fn latest_commit_date(&self) -> Option<NaiveDate> {
    let stdout = self.run(&["log", "-1", "--format=%cs"])?;
    parse_date_output(&stdout)
  }

  /// Number of commits reachable from HEAD
  pub fn commit_count(&self) -> Option<u64> {
    let stdout = self.run(&["rev-list", "--count", "HEAD"])?;
    parse_count_output(&stdout)
  }

  /// Run a git query, bounded by the configured deadline.
  ///
  /// The child is polled with `try_wait` and killed when the deadline
  /// expires; expiry is classified the same as any other failure.
  fn run(&self, args: &[&str]) -> Option<String> {
    let mut cmd = self.git_cmd();
    cmd.args(args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().ok()?;
    let deadline = Instant::now() + self.timeout;

    loop {
      match child.try_wait() {
        Ok(Some(status)) => {
          let output = child.wait_with_output().ok()?;
          if !status.success() {
            return None;
          }
          return String::from_utf8(output.stdout).ok();
        }
        Ok(None) => {
          if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return None;
          }
          std::thread::sleep(POLL_INTERVAL);
        }
        Err(_) => {
          let _ = child.kill();
          let _ = child.wait();
          return None;
        }
      }
    }
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to the repo path
  /// - Clears environment variables, whitelisting only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("advice.detachedHead=false");

    cmd
  }
}

/// Parse `git log --format=%cs` output (YYYY-MM-DD)
fn parse_date_output(stdout: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(stdout.trim(), "%Y-%m-%d").ok()
}

/// Parse `git rev-list --count` output
fn parse_count_output(stdout: &str) -> Option<u64> {
  stdout.trim().parse().ok()
}
