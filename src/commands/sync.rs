//! Date sync commands (sync-today, sync-last-commit, post-commit-hook)

use crate::core::error::KeepResult;
use crate::core::sync::{self, SyncOutcome};
use std::path::PathBuf;

/// Run the sync-today command
pub fn run_sync_today(record: Option<PathBuf>) -> KeepResult<()> {
  let ctx = super::sync_context(record)?;

  match sync::date_sync_today(&ctx)? {
    SyncOutcome::Skipped(current) => {
      println!("✅ Release date already up to date ({})", current.release_date);
    }
    SyncOutcome::Persisted(updated) => {
      println!("📅 Release date set to {}", updated.release_date);
    }
  }

  Ok(())
}

/// Run the sync-last-commit command (also the post-commit hook entry point)
pub fn run_sync_last_commit(record: Option<PathBuf>) -> KeepResult<()> {
  let ctx = super::sync_context(record)?;

  match sync::date_sync_last_commit(&ctx)? {
    SyncOutcome::Skipped(current) => {
      println!("✅ Release date already matches the latest commit ({})", current.release_date);
    }
    SyncOutcome::Persisted(updated) => {
      println!("📅 Release date set to latest commit date {}", updated.release_date);
    }
  }

  Ok(())
}
