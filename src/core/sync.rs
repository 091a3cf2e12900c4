//! Synchronizers: single-pass read-modify-write cycles over the record
//!
//! Each operation here is one short-lived run: acquire the advisory lock,
//! load the record, compute the new state fully in memory, persist at most
//! once, exit. The operations share no runtime state with each other;
//! coordination across trigger points (manual bump, scheduled sync,
//! post-commit hook) comes from the lock plus the idempotence of each
//! transformation.

use crate::core::config::KeepConfig;
use crate::core::error::{GitError, KeepError, KeepResult};
use crate::core::lock::RecordLock;
use crate::core::vcs::CommitOracle;
use crate::record::store;
use crate::record::{BumpLevel, RecordFile, ReleaseRecord};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How a synchronizer run ended
#[derive(Debug)]
pub enum SyncOutcome {
  /// The record was transformed and written
  Persisted(ReleaseRecord),
  /// The record already matched the target; nothing was written
  Skipped(ReleaseRecord),
}

/// Shared inputs for one synchronizer run
pub struct SyncContext {
  pub record_path: PathBuf,
  pub repo_dir: PathBuf,
  pub oracle_timeout: Duration,
  pub lock_timeout: Duration,
}

impl SyncContext {
  /// Build a context for `workspace`, honoring an explicit record path
  /// override (CLI flag) over the configured one
  pub fn new(workspace: &Path, config: &KeepConfig, record_override: Option<PathBuf>) -> Self {
    let record_path = record_override.unwrap_or_else(|| config.record.path.clone());
    let record_path = if record_path.is_absolute() {
      record_path
    } else {
      workspace.join(record_path)
    };

    Self {
      record_path,
      repo_dir: workspace.to_path_buf(),
      oracle_timeout: config.oracle_timeout(),
      lock_timeout: config.lock_timeout(),
    }
  }

  fn oracle(&self) -> CommitOracle {
    CommitOracle::with_timeout(&self.repo_dir, self.oracle_timeout)
  }
}

/// Today's calendar date on the operator's wall clock
pub fn today() -> NaiveDate {
  Local::now().date_naive()
}

/// Bump the version, derive the build number, stamp the date, append a
/// milestone.
///
/// Build number precedence: an explicit value, else the commit count, else
/// the stored value stays as it is.
pub fn manual_bump(
  ctx: &SyncContext,
  level: BumpLevel,
  explicit_build: Option<u64>,
  features: Vec<String>,
) -> KeepResult<ReleaseRecord> {
  let build = explicit_build.or_else(|| ctx.oracle().commit_count());

  let _lock = RecordLock::acquire(&ctx.record_path, ctx.lock_timeout)?;
  let mut file = RecordFile::load(&ctx.record_path)?;
  let record = ReleaseRecord::read_from(&file)?;

  let updated = record.apply_bump(level, build, today(), features);
  store::persist(&mut file, &record, &updated)?;

  Ok(updated)
}

/// Set the release date to today's calendar date; skip if converged
pub fn date_sync_today(ctx: &SyncContext) -> KeepResult<SyncOutcome> {
  date_sync(ctx, today())
}

/// Set the release date to the date of the latest commit; skip if converged.
///
/// Fails with `SourceUnavailable` when the history cannot be queried - this
/// variant never falls back to the current date, which would silently turn
/// it into a different operation.
pub fn date_sync_last_commit(ctx: &SyncContext) -> KeepResult<SyncOutcome> {
  let target = ctx.oracle().latest_commit_date().ok_or_else(|| {
    KeepError::Git(GitError::SourceUnavailable {
      reason: format!("no commit date available in {}", ctx.repo_dir.display()),
    })
  })?;

  date_sync(ctx, target)
}

/// Rewrite the release date and every milestone date to today.
///
/// Always writes, even when every date already matches; there is no
/// convergence check for this operation.
pub fn bulk_date_rewrite(ctx: &SyncContext) -> KeepResult<ReleaseRecord> {
  let _lock = RecordLock::acquire(&ctx.record_path, ctx.lock_timeout)?;
  let mut file = RecordFile::load(&ctx.record_path)?;
  let record = ReleaseRecord::read_from(&file)?;

  let updated = record.apply_bulk_date_rewrite(today());
  store::persist(&mut file, &record, &updated)?;

  Ok(updated)
}

fn date_sync(ctx: &SyncContext, target: NaiveDate) -> KeepResult<SyncOutcome> {
  let _lock = RecordLock::acquire(&ctx.record_path, ctx.lock_timeout)?;
  let mut file = RecordFile::load(&ctx.record_path)?;
  let record = ReleaseRecord::read_from(&file)?;

  match record.apply_date_sync(target) {
    None => Ok(SyncOutcome::Skipped(record)),
    Some(updated) => {
      store::persist(&mut file, &record, &updated)?;
      Ok(SyncOutcome::Persisted(updated))
    }
  }
}
