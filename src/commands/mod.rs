//! CLI commands for relkeep
//!
//! One command per synchronizer, plus a read-only `show`:
//!
//! - **bump**: bump the version, derive the build number, stamp today's date
//! - **sync-today**: set the release date to today's calendar date
//! - **sync-last-commit**: set the release date to the latest commit's date
//!   (also wired as the post-commit hook entry point)
//! - **rewrite-all-dates**: rewrite every date in the record to today
//! - **show**: print the current record
//!
//! Commands resolve the record path once (flag > relkeep.toml > default) and
//! hand a `SyncContext` to the core operations.

pub mod bump;
pub mod rewrite;
pub mod show;
pub mod sync;

pub use bump::run_bump;
pub use rewrite::run_rewrite_all_dates;
pub use show::run_show;
pub use sync::{run_sync_last_commit, run_sync_today};

use crate::core::config::KeepConfig;
use crate::core::error::KeepResult;
use crate::core::sync::SyncContext;
use std::env;
use std::path::PathBuf;

/// Build the synchronizer context for the current working directory
pub(crate) fn sync_context(record_override: Option<PathBuf>) -> KeepResult<SyncContext> {
  let workspace = env::current_dir()?;
  let config = KeepConfig::load(&workspace)?;
  Ok(SyncContext::new(&workspace, &config, record_override))
}
