//! Bulk date rewrite command implementation

use crate::core::error::KeepResult;
use crate::core::sync;
use std::path::PathBuf;

/// Run the rewrite-all-dates command.
///
/// Overwrites the historical milestone dates as well as the release date;
/// the output says so explicitly so it cannot be mistaken for sync-today.
pub fn run_rewrite_all_dates(record: Option<PathBuf>) -> KeepResult<()> {
  let ctx = super::sync_context(record)?;

  let updated = sync::bulk_date_rewrite(&ctx)?;

  println!(
    "⚠️  Rewrote the release date and {} milestone date(s) to {}",
    updated.milestones.len(),
    updated.release_date
  );
  println!("   Historical milestone dates are gone; restore from version control if that was unintended.");

  Ok(())
}
