//! Show command implementation

use crate::core::error::KeepResult;
use crate::record::{RecordFile, ReleaseRecord};
use std::path::PathBuf;

/// Run the show command (read-only, no lock needed: saves are whole-file
/// replacements, so a read sees a consistent record)
pub fn run_show(record: Option<PathBuf>, json: bool) -> KeepResult<()> {
  let ctx = super::sync_context(record)?;

  let file = RecordFile::load(&ctx.record_path)?;
  let record = ReleaseRecord::read_from(&file)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&record)?);
    return Ok(());
  }

  println!("📦 {}", ctx.record_path.display());
  println!("   Version: {}", record.version);
  println!("   Build:   {}", record.build);
  println!("   Date:    {}", record.release_date);
  println!("   Milestones:");
  for milestone in &record.milestones {
    println!("     {} ({})", milestone.version, milestone.date);
    for feature in &milestone.features {
      println!("       - {}", feature);
    }
  }

  Ok(())
}
