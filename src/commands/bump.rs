//! Bump command implementation

use crate::core::error::KeepResult;
use crate::core::sync;
use crate::record::BumpLevel;
use std::path::PathBuf;

/// Run the bump command
pub fn run_bump(
  record: Option<PathBuf>,
  level: BumpLevel,
  build: Option<u64>,
  features: Vec<String>,
  json: bool,
) -> KeepResult<()> {
  let ctx = super::sync_context(record)?;

  let updated = sync::manual_bump(&ctx, level, build, features)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&updated)?);
    return Ok(());
  }

  println!("📦 Bumped {} version", level_name(level));
  println!("   Version: {}", updated.version);
  println!("   Build:   {}", updated.build);
  println!("   Date:    {}", updated.release_date);

  let milestone = updated.milestones.last();
  if let Some(milestone) = milestone
    && !milestone.features.is_empty()
  {
    println!("   Notes:");
    for feature in &milestone.features {
      println!("     - {}", feature);
    }
  }

  Ok(())
}

fn level_name(level: BumpLevel) -> &'static str {
  match level {
    BumpLevel::Major => "major",
    BumpLevel::Minor => "minor",
    BumpLevel::Patch => "patch",
  }
}
