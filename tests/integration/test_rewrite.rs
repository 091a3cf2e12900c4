//! Integration tests for `relkeep rewrite-all-dates`

use crate::helpers::{TestWorkspace, run_relkeep, today};
use anyhow::Result;

const TWO_MILESTONE_FIXTURE: &str = r#"# Release metadata for the example app
build = 40
release-date = "2024-03-01"

[version]
major = 1
minor = 2
patch = 3

[[milestones]]
version = "1.2.0"
date = "2024-01-01"
features = ["x"]

[[milestones]]
version = "1.2.3"
date = "2024-02-01"
features = ["y", "z"]
"#;

#[test]
fn test_rewrite_sets_every_date() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_record(TWO_MILESTONE_FIXTURE)?;

  run_relkeep(&ws.path, &["rewrite-all-dates"])?;

  let record = ws.read_record()?;
  let stamp = format!("\"{}\"", today());
  // Top-level date plus both milestone dates
  assert_eq!(record.matches(&stamp).count(), 3);
  assert!(!record.contains("2024-01-01"));
  assert!(!record.contains("2024-02-01"));
  assert!(!record.contains("2024-03-01"));

  Ok(())
}

#[test]
fn test_rewrite_keeps_versions_and_features() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_record(TWO_MILESTONE_FIXTURE)?;

  run_relkeep(&ws.path, &["rewrite-all-dates"])?;

  let record = ws.read_record()?;
  assert!(record.contains("version = \"1.2.0\""));
  assert!(record.contains("version = \"1.2.3\""));
  assert!(record.contains("features = [\"y\", \"z\"]"));
  assert!(record.contains("# Release metadata for the example app"));

  Ok(())
}

#[test]
fn test_rewrite_applies_unconditionally() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_record(TWO_MILESTONE_FIXTURE)?;

  run_relkeep(&ws.path, &["rewrite-all-dates"])?;
  let after_first = ws.read_record()?;

  // No convergence skip: the second run still succeeds and rewrites
  let output = run_relkeep(&ws.path, &["rewrite-all-dates"])?;
  assert!(output.status.success());
  assert_eq!(after_first, ws.read_record()?);

  Ok(())
}

#[test]
fn test_rewrite_scope_differs_from_sync_today() -> Result<()> {
  // sync-today touches only the top-level date
  let synced = TestWorkspace::new()?;
  synced.write_record(TWO_MILESTONE_FIXTURE)?;
  run_relkeep(&synced.path, &["sync-today"])?;
  let record = synced.read_record()?;
  assert!(record.contains("date = \"2024-01-01\""));
  assert!(record.contains("date = \"2024-02-01\""));

  // rewrite-all-dates touches the milestones too
  let rewritten = TestWorkspace::new()?;
  rewritten.write_record(TWO_MILESTONE_FIXTURE)?;
  run_relkeep(&rewritten.path, &["rewrite-all-dates"])?;
  let record = rewritten.read_record()?;
  assert!(!record.contains("date = \"2024-01-01\""));
  assert!(!record.contains("date = \"2024-02-01\""));

  Ok(())
}
