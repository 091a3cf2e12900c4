//! Integration tests for `relkeep bump`

use crate::helpers::{TestWorkspace, run_relkeep, run_relkeep_raw, today};
use anyhow::Result;

/// Parse the record through `show --json`
fn show_json(ws: &TestWorkspace) -> Result<serde_json::Value> {
  let output = run_relkeep(&ws.path, &["show", "--json"])?;
  Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_bump_minor_tracks_commit_count() -> Result<()> {
  let ws = TestWorkspace::with_git()?;
  ws.commit_empty("one")?;
  ws.commit_empty("two")?;
  ws.commit_empty("three")?;

  run_relkeep(&ws.path, &["bump", "minor"])?;

  let record = show_json(&ws)?;
  assert_eq!(record["version"], "1.3.0");
  assert_eq!(record["build"], 3);
  assert_eq!(record["release_date"], today());

  let milestones = record["milestones"].as_array().unwrap();
  assert_eq!(milestones.len(), 2);
  assert_eq!(milestones[1]["version"], "1.3.0");
  assert_eq!(milestones[1]["date"], today());

  Ok(())
}

#[test]
fn test_bump_outside_repository_keeps_build() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_relkeep(&ws.path, &["bump"])?;

  let record = show_json(&ws)?;
  // Default level is patch; a failed commit-count lookup never moves build
  assert_eq!(record["version"], "1.2.4");
  assert_eq!(record["build"], 40);

  Ok(())
}

#[test]
fn test_bump_major_resets_minor_and_patch() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_relkeep(&ws.path, &["bump", "major"])?;

  let record = show_json(&ws)?;
  assert_eq!(record["version"], "2.0.0");

  Ok(())
}

#[test]
fn test_bump_with_explicit_build() -> Result<()> {
  let ws = TestWorkspace::with_git()?;
  ws.commit_empty("one")?;

  run_relkeep(&ws.path, &["bump", "minor", "--build", "99"])?;

  let record = show_json(&ws)?;
  assert_eq!(record["build"], 99);

  Ok(())
}

#[test]
fn test_successive_bumps_append_history_in_run_order() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_relkeep(&ws.path, &["bump", "patch"])?;
  run_relkeep(&ws.path, &["bump", "patch"])?;

  let record = show_json(&ws)?;
  let milestones = record["milestones"].as_array().unwrap();
  assert_eq!(milestones.len(), 3);
  assert_eq!(milestones[0]["version"], "1.2.3");
  assert_eq!(milestones[1]["version"], "1.2.4");
  assert_eq!(milestones[2]["version"], "1.2.5");

  Ok(())
}

#[test]
fn test_bump_records_feature_notes() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_relkeep(&ws.path, &["bump", "minor", "--feature", "faster sync", "--feature", "new hook"])?;

  let record = show_json(&ws)?;
  let features = record["milestones"][1]["features"].as_array().unwrap();
  assert_eq!(features.len(), 2);
  assert_eq!(features[0], "faster sync");
  assert_eq!(features[1], "new hook");

  Ok(())
}

#[test]
fn test_bump_preserves_comments_and_formatting() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_relkeep(&ws.path, &["bump", "minor"])?;

  let record = ws.read_record()?;
  assert!(record.contains("# Release metadata for the example app"));
  assert!(record.contains("# Shipped milestones, oldest first"));
  // The original milestone entry is untouched
  assert!(record.contains("version = \"1.2.3\""));
  assert!(record.contains("date = \"2024-01-01\""));

  Ok(())
}

#[test]
fn test_bump_json_output() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_relkeep(&ws.path, &["bump", "minor", "--json"])?;
  let record: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(record["version"], "1.3.0");

  Ok(())
}

#[test]
fn test_bump_fails_when_version_cannot_be_located() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_record(
    r#"build = 40
release-date = "2024-01-01"

[[milestones]]
version = "1.2.3"
date = "2024-01-01"
features = ["x"]
"#,
  )?;
  let before = ws.read_record()?;

  let output = run_relkeep_raw(&ws.path, &["bump", "minor"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("version"), "got: {}", stderr);

  // Nothing was written
  assert_eq!(before, ws.read_record()?);

  Ok(())
}

#[test]
fn test_bump_fails_when_record_is_missing() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::remove_file(ws.path.join("release.toml"))?;

  let output = run_relkeep_raw(&ws.path, &["bump"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("not found"), "got: {}", stderr);

  Ok(())
}
