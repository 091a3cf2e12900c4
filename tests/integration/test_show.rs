//! Integration tests for `relkeep show`

use crate::helpers::{TestWorkspace, run_relkeep, run_relkeep_raw};
use anyhow::Result;

#[test]
fn test_show_json_snapshot() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_relkeep(&ws.path, &["show", "--json"])?;
  let record: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(record["version"], "1.2.3");
  assert_eq!(record["build"], 40);
  assert_eq!(record["release_date"], "2024-01-01");
  assert_eq!(record["milestones"][0]["features"][0], "x");

  Ok(())
}

#[test]
fn test_show_human_output() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_relkeep(&ws.path, &["show"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("1.2.3"));
  assert!(stdout.contains("40"));
  assert!(stdout.contains("2024-01-01"));

  Ok(())
}

#[test]
fn test_show_is_read_only() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let before = ws.read_record()?;

  run_relkeep(&ws.path, &["show"])?;

  assert_eq!(before, ws.read_record()?);

  Ok(())
}

#[test]
fn test_show_missing_record_fails() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::remove_file(ws.path.join("release.toml"))?;

  let output = run_relkeep_raw(&ws.path, &["show"])?;

  assert_eq!(output.status.code(), Some(1));

  Ok(())
}
