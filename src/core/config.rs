//! Tool configuration (relkeep.toml) parsing and validation
//!
//! The configuration file is optional; every field has a default so relkeep
//! works out of the box in any directory that holds a release record.

use crate::core::error::{KeepError, KeepResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for relkeep
/// Searched in order: relkeep.toml, .relkeep.toml, .config/relkeep.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeepConfig {
  #[serde(default)]
  pub record: RecordConfig,
  #[serde(default)]
  pub oracle: OracleConfig,
  #[serde(default)]
  pub lock: LockConfig,
}

/// Location of the release record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordConfig {
  /// Path to the record file, relative to the working directory
  #[serde(default = "default_record_path")]
  pub path: PathBuf,
}

fn default_record_path() -> PathBuf {
  PathBuf::from("release.toml")
}

impl Default for RecordConfig {
  fn default() -> Self {
    Self {
      path: default_record_path(),
    }
  }
}

/// Commit-history query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
  /// Deadline for a single git query, in milliseconds
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
}

impl Default for OracleConfig {
  fn default() -> Self {
    Self {
      timeout_ms: default_timeout_ms(),
    }
  }
}

/// Advisory lock settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
  /// How long to wait for a contended lock, in milliseconds
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
}

impl Default for LockConfig {
  fn default() -> Self {
    Self {
      timeout_ms: default_timeout_ms(),
    }
  }
}

fn default_timeout_ms() -> u64 {
  5000
}

impl KeepConfig {
  /// Find config file in search order: relkeep.toml, .relkeep.toml, .config/relkeep.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("relkeep.toml"),
      path.join(".relkeep.toml"),
      path.join(".config").join("relkeep.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the working directory, falling back to defaults when
  /// no config file exists
  pub fn load(path: &Path) -> KeepResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: KeepConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Validate configuration values
  pub fn validate(&self) -> KeepResult<()> {
    if self.oracle.timeout_ms == 0 {
      return Err(KeepError::message("oracle.timeout_ms must be greater than zero"));
    }
    if self.lock.timeout_ms == 0 {
      return Err(KeepError::message("lock.timeout_ms must be greater than zero"));
    }
    Ok(())
  }

  /// Deadline for a single git query
  pub fn oracle_timeout(&self) -> Duration {
    Duration::from_millis(self.oracle.timeout_ms)
  }

  /// How long to wait for a contended record lock
  pub fn lock_timeout(&self) -> Duration {
    Duration::from_millis(self.lock.timeout_ms)
  }
}
