//! Typed view over the release record and its transformations
//!
//! `ReleaseRecord` is the in-memory state; every transformation is a pure
//! function from one record to the next, computed fully before anything is
//! written. `persist` then pushes only the changed fields through the codec
//! and saves once, so a failed transformation can never leave a
//! half-updated file behind.

use crate::core::error::KeepResult;
use crate::record::codec::RecordFile;
use chrono::NaiveDate;
use semver::Version;
use serde::Serialize;

/// One entry in the append-only milestone history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone {
  pub version: Version,
  pub date: NaiveDate,
  pub features: Vec<String>,
}

/// The persisted release metadata, fully parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseRecord {
  pub version: Version,
  pub build: u64,
  pub release_date: NaiveDate,
  pub milestones: Vec<Milestone>,
}

/// Which version component a bump increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
  Major,
  Minor,
  Patch,
}

impl BumpLevel {
  /// Apply the bump: increment one component, zero-reset everything of
  /// lower significance
  pub fn apply(&self, version: &Version) -> Version {
    match self {
      BumpLevel::Major => Version::new(version.major + 1, 0, 0),
      BumpLevel::Minor => Version::new(version.major, version.minor + 1, 0),
      BumpLevel::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
  }
}

impl ReleaseRecord {
  /// Parse the full record out of a loaded file.
  ///
  /// Any field that cannot be located is fatal for the run; nothing is
  /// auto-repaired.
  pub fn read_from(file: &RecordFile) -> KeepResult<Self> {
    Ok(Self {
      version: file.version()?,
      build: file.build()?,
      release_date: file.release_date()?,
      milestones: file.milestones()?,
    })
  }

  /// Bump the version and record a milestone.
  ///
  /// `build` replaces the stored build number only when present; a failed
  /// commit-count lookup must never decrease it. The release date is
  /// stamped with `date` and exactly one milestone describing the new
  /// version is appended after the existing entries.
  pub fn apply_bump(&self, level: BumpLevel, build: Option<u64>, date: NaiveDate, features: Vec<String>) -> Self {
    let version = level.apply(&self.version);

    let mut next = self.clone();
    next.version = version.clone();
    if let Some(build) = build {
      next.build = build;
    }
    next.release_date = date;
    next.milestones.push(Milestone { version, date, features });
    next
  }

  /// Set the top-level release date, or signal convergence.
  ///
  /// Returns `None` when the record already carries `target`, so the
  /// caller can skip the write entirely (idempotence: no spurious file
  /// timestamp). Milestone dates are never touched.
  pub fn apply_date_sync(&self, target: NaiveDate) -> Option<Self> {
    if self.release_date == target {
      return None;
    }

    let mut next = self.clone();
    next.release_date = target;
    Some(next)
  }

  /// Set the top-level release date AND every milestone date to `target`.
  ///
  /// Destructive with respect to historical milestone dates; callers must
  /// present it as such.
  pub fn apply_bulk_date_rewrite(&self, target: NaiveDate) -> Self {
    let mut next = self.clone();
    next.release_date = target;
    for milestone in &mut next.milestones {
      milestone.date = target;
    }
    next
  }
}

/// Write `updated` back through the codec, touching only fields that differ
/// from `original`, then save once.
///
/// Each changed field addresses its own document node independently, so one
/// edit cannot shift another; milestones past the original length are
/// appended in order.
pub fn persist(file: &mut RecordFile, original: &ReleaseRecord, updated: &ReleaseRecord) -> KeepResult<()> {
  if updated.version != original.version {
    file.set_version(&updated.version);
  }
  if updated.build != original.build {
    file.set_build(updated.build);
  }
  if updated.release_date != original.release_date {
    file.set_release_date(updated.release_date);
  }

  for (idx, (old, new)) in original.milestones.iter().zip(&updated.milestones).enumerate() {
    if new.date != old.date {
      file.set_milestone_date(idx, new.date)?;
    }
  }
  for milestone in updated.milestones.iter().skip(original.milestones.len()) {
    file.push_milestone(milestone);
  }

  file.save()
}
