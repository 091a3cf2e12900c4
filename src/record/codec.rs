//! Lossless codec for the on-disk release record
//!
//! The record is TOML, edited through `toml_edit` so every byte a mutation
//! does not touch - comments, whitespace, key order - survives the round
//! trip. Each field has exactly one addressable node in the document, so a
//! locator either finds its field or fails; there is no ambiguity between a
//! field and look-alike text elsewhere in the file (a milestone note that
//! happens to contain a date, say).
//!
//! Expected shape:
//!
//! ```toml
//! build = 40
//! release-date = "2024-01-01"
//!
//! [version]
//! major = 1
//! minor = 2
//! patch = 3
//!
//! [[milestones]]
//! version = "1.2.3"
//! date = "2024-01-01"
//! features = ["x"]
//! ```

use crate::core::error::{KeepError, KeepResult, RecordError, ResultExt};
use crate::record::store::Milestone;
use chrono::NaiveDate;
use semver::Version;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use toml_edit::{Array, ArrayOfTables, DocumentMut, Item, Table, TableLike, value};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const KEY_VERSION: &str = "version";
const KEY_BUILD: &str = "build";
const KEY_RELEASE_DATE: &str = "release-date";
const KEY_MILESTONES: &str = "milestones";

/// A release record file: path plus parsed document
pub struct RecordFile {
  path: PathBuf,
  doc: DocumentMut,
}

impl RecordFile {
  /// Load and parse the record at `path`
  pub fn load(path: &Path) -> KeepResult<Self> {
    let text = match fs::read_to_string(path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(KeepError::Record(RecordError::NotFound {
          path: path.to_path_buf(),
        }));
      }
      Err(e) => {
        return Err(KeepError::Io(e)).with_context(|| format!("Failed to read {}", path.display()));
      }
    };

    let doc: DocumentMut = text.parse()?;

    Ok(Self {
      path: path.to_path_buf(),
      doc,
    })
  }

  /// Current document text
  #[allow(dead_code)] // Kept as a convenience for inspecting the staged document
  pub fn text(&self) -> String {
    self.doc.to_string()
  }

  /// The version triple from the `[version]` table
  pub fn version(&self) -> KeepResult<Version> {
    let table = self
      .doc
      .get(KEY_VERSION)
      .ok_or_else(|| missing(KEY_VERSION))?
      .as_table_like()
      .ok_or_else(|| corrupt("version is not a table".to_string()))?;

    let major = int_key(table, KEY_VERSION, "major")?;
    let minor = int_key(table, KEY_VERSION, "minor")?;
    let patch = int_key(table, KEY_VERSION, "patch")?;

    Ok(Version::new(major, minor, patch))
  }

  /// Rewrite the version triple in place
  pub fn set_version(&mut self, version: &Version) {
    self.doc[KEY_VERSION]["major"] = value(version.major as i64);
    self.doc[KEY_VERSION]["minor"] = value(version.minor as i64);
    self.doc[KEY_VERSION]["patch"] = value(version.patch as i64);
  }

  /// The build number
  pub fn build(&self) -> KeepResult<u64> {
    let item = self.doc.get(KEY_BUILD).ok_or_else(|| missing(KEY_BUILD))?;
    let n = item
      .as_integer()
      .ok_or_else(|| corrupt("build is not an integer".to_string()))?;
    u64::try_from(n).map_err(|_| corrupt("build is negative".to_string()))
  }

  /// Rewrite the build number in place
  pub fn set_build(&mut self, build: u64) {
    self.doc[KEY_BUILD] = value(build as i64);
  }

  /// The top-level release date
  pub fn release_date(&self) -> KeepResult<NaiveDate> {
    let item = self
      .doc
      .get(KEY_RELEASE_DATE)
      .ok_or_else(|| missing(KEY_RELEASE_DATE))?;
    let text = item
      .as_str()
      .ok_or_else(|| corrupt("release-date is not a string".to_string()))?;
    NaiveDate::parse_from_str(text, DATE_FORMAT)
      .map_err(|e| corrupt(format!("release-date \"{}\": {}", text, e)))
  }

  /// Rewrite the top-level release date in place
  pub fn set_release_date(&mut self, date: NaiveDate) {
    self.doc[KEY_RELEASE_DATE] = value(date.format(DATE_FORMAT).to_string());
  }

  /// All milestone entries, in file order
  pub fn milestones(&self) -> KeepResult<Vec<Milestone>> {
    let tables = self
      .doc
      .get(KEY_MILESTONES)
      .ok_or_else(|| missing(KEY_MILESTONES))?
      .as_array_of_tables()
      .ok_or_else(|| corrupt("milestones is not an array of tables".to_string()))?;

    let mut milestones = Vec::with_capacity(tables.len());
    for (idx, entry) in tables.iter().enumerate() {
      milestones.push(parse_milestone(entry, idx)?);
    }

    Ok(milestones)
  }

  /// Append a milestone entry after the last existing one
  pub fn push_milestone(&mut self, milestone: &Milestone) {
    let entry = milestone_table(milestone);

    match self.doc.get_mut(KEY_MILESTONES).and_then(Item::as_array_of_tables_mut) {
      Some(tables) => tables.push(entry),
      None => {
        let mut tables = ArrayOfTables::new();
        tables.push(entry);
        self.doc.insert(KEY_MILESTONES, Item::ArrayOfTables(tables));
      }
    }
  }

  /// Rewrite the date of one existing milestone entry
  pub fn set_milestone_date(&mut self, index: usize, date: NaiveDate) -> KeepResult<()> {
    let tables = self
      .doc
      .get_mut(KEY_MILESTONES)
      .and_then(Item::as_array_of_tables_mut)
      .ok_or_else(|| missing(KEY_MILESTONES))?;
    let entry = tables
      .get_mut(index)
      .ok_or_else(|| corrupt(format!("milestone entry {} does not exist", index)))?;

    entry["date"] = value(date.format(DATE_FORMAT).to_string());
    Ok(())
  }

  /// Write the record back to disk as one whole-file replacement.
  ///
  /// The content goes to a sibling temp file which is renamed over the
  /// record, so a concurrent reader sees either the old or the new file,
  /// never a partial write.
  pub fn save(&self) -> KeepResult<()> {
    let parent = match self.path.parent() {
      Some(p) if !p.as_os_str().is_empty() => p,
      _ => Path::new("."),
    };

    let mut tmp =
      NamedTempFile::new_in(parent).with_context(|| format!("Failed to stage write for {}", self.path.display()))?;
    tmp
      .write_all(self.doc.to_string().as_bytes())
      .with_context(|| format!("Failed to write {}", self.path.display()))?;
    tmp
      .persist(&self.path)
      .map_err(|e| KeepError::Io(e.error))
      .with_context(|| format!("Failed to replace {}", self.path.display()))?;

    Ok(())
  }
}

fn missing(field: &str) -> KeepError {
  KeepError::Record(RecordError::FieldMissing {
    field: field.to_string(),
  })
}

fn corrupt(reason: String) -> KeepError {
  KeepError::Record(RecordError::Corrupt { reason })
}

/// Read a non-negative integer key from a table
fn int_key(table: &dyn TableLike, parent: &str, key: &str) -> KeepResult<u64> {
  let item = table
    .get(key)
    .ok_or_else(|| missing(&format!("{}.{}", parent, key)))?;
  let n = item
    .as_integer()
    .ok_or_else(|| corrupt(format!("{}.{} is not an integer", parent, key)))?;
  u64::try_from(n).map_err(|_| corrupt(format!("{}.{} is negative", parent, key)))
}

fn parse_milestone(entry: &Table, idx: usize) -> KeepResult<Milestone> {
  let version_text = str_key(entry, idx, "version")?;
  let version =
    Version::parse(version_text).map_err(|e| corrupt(format!("milestones[{}].version: {}", idx, e)))?;

  let date_text = str_key(entry, idx, "date")?;
  let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
    .map_err(|e| corrupt(format!("milestones[{}].date: {}", idx, e)))?;

  let features_item = entry
    .get("features")
    .ok_or_else(|| missing(&format!("milestones[{}].features", idx)))?;
  let features_array = features_item
    .as_array()
    .ok_or_else(|| corrupt(format!("milestones[{}].features is not an array", idx)))?;

  let mut features = Vec::with_capacity(features_array.len());
  for feature in features_array.iter() {
    let text = feature
      .as_str()
      .ok_or_else(|| corrupt(format!("milestones[{}].features entries must be strings", idx)))?;
    features.push(text.to_string());
  }

  Ok(Milestone { version, date, features })
}

fn str_key<'a>(entry: &'a Table, idx: usize, key: &str) -> KeepResult<&'a str> {
  entry
    .get(key)
    .ok_or_else(|| missing(&format!("milestones[{}].{}", idx, key)))?
    .as_str()
    .ok_or_else(|| corrupt(format!("milestones[{}].{} is not a string", idx, key)))
}

fn milestone_table(milestone: &Milestone) -> Table {
  let mut entry = Table::new();
  entry["version"] = value(milestone.version.to_string());
  entry["date"] = value(milestone.date.format(DATE_FORMAT).to_string());

  let features: Array = milestone.features.iter().cloned().collect();
  entry["features"] = value(features);

  entry
}
