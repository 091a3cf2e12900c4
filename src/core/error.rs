//! Error types for relkeep with contextual messages and exit codes
//!
//! A unified error type that categorizes failures and carries a help
//! suggestion where one exists. Record-level problems (missing file, missing
//! field, corrupt content) and an unavailable commit source are operator
//! errors and exit 1; raw I/O and failed git invocations are system errors
//! and exit 2.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relkeep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Operator error (record missing/corrupt, unavailable commit source)
  User = 1,
  /// System error (git, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for relkeep
#[derive(Debug)]
pub enum KeepError {
  /// Release record errors
  Record(RecordError),

  /// Git query errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl KeepError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    KeepError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    KeepError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      KeepError::Message { message, context, help } => KeepError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      KeepError::Record(_) => ExitCode::User,
      KeepError::Git(GitError::SourceUnavailable { .. }) => ExitCode::User,
      KeepError::Git(GitError::CommandFailed { .. }) => ExitCode::System,
      KeepError::Io(_) => ExitCode::System,
      KeepError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      KeepError::Record(e) => e.help_message(),
      KeepError::Git(e) => e.help_message(),
      KeepError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for KeepError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KeepError::Record(e) => write!(f, "{}", e),
      KeepError::Git(e) => write!(f, "{}", e),
      KeepError::Io(e) => write!(f, "I/O error: {}", e),
      KeepError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for KeepError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      KeepError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for KeepError {
  fn from(err: io::Error) -> Self {
    KeepError::Io(err)
  }
}

impl From<String> for KeepError {
  fn from(msg: String) -> Self {
    KeepError::message(msg)
  }
}

impl From<&str> for KeepError {
  fn from(msg: &str) -> Self {
    KeepError::message(msg)
  }
}

impl From<toml_edit::TomlError> for KeepError {
  fn from(err: toml_edit::TomlError) -> Self {
    KeepError::Record(RecordError::Corrupt {
      reason: format!("TOML parse error: {}", err),
    })
  }
}

impl From<toml_edit::de::Error> for KeepError {
  fn from(err: toml_edit::de::Error) -> Self {
    KeepError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for KeepError {
  fn from(err: serde_json::Error) -> Self {
    KeepError::message(format!("JSON error: {}", err))
  }
}

impl From<chrono::ParseError> for KeepError {
  fn from(err: chrono::ParseError) -> Self {
    KeepError::Record(RecordError::Corrupt {
      reason: format!("Invalid date: {}", err),
    })
  }
}

impl From<semver::Error> for KeepError {
  fn from(err: semver::Error) -> Self {
    KeepError::Record(RecordError::Corrupt {
      reason: format!("Invalid version: {}", err),
    })
  }
}

/// Release record errors
#[derive(Debug)]
pub enum RecordError {
  /// Record file not found
  NotFound { path: PathBuf },

  /// A required field could not be located in the record
  FieldMissing { field: String },

  /// Record content is present but unreadable
  Corrupt { reason: String },
}

impl RecordError {
  fn help_message(&self) -> Option<String> {
    match self {
      RecordError::NotFound { .. } => {
        Some("Create the release record first, or point --record at an existing one.".to_string())
      }
      RecordError::FieldMissing { .. } => Some(
        "The record needs a [version] table (major/minor/patch), build, release-date, and at least one [[milestones]] entry.".to_string(),
      ),
      RecordError::Corrupt { .. } => None,
    }
  }
}

impl fmt::Display for RecordError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecordError::NotFound { path } => {
        write!(f, "Release record not found: {}", path.display())
      }
      RecordError::FieldMissing { field } => {
        write!(f, "Required field not found in release record: {}", field)
      }
      RecordError::Corrupt { reason } => {
        write!(f, "Release record is corrupt: {}", reason)
      }
    }
  }
}

/// Git query errors
#[derive(Debug)]
pub enum GitError {
  /// Commit history could not be queried
  SourceUnavailable { reason: String },

  /// Git command failed
  CommandFailed { command: String, stderr: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::SourceUnavailable { .. } => {
        Some("Run inside a git repository with at least one commit, and check that git is installed.".to_string())
      }
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::SourceUnavailable { reason } => {
        write!(f, "Commit history unavailable: {}", reason)
      }
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
    }
  }
}

/// Result type alias for relkeep
pub type KeepResult<T> = Result<T, KeepError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> KeepResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> KeepResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<KeepError>,
{
  fn context(self, ctx: impl Into<String>) -> KeepResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> KeepResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &KeepError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

/// Convert anyhow::Error to KeepError (integration seams)
impl From<anyhow::Error> for KeepError {
  fn from(err: anyhow::Error) -> Self {
    KeepError::message(err.to_string())
  }
}
