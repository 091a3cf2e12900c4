//! Advisory lock around the record read-modify-write cycle
//!
//! Independent entry points (a scheduled sync, a post-commit hook, a manual
//! bump) can fire around the same commit event. Without mutual exclusion the
//! last whole-file write wins and a reader that loaded stale content silently
//! discards the other writer's change. The lock serializes those cycles: it
//! is a `<record>.lock` file created with `create_new` plus an exclusive OS
//! lock, held for the duration of one load-transform-persist pass.

use crate::core::error::{KeepError, KeepResult};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// A held lock on the release record.
///
/// Released (and the lock file removed) on drop.
#[derive(Debug)]
pub struct RecordLock {
  file: File,
  path: PathBuf,
}

impl RecordLock {
  /// Acquire the lock for a record, waiting up to `timeout` for a holder
  /// to release it.
  pub fn acquire(record_path: &Path, timeout: Duration) -> KeepResult<Self> {
    let lock_path = lock_path_for(record_path);
    let deadline = Instant::now() + timeout;

    loop {
      match OpenOptions::new().write(true).create_new(true).open(&lock_path) {
        Ok(mut file) => {
          if let Err(e) = file.try_lock_exclusive() {
            let _ = std::fs::remove_file(&lock_path);
            return Err(KeepError::Io(e));
          }

          // Holder pid, for diagnosing a stale lock by hand
          let _ = writeln!(file, "{}", std::process::id());

          return Ok(Self { file, path: lock_path });
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
          if Instant::now() >= deadline {
            return Err(KeepError::with_help(
              format!("Another relkeep run holds the record lock: {}", lock_path.display()),
              "Wait for the other run to finish, or remove the lock file if its process is gone.",
            ));
          }
          std::thread::sleep(RETRY_INTERVAL);
        }
        Err(e) => return Err(KeepError::Io(e)),
      }
    }
  }
}

impl Drop for RecordLock {
  fn drop(&mut self) {
    let _ = FileExt::unlock(&self.file);
    let _ = std::fs::remove_file(&self.path);
  }
}

/// Lock file path for a record: `<record>.lock`
pub fn lock_path_for(record_path: &Path) -> PathBuf {
  let mut lock_path = record_path.as_os_str().to_owned();
  lock_path.push(".lock");
  PathBuf::from(lock_path)
}
