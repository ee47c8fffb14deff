//! Scoped exclusive lock on a source path

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use rfi_format::constants::LOCK_SUFFIX;
use rfi_format::{Result, RfiError};
use tracing::{debug, warn};

/// Exclusive lock held for the lifetime of the value
///
/// The lock is a sibling file (`<path>.lock`) created with `create_new`, so a
/// second holder fails immediately. Dropping the guard removes the file on
/// every exit path.
#[derive(Debug)]
pub struct FileLock {
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquire the lock for `path`
    pub fn acquire(path: &Path) -> Result<Self> {
        let lock_path = lock_path_for(path);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                // Owner pid is informational only
                let _ = writeln!(file, "{}", std::process::id());
                debug!(lock = %lock_path.display(), "lock acquired");
                Ok(Self { lock_path })
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Err(RfiError::Locked {
                path: path.to_path_buf(),
                lock_path,
            }),
            Err(err) => Err(RfiError::io(&lock_path, err)),
        }
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        match fs::remove_file(&self.lock_path) {
            Ok(()) => debug!(lock = %self.lock_path.display(), "lock released"),
            Err(err) => warn!(lock = %self.lock_path.display(), %err, "failed to remove lock file"),
        }
    }
}

/// Lock file path for `path`
pub fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(LOCK_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_path_appends_suffix() {
        assert_eq!(
            lock_path_for(Path::new("src/data/personalities.ts")),
            PathBuf::from("src/data/personalities.ts.lock")
        );
    }

    #[test]
    fn second_acquire_fails_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.ts");

        let lock = FileLock::acquire(&path).unwrap();
        assert!(lock.path().exists());
        let err = FileLock::acquire(&path).unwrap_err();
        assert!(matches!(err, RfiError::Locked { .. }));

        drop(lock);
        assert!(!lock_path_for(&path).exists());
        assert!(FileLock::acquire(&path).is_ok());
    }
}
