//! Atomic replacement of the source file

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use rfi_format::{Result, RfiError};
use tempfile::NamedTempFile;

/// Replace `path` with `contents` atomically
///
/// The text goes to a temporary file in the same directory, is synced, then
/// renamed over `path`. The original file's permissions are kept. A read-only
/// target is refused rather than silently replaced.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let permissions = match fs::metadata(path) {
        Ok(metadata) => {
            if metadata.permissions().readonly() {
                return Err(RfiError::io(
                    path,
                    io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
                ));
            }
            Some(metadata.permissions())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(RfiError::io(path, err)),
    };

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|err| RfiError::io(path, err))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| RfiError::io(path, err))?;
    if let Some(permissions) = permissions {
        fs::set_permissions(tmp.path(), permissions).map_err(|err| RfiError::io(path, err))?;
    }
    tmp.persist(path)
        .map_err(|err| RfiError::io(path, err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_contents_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.ts");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn read_only_target_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.ts");
        fs::write(&path, "old").unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        let err = write_atomic(&path, "new").unwrap_err();
        assert!(matches!(err, RfiError::Io { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }
}
