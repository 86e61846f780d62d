//! Atomic job file persistence.
//!
//! All job scripts are written with this pattern:
//! 1. Write content to a temporary sibling file (`{filename}.tmp`)
//! 2. Sync it to disk and mark it executable
//! 3. Rename it over the destination
//!
//! A failure at any step removes the temporary file and leaves the
//! destination as it was. Rename is atomic only when source and destination
//! are on the same filesystem, which the sibling temp path guarantees.
//!
//! Two writers targeting the same destination race on the shared temp path;
//! callers must ensure at most one writer per destination.

use crate::error::{JobScriptError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary sibling path used while writing `target`.
pub fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        JobScriptError::UserError(format!("invalid job file path '{}'", target.display()))
    })?;
    let parent = target.parent().unwrap_or(Path::new(""));
    Ok(parent.join(format!("{}.tmp", filename)))
}

/// Write `content` to the temporary sibling of `target`.
///
/// Creates missing parent directories. On success the returned file is
/// synced and executable; on failure nothing is left behind.
pub fn write_temp(target: &Path, content: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| JobScriptError::io(parent, e))?;
    }

    let temp_path = temp_path_for(target)?;

    // Create or truncate the file
    let mut file = File::create(&temp_path).map_err(|e| JobScriptError::io(&temp_path, e))?;

    let result = file
        .write_all(content)
        .and_then(|()| file.sync_all())
        .and_then(|()| make_executable(&temp_path));
    if let Err(e) = result {
        discard(&temp_path);
        return Err(JobScriptError::io(&temp_path, e));
    }

    Ok(temp_path)
}

/// Atomically move a temp file written by [`write_temp`] over `target`.
pub fn commit(temp_path: &Path, target: &Path) -> Result<()> {
    fs::rename(temp_path, target).map_err(|e| {
        discard(temp_path);
        JobScriptError::io(target, e)
    })?;

    // Persist the directory entry too.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Remove a temp file, ignoring errors.
pub fn discard(temp_path: &Path) {
    let _ = fs::remove_file(temp_path);
}

/// Atomically write bytes to `target` as an executable file.
pub fn atomic_write<P: AsRef<Path>>(target: P, content: &[u8]) -> Result<()> {
    let target = target.as_ref();
    let temp_path = write_temp(target, content)?;
    commit(&temp_path, target)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job");

        atomic_write(&file_path, b"#!/bin/bash -l\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "#!/bin/bash -l\n");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job");

        fs::write(&file_path, "original content").unwrap();
        atomic_write(&file_path, b"new content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("log").join("job").join("1").join("job");

        atomic_write(&file_path, b"nested content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "nested content");
    }

    #[test]
    fn test_atomic_write_temp_file_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job");

        atomic_write(&file_path, b"content").unwrap();

        assert!(!temp_dir.path().join("job.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path_for(Path::new("/some/path/job")).unwrap();
        assert_eq!(temp, Path::new("/some/path/job.tmp"));

        let relative = temp_path_for(Path::new("job")).unwrap();
        assert_eq!(relative, Path::new("job.tmp"));
    }

    #[test]
    fn test_temp_path_requires_file_name() {
        assert!(temp_path_for(Path::new("/")).is_err());
    }

    #[test]
    fn test_unwritable_temp_path_leaves_destination_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job");
        fs::write(&file_path, "previous job").unwrap();

        // A directory squatting on the temp path makes the open fail.
        fs::create_dir(temp_dir.path().join("job.tmp")).unwrap();

        let err = atomic_write(&file_path, b"new job").unwrap_err();
        assert!(matches!(err, JobScriptError::Io { .. }));
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "previous job");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job");

        // A directory at the destination makes the rename fail.
        fs::create_dir(&file_path).unwrap();
        fs::write(file_path.join("keep"), "x").unwrap();

        let temp_path = write_temp(&file_path, b"new job").unwrap();
        let err = commit(&temp_path, &file_path).unwrap_err();

        assert!(matches!(err, JobScriptError::Io { .. }));
        assert!(!temp_path.exists());
        assert!(file_path.is_dir());
        assert_eq!(fs::read_to_string(file_path.join("keep")).unwrap(), "x");
    }

    #[test]
    fn test_discarded_temp_does_not_touch_destination() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job");

        let temp_path = write_temp(&file_path, b"draft").unwrap();
        assert!(temp_path.exists());
        discard(&temp_path);

        assert!(!temp_path.exists());
        assert!(!file_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job");

        atomic_write(&file_path, b"echo hi\n").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn test_concurrent_writes_to_different_files() {
        let temp_dir = TempDir::new().unwrap();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let path = temp_dir.path().join(format!("job_{}", i));
                let content = format!("content {}", i);
                std::thread::spawn(move || {
                    atomic_write(&path, content.as_bytes()).unwrap();
                    (path, content)
                })
            })
            .collect();

        for handle in handles {
            let (path, expected_content) = handle.join().unwrap();
            let actual_content = fs::read_to_string(&path).unwrap();
            assert_eq!(actual_content, expected_content);
        }
    }
}
