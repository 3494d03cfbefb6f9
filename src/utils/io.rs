//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file with standardized error handling.
///
/// Wraps `fs::write` with consistent `Error::internal_io` formatting.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// Readers see either the old content or the new content, never a partial write.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = path.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation))))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation)))
    })?;

    Ok(())
}

/// Create a directory (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path, operation: &str) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)
            .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;
    }
    Ok(())
}

/// Recursively copy a directory tree, overwriting files that already exist.
///
/// Returns the copied file paths relative to `src`.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    copy_dir_inner(src, dst, Path::new(""), &mut copied)?;
    Ok(copied)
}

fn copy_dir_inner(src: &Path, dst: &Path, relative: &Path, copied: &mut Vec<PathBuf>) -> Result<()> {
    fs::create_dir_all(dst)
        .map_err(|e| Error::internal_io(e.to_string(), Some("create target dir".into())))?;

    let mut entries = fs::read_dir(src)
        .map_err(|e| Error::internal_io(e.to_string(), Some("read source dir".into())))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::internal_io(e.to_string(), Some("read dir entry".into())))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let rel_path = relative.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_inner(&src_path, &dst_path, &rel_path, copied)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| {
                Error::internal_io(
                    e.to_string(),
                    Some(format!("copy {}", src_path.display())),
                )
            })?;
            copied.push(rel_path);
        }
    }
    Ok(())
}

/// Remove a directory tree. Returns `false` when there was nothing to remove.
pub fn remove_dir_all(dir: &Path, operation: &str) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(dir)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;
    Ok(true)
}
