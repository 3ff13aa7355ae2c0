//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Atomically replace a file's contents.
///
/// Writes to a temporary sibling first and renames it into place, so a
/// reader never observes a half-written file.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<(), FilesystemError> {
    let tmp = tmp_sibling(path);
    write_file(&tmp, content)?;
    std::fs::rename(&tmp, path).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
