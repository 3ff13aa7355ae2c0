//! Build byproduct cleanup
//!
//! Removes orchestration-owned byproducts: per-extension temp roots,
//! scratch directories the dependency build script extracts next to
//! itself, and the generic output directory. Nothing else is touched;
//! version-controlled source never matches a pattern.

use std::path::{Path, PathBuf};

use crate::error::CleanError;

/// Glob patterns (relative to the project root) subject to removal. The
/// final component may end in `*`, matching as a name prefix.
pub const CLEAN_PATTERNS: &[&str] = &["tmp-*", "depends/tmp*", "build"];

/// Result of the clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Entries that were removed
    pub removed: Vec<PathBuf>,
    /// Patterns that matched nothing (skipped, not an error)
    pub skipped: Vec<String>,
}

/// Remove all entries matching [`CLEAN_PATTERNS`].
///
/// Directories are removed recursively, files individually. A missing
/// target is skipped; a removal blocked by a filesystem error (e.g.
/// permissions) fails the clean operation.
pub fn clean_project(project_dir: &Path) -> Result<CleanResult, CleanError> {
    let mut result = CleanResult::default();

    for pattern in CLEAN_PATTERNS {
        let targets = expand_pattern(project_dir, pattern)?;
        if targets.is_empty() {
            result.skipped.push((*pattern).to_string());
            continue;
        }
        for target in targets {
            remove_entry(&target)?;
            tracing::debug!("Removed {}", target.display());
            result.removed.push(target);
        }
    }

    Ok(result)
}

/// Check whether any clean pattern currently matches
pub fn has_build_artifacts(project_dir: &Path) -> bool {
    CLEAN_PATTERNS
        .iter()
        .any(|pattern| match expand_pattern(project_dir, pattern) {
            Ok(targets) => !targets.is_empty(),
            Err(_) => false,
        })
}

/// Expand one pattern against the project directory. Only the final
/// component may carry a trailing `*`; everything before it is literal.
fn expand_pattern(project_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CleanError> {
    let (parent, leaf) = match pattern.rsplit_once('/') {
        Some((dir, leaf)) => (project_dir.join(dir), leaf),
        None => (project_dir.to_path_buf(), pattern),
    };

    let Some(prefix) = leaf.strip_suffix('*') else {
        let path = parent.join(leaf);
        return Ok(if path.exists() { vec![path] } else { Vec::new() });
    };

    if !parent.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&parent).map_err(|e| CleanError::Scan {
        path: parent.clone(),
        error: e.to_string(),
    })?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .map(|entry| entry.path())
        .collect();
    matches.sort();
    Ok(matches)
}

fn remove_entry(path: &Path) -> Result<(), CleanError> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        // Already gone is what clean wanted anyway.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CleanError::Remove {
            path: path.to_path_buf(),
            error: e.to_string(),
        }),
    }
}
