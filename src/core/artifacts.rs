//! Static-library artifact resolution
//!
//! The dependency build compiles each library package in its own
//! subdirectory of the build root, so every required archive sits at
//! `<buildRoot>/<package-dir>/<libname>.a`. This module resolves each
//! required name to exactly one such path; zero or multiple matches is
//! fatal rather than silently picked, so a stale tree from a previous
//! version cannot leak onto the link line.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::REQUIRED_LIBRARIES;
use crate::error::ArtifactError;

/// A resolved static-library archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkObject {
    /// Base name of the archive (e.g., "libpfft.a")
    pub library: &'static str,
    /// Resolved on-disk path
    pub path: PathBuf,
}

/// Resolve every required archive under the dependency build root.
///
/// The returned order equals [`REQUIRED_LIBRARIES`]; the link line is
/// order-sensitive, so callers must not reorder it.
pub fn resolve_link_objects(build_root: &Path) -> Result<Vec<LinkObject>, ArtifactError> {
    if !build_root.is_dir() {
        return Err(ArtifactError::MissingRoot {
            root: build_root.to_path_buf(),
        });
    }

    let mut resolved = Vec::with_capacity(REQUIRED_LIBRARIES.len());
    for &library in REQUIRED_LIBRARIES {
        let mut matches = find_archive(build_root, library);
        match matches.len() {
            0 => {
                return Err(ArtifactError::NotFound {
                    library: library.to_string(),
                    root: build_root.to_path_buf(),
                })
            }
            1 => {
                let path = matches.remove(0);
                tracing::debug!("Resolved {library} -> {}", path.display());
                resolved.push(LinkObject { library, path });
            }
            _ => {
                return Err(ArtifactError::Ambiguous {
                    library: library.to_string(),
                    root: build_root.to_path_buf(),
                    matches,
                })
            }
        }
    }
    Ok(resolved)
}

/// Find `<buildRoot>/*/<name>`: exactly one directory level of nesting,
/// mirroring the per-package layout the build script produces.
fn find_archive(build_root: &Path, name: &str) -> Vec<PathBuf> {
    let name = std::ffi::OsStr::new(name);
    WalkDir::new(build_root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(walkdir::DirEntry::into_path)
        .collect()
}
