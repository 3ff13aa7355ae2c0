//! Manifest (pfftx.toml) parsing and validation
//!
//! The manifest describes the project and the native extensions to
//! build. It is read once per invocation and never written by pfftx.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DEFAULT_BUILD_SCRIPT, MANIFEST_FILE};
use crate::error::ManifestError;

/// Project manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectConfig,
    /// Build settings shared by all extensions
    #[serde(default)]
    pub build: BuildSection,
    /// Native extensions to build, keyed by name. BTreeMap keeps the
    /// build order stable across runs.
    #[serde(default)]
    pub extensions: BTreeMap<String, Extension>,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,
    /// Project version
    pub version: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Shared build settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    /// External dependency build procedure, relative to the project root
    #[serde(default = "default_script")]
    pub script: PathBuf,
    /// Base compiler flags, extended by the `CFLAGS` environment variable
    #[serde(default)]
    pub cflags: Vec<String>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            script: default_script(),
            cflags: Vec::new(),
        }
    }
}

fn default_script() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_SCRIPT)
}

/// A native extension to compile and link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extension {
    /// Source files, in compile order
    pub sources: Vec<PathBuf>,
    /// Extra include directories
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    /// Extra system libraries passed as `-l` flags on the link line
    #[serde(default)]
    pub libraries: Vec<String>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the manifest from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, ManifestError> {
        let path = project_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ManifestError::NotFound { path });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ManifestError::Io {
            path: path.clone(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Validate the manifest's extensions.
    ///
    /// Extension names become directory components (`tmp-<name>`), so
    /// they must be plain names; every extension needs at least one
    /// source file.
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (name, extension) in &self.extensions {
            validate_extension_name(name)?;
            if extension.sources.is_empty() {
                return Err(ManifestError::NoSources {
                    extension: name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Check that a name is usable as a directory component
pub fn validate_extension_name(name: &str) -> Result<(), ManifestError> {
    if name.is_empty() {
        return Err(ManifestError::InvalidName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ManifestError::InvalidName {
            name: name.to_string(),
            reason: "only alphanumerics, '-', '_' and '.' are allowed".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[project]
name = "pfft-binding"
version = "0.1.0"

[build]
cflags = ["-O2"]

[extensions.core]
sources = ["src/core.c"]
include_dirs = ["include"]
libraries = ["m"]
"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::from_toml(MANIFEST).unwrap();

        assert_eq!(manifest.project.name, "pfft-binding");
        assert_eq!(manifest.build.cflags, vec!["-O2"]);
        assert_eq!(
            manifest.build.script,
            PathBuf::from("depends/install_pfft.sh")
        );

        let core = manifest.extensions.get("core").unwrap();
        assert_eq!(core.sources, vec![PathBuf::from("src/core.c")]);
        assert_eq!(core.libraries, vec!["m"]);
    }

    #[test]
    fn test_build_section_defaults() {
        let manifest = Manifest::from_toml(
            r#"
[project]
name = "p"
version = "0.1.0"
"#,
        )
        .unwrap();

        assert_eq!(
            manifest.build.script,
            PathBuf::from("depends/install_pfft.sh")
        );
        assert!(manifest.build.cflags.is_empty());
        assert!(manifest.extensions.is_empty());
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = TempDir::new().unwrap();

        let result = Manifest::load(dir.path());

        assert!(matches!(result, Err(ManifestError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pfftx.toml"), MANIFEST).unwrap();

        let manifest = Manifest::load(dir.path()).unwrap();

        assert_eq!(manifest.extensions.len(), 1);
    }

    #[test]
    fn test_validate_rejects_empty_sources() {
        let manifest = Manifest::from_toml(
            r#"
[project]
name = "p"
version = "0.1.0"

[extensions.core]
sources = []
"#,
        )
        .unwrap();

        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::NoSources { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_path_separators_in_names() {
        assert!(validate_extension_name("core").is_ok());
        assert!(validate_extension_name("core.native").is_ok());
        assert!(validate_extension_name("../evil").is_err());
        assert!(validate_extension_name("a/b").is_err());
        assert!(validate_extension_name("").is_err());
    }

    #[test]
    fn test_extension_order_is_stable() {
        let manifest = Manifest::from_toml(
            r#"
[project]
name = "p"
version = "0.1.0"

[extensions.zeta]
sources = ["z.c"]

[extensions.alpha]
sources = ["a.c"]
"#,
        )
        .unwrap();

        let names: Vec<&String> = manifest.extensions.keys().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
