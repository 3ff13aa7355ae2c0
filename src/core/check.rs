//! Project validation without building
//!
//! Reports what `pfftx build` would do and everything that would stop
//! it, without running the dependency build or the compiler.

use std::path::{Path, PathBuf};

use crate::core::manifest::Manifest;

/// Result of the check operation
#[derive(Debug)]
pub struct CheckResult {
    /// Whether the manifest itself is valid
    pub config_valid: bool,
    /// Whether the compiler was found on PATH
    pub toolchain_available: bool,
    /// Whether the dependency build script exists
    pub script_present: bool,
    /// Extensions that would be built, in build order
    pub extensions_to_build: Vec<String>,
    /// Source files listed in the manifest but absent on disk
    pub missing_sources: Vec<PathBuf>,
    /// Warnings encountered during check
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// Check if a build could proceed
    pub fn is_valid(&self) -> bool {
        self.config_valid && self.script_present && self.missing_sources.is_empty()
    }
}

/// Validate a project against its manifest.
///
/// `compiler` is the already-resolved toolchain; availability is a
/// warning rather than an error because resolution itself never fails.
pub fn check_project(project_dir: &Path, manifest: &Manifest, compiler: &str) -> CheckResult {
    let mut result = CheckResult {
        config_valid: true,
        toolchain_available: true,
        script_present: true,
        extensions_to_build: manifest.extensions.keys().cloned().collect(),
        missing_sources: Vec::new(),
        warnings: Vec::new(),
    };

    if let Err(e) = manifest.validate() {
        result.config_valid = false;
        result.warnings.push(e.to_string());
    }

    let script = project_dir.join(&manifest.build.script);
    if !script.exists() {
        result.script_present = false;
        result.warnings.push(format!(
            "Dependency build script not found: {}",
            script.display()
        ));
    }

    for (name, extension) in &manifest.extensions {
        for source in &extension.sources {
            let path = project_dir.join(source);
            if !path.exists() {
                result
                    .warnings
                    .push(format!("Extension '{name}': missing source {}", source.display()));
                result.missing_sources.push(source.clone());
            }
        }
        for dir in &extension.include_dirs {
            if !project_dir.join(dir).is_dir() {
                result.warnings.push(format!(
                    "Extension '{name}': include directory {} does not exist",
                    dir.display()
                ));
            }
        }
    }

    if which::which(compiler).is_err() {
        result.toolchain_available = false;
        result
            .warnings
            .push(format!("Compiler '{compiler}' not found in PATH"));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[project]
name = "pfft-binding"
version = "0.1.0"

[extensions.core]
sources = ["pfft/core.c"]
"#;

    fn create_project(with_sources: bool, with_script: bool) -> TempDir {
        let dir = TempDir::new().unwrap();
        if with_sources {
            std::fs::create_dir_all(dir.path().join("pfft")).unwrap();
            std::fs::write(dir.path().join("pfft/core.c"), "int x;").unwrap();
        }
        if with_script {
            std::fs::create_dir_all(dir.path().join("depends")).unwrap();
            std::fs::write(dir.path().join("depends/install_pfft.sh"), "#!/bin/sh").unwrap();
        }
        dir
    }

    #[test]
    fn test_check_passes_for_complete_project() {
        let dir = create_project(true, true);
        let manifest = Manifest::from_toml(MANIFEST).unwrap();

        let result = check_project(dir.path(), &manifest, "sh");

        assert!(result.is_valid());
        assert!(result.toolchain_available);
        assert_eq!(result.extensions_to_build, vec!["core"]);
    }

    #[test]
    fn test_check_reports_missing_sources() {
        let dir = create_project(false, true);
        let manifest = Manifest::from_toml(MANIFEST).unwrap();

        let result = check_project(dir.path(), &manifest, "sh");

        assert!(!result.is_valid());
        assert_eq!(result.missing_sources, vec![PathBuf::from("pfft/core.c")]);
    }

    #[test]
    fn test_check_reports_missing_script() {
        let dir = create_project(true, false);
        let manifest = Manifest::from_toml(MANIFEST).unwrap();

        let result = check_project(dir.path(), &manifest, "sh");

        assert!(!result.is_valid());
        assert!(!result.script_present);
    }

    #[test]
    fn test_missing_compiler_is_a_warning_not_an_error() {
        let dir = create_project(true, true);
        let manifest = Manifest::from_toml(MANIFEST).unwrap();

        let result = check_project(dir.path(), &manifest, "pfftx-no-such-compiler");

        assert!(result.is_valid());
        assert!(!result.toolchain_available);
        assert!(result.warnings.iter().any(|w| w.contains("not found in PATH")));
    }
}
