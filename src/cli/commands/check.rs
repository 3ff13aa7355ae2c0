//! CLI implementation for `pfftx check`
//!
//! Validates the manifest and project layout without building.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{is_json, print_detail, print_success, print_warning};
use crate::core::check::check_project;
use crate::core::manifest::Manifest;
use crate::core::toolchain::ToolchainResolver;

/// Execute the check command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = Manifest::load(project_dir).context("Failed to load project manifest")?;

    let compiler = ToolchainResolver::from_environment(None).resolve();
    let result = check_project(project_dir, &manifest, &compiler);

    if is_json() {
        let json_result = serde_json::json!({
            "valid": result.is_valid(),
            "toolchain_available": result.toolchain_available,
            "script_present": result.script_present,
            "extensions": result.extensions_to_build,
            "missing_sources": result.missing_sources,
            "warnings": result.warnings,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json_result).unwrap_or_default()
        );
        if !result.is_valid() {
            return Err(anyhow::anyhow!("Project validation failed"));
        }
        return Ok(());
    }

    if result.extensions_to_build.is_empty() {
        print_warning("No extensions defined in pfftx.toml");
    } else {
        print_detail(&format!(
            "Extensions to build: {}",
            result.extensions_to_build.join(", ")
        ));
    }

    for warning in &result.warnings {
        print_warning(warning);
    }

    if result.is_valid() {
        print_success("Project is valid");
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Project validation failed; fix the issues above and retry"
        ))
    }
}
