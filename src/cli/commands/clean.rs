//! CLI implementation for `pfftx clean`
//!
//! Removes build byproducts: per-extension temp roots, dependency build
//! scratch directories, and the output directory.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::print_success;
use crate::core::clean::{clean_project, has_build_artifacts};
use crate::core::manifest::Manifest;

/// Execute the clean command
pub async fn execute(project_dir: &Path) -> Result<()> {
    // Refuse to glob-delete outside a pfftx project.
    let _manifest = Manifest::load(project_dir).context("Not a pfftx project")?;

    if !has_build_artifacts(project_dir) {
        print_success("Nothing to clean");
        return Ok(());
    }

    let result = clean_project(project_dir).context("Failed to clean build byproducts")?;

    if result.removed.is_empty() {
        print_success("Nothing to clean");
    } else {
        print_success("Cleaned build byproducts:");
        for path in &result.removed {
            println!("  Removed {}", path.display());
        }
    }

    Ok(())
}
