//! Build command implementation
//!
//! Implements `pfftx build`: resolve the toolchain, bootstrap the
//! dependency stack, resolve the static-library artifacts, then compile
//! and link each extension. The steps run strictly in that order; the
//! artifacts do not exist before the dependency build completes, and no
//! compiler runs after any step fails.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::output::{create_spinner, print_detail, print_success};
use crate::core::artifacts::resolve_link_objects;
use crate::core::config::BuildConfig;
use crate::core::depends::{BuildOutcome, DependsBuilder};
use crate::core::linker::ExtensionBuilder;
use crate::core::manifest::Manifest;
use crate::core::toolchain::ToolchainResolver;
use crate::error::ManifestError;

/// Build options
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Explicit compiler override (highest precedence)
    pub mpicc: Option<String>,
    /// Build only the named extension
    pub extension: Option<String>,
    /// Parallel jobs forwarded to the dependency build
    pub jobs: Option<usize>,
    /// Rebuild the dependency stack even if cached
    pub force: bool,
}

/// Execute the build command
pub async fn execute(project_dir: &Path, options: BuildOptions) -> Result<()> {
    let manifest = Manifest::load(project_dir).context("Failed to load project manifest")?;
    manifest.validate().context("Invalid manifest")?;

    if manifest.extensions.is_empty() {
        bail!("No extensions defined in pfftx.toml; nothing to build");
    }

    let selected: Vec<&String> = match &options.extension {
        Some(name) => {
            if !manifest.extensions.contains_key(name) {
                return Err(ManifestError::UnknownExtension {
                    extension: name.clone(),
                }
                .into());
            }
            vec![name]
        }
        None => manifest.extensions.keys().collect(),
    };

    let compiler = ToolchainResolver::from_environment(options.mpicc.clone()).resolve();
    tracing::info!("Using compiler: {compiler}");

    let mut built = Vec::new();
    for name in selected {
        let extension = &manifest.extensions[name];
        let output = build_extension(
            project_dir,
            &manifest,
            name,
            extension,
            &compiler,
            &options,
        )?;
        built.push(output);
    }

    print_success(&format!("Build complete ({} extension(s))", built.len()));
    for output in &built {
        print_detail(&output.display().to_string());
    }

    Ok(())
}

/// Run the full pipeline for one extension
fn build_extension(
    project_dir: &Path,
    manifest: &Manifest,
    name: &str,
    extension: &crate::core::manifest::Extension,
    compiler: &str,
    options: &BuildOptions,
) -> Result<std::path::PathBuf> {
    let prefix =
        crate::core::linker::temp_root(project_dir, name).join(crate::config::defaults::PREFIX_DIR);

    let config = BuildConfig::resolve(
        compiler.to_string(),
        &manifest.build.cflags,
        prefix,
        options.jobs,
    );

    let depends = DependsBuilder::new(
        &config,
        manifest.build.script.clone(),
        project_dir.to_path_buf(),
    );

    let spinner = create_spinner(&format!("Building dependency stack for '{name}'"));
    let outcome = depends.ensure_built(options.force);
    spinner.finish_and_clear();
    match outcome? {
        BuildOutcome::Built => tracing::info!("Dependency stack built for '{name}'"),
        BuildOutcome::Cached => tracing::info!("Dependency stack reused for '{name}'"),
    }

    let link_objects = resolve_link_objects(&depends.build_root())?;

    let builder = ExtensionBuilder::new(&config, name, extension, project_dir.to_path_buf());
    let output = builder.build(&link_objects)?;

    print_success(&format!("Built extension '{name}'"));
    Ok(output)
}
