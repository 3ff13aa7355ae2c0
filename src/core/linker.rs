//! Extension compile and link step
//!
//! Drives the resolved compiler over an extension's sources and links
//! the shared object with the dependency archives injected. The same
//! executable compiles and links, so the MPI runtime's flags apply to
//! both phases. Nothing here touches shared state: the configuration
//! and the link objects are passed in, which is what lets several
//! extensions build in one run without leaking settings between them.

use std::path::{Path, PathBuf};

use crate::config::defaults::{OUTPUT_DIR, OUTPUT_LIB_DIR, TEMP_ROOT_PREFIX};
use crate::core::artifacts::LinkObject;
use crate::core::config::BuildConfig;
use crate::core::manifest::Extension;
use crate::error::LinkError;
use crate::infra::process::CommandSpec;

/// Private scratch directory for an extension; the dependency prefix
/// lives under it, so two extensions never share a build tree.
pub fn temp_root(project_dir: &Path, name: &str) -> PathBuf {
    project_dir.join(format!("{TEMP_ROOT_PREFIX}{name}"))
}

/// Compiles and links one extension
#[derive(Debug)]
pub struct ExtensionBuilder<'a> {
    config: &'a BuildConfig,
    name: &'a str,
    extension: &'a Extension,
    project_dir: PathBuf,
}

impl<'a> ExtensionBuilder<'a> {
    /// Create a builder for one extension
    pub fn new(
        config: &'a BuildConfig,
        name: &'a str,
        extension: &'a Extension,
        project_dir: PathBuf,
    ) -> Self {
        Self {
            config,
            name,
            extension,
            project_dir,
        }
    }

    /// This extension's scratch directory
    pub fn temp_root(&self) -> PathBuf {
        temp_root(&self.project_dir, self.name)
    }

    /// Final shared-object path under the generic output directory
    pub fn output_path(&self) -> PathBuf {
        self.project_dir
            .join(OUTPUT_DIR)
            .join(OUTPUT_LIB_DIR)
            .join(format!("{}.so", self.name))
    }

    /// Object file for one source
    pub fn object_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "object".to_string());
        self.temp_root().join(format!("{stem}.o"))
    }

    /// Compiler invocation for one source file
    pub fn compile_command(&self, source: &Path) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.config.compiler);
        for flag in &self.config.cflags {
            spec = spec.arg(flag);
        }
        spec = spec.arg("-fPIC");
        for dir in &self.extension.include_dirs {
            spec = spec.arg(format!("-I{}", dir.display()));
        }
        spec.arg("-c")
            .arg(source.display().to_string())
            .arg("-o")
            .arg(self.object_path(source).display().to_string())
            .current_dir(&self.project_dir)
    }

    /// Link invocation producing the shared object.
    ///
    /// The dependency archives follow the extension's own objects and
    /// precede the `-l` libraries: the link line is order-sensitive, and
    /// earlier objects cannot reference symbols only in later ones.
    pub fn link_command(&self, objects: &[PathBuf], link_objects: &[LinkObject]) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.config.compiler).arg("-shared");
        for object in objects {
            spec = spec.arg(object.display().to_string());
        }
        for link_object in link_objects {
            spec = spec.arg(link_object.path.display().to_string());
        }
        for library in &self.extension.libraries {
            spec = spec.arg(format!("-l{library}"));
        }
        spec.arg("-o")
            .arg(self.output_path().display().to_string())
            .current_dir(&self.project_dir)
    }

    /// Compile every source and link the shared object.
    ///
    /// Runs strictly after the dependency build and artifact resolution;
    /// any non-zero compiler exit aborts the build with the captured
    /// stderr attached.
    pub fn build(&self, link_objects: &[LinkObject]) -> Result<PathBuf, LinkError> {
        let out_dir = self.project_dir.join(OUTPUT_DIR).join(OUTPUT_LIB_DIR);
        for dir in [self.temp_root(), out_dir] {
            std::fs::create_dir_all(&dir).map_err(|e| LinkError::Io {
                path: dir.clone(),
                error: e.to_string(),
            })?;
        }

        let mut objects = Vec::with_capacity(self.extension.sources.len());
        for source in &self.extension.sources {
            tracing::info!("Compiling {}", source.display());
            let captured = self
                .compile_command(source)
                .run()
                .map_err(|e| LinkError::Spawn {
                    program: self.config.compiler.clone(),
                    error: e.to_string(),
                })?;
            if !captured.success {
                return Err(LinkError::CompileFailed {
                    source_file: source.clone(),
                    status: captured.status,
                    stderr: captured.stderr,
                });
            }
            objects.push(self.object_path(source));
        }

        let output = self.output_path();
        tracing::info!("Linking {}", output.display());
        let captured = self
            .link_command(&objects, link_objects)
            .run()
            .map_err(|e| LinkError::Spawn {
                program: self.config.compiler.clone(),
                error: e.to_string(),
            })?;
        if !captured.success {
            return Err(LinkError::LinkFailed {
                output,
                status: captured.status,
                stderr: captured.stderr,
            });
        }

        Ok(output)
    }
}
