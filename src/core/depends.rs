//! Native dependency stack bootstrap
//!
//! Runs the external build procedure that compiles PFFT and its FFTW
//! backends from source into a per-extension prefix. The build happens
//! at most once per configuration: a stamp written only after full
//! success records a fingerprint of everything that influences the
//! output, and a matching stamp plus the sentinel archive short-circuit
//! later invocations. A partial failure leaves no stamp, so the next
//! run rebuilds.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::defaults::{
    CFLAGS_ENV, DEPENDS_BUILD_DIR, LOCK_FILE, MPICC_ENV, OPTIMIZE_ENV, SENTINEL_ARTIFACT,
    STAMP_FILE,
};
use crate::core::config::BuildConfig;
use crate::error::DependsError;
use crate::infra::filesystem;
use crate::infra::process::CommandSpec;

/// Outcome of [`DependsBuilder::ensure_built`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The script ran and the stack was built
    Built,
    /// A previous build with the same configuration was reused
    Cached,
}

/// Builds the dependency stack under a prefix, idempotently
#[derive(Debug)]
pub struct DependsBuilder<'a> {
    config: &'a BuildConfig,
    script: PathBuf,
    project_dir: PathBuf,
}

impl<'a> DependsBuilder<'a> {
    /// Create a builder for one prefix.
    ///
    /// `script` is resolved relative to `project_dir`, which is also the
    /// working directory of the subprocess.
    pub fn new(config: &'a BuildConfig, script: PathBuf, project_dir: PathBuf) -> Self {
        Self {
            config,
            script,
            project_dir,
        }
    }

    /// Path of the archive whose presence marks a completed build
    pub fn sentinel(&self) -> PathBuf {
        self.config.prefix.join(SENTINEL_ARTIFACT)
    }

    /// Root under which the script compiles each library package
    pub fn build_root(&self) -> PathBuf {
        self.config.prefix.join(DEPENDS_BUILD_DIR)
    }

    fn stamp_path(&self) -> PathBuf {
        self.config.prefix.join(STAMP_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.config.prefix.join(LOCK_FILE)
    }

    fn script_path(&self) -> PathBuf {
        if self.script.is_absolute() {
            self.script.clone()
        } else {
            self.project_dir.join(&self.script)
        }
    }

    /// Fingerprint of every input that affects the dependency build
    /// output: compiler, flags, optimization level, and script path.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.config.compiler.as_bytes());
        hasher.update([0u8]);
        for flag in &self.config.cflags {
            hasher.update(flag.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update([0u8]);
        if let Some(optimize) = &self.config.optimize {
            hasher.update(optimize.as_bytes());
        }
        hasher.update([0u8]);
        hasher.update(self.script.display().to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// True when a previous run completed with the same configuration.
    ///
    /// Requires both the sentinel archive and a matching stamp: a
    /// sentinel left behind by an interrupted or differently-configured
    /// build is treated as incomplete output and rebuilt.
    pub fn is_built(&self) -> bool {
        if !self.sentinel().exists() {
            return false;
        }
        match filesystem::read_file(&self.stamp_path()) {
            Ok(stamp) => stamp.trim() == self.fingerprint(),
            Err(_) => false,
        }
    }

    /// Ensure a fully built dependency stack exists under the prefix.
    ///
    /// With `force`, the cached result is ignored and the script runs
    /// unconditionally. A non-zero exit aborts the whole build; stdout
    /// and stderr are attached to the error.
    pub fn ensure_built(&self, force: bool) -> Result<BuildOutcome, DependsError> {
        if !force && self.is_built() {
            tracing::debug!(
                "Dependency stack up to date under {}",
                self.config.prefix.display()
            );
            return Ok(BuildOutcome::Cached);
        }

        let script = self.script_path();
        if !script.exists() {
            return Err(DependsError::ScriptNotFound { script });
        }

        std::fs::create_dir_all(&self.config.prefix).map_err(|e| DependsError::Io {
            path: self.config.prefix.clone(),
            error: e.to_string(),
        })?;

        // The script receives an absolute prefix so its own cd's cannot
        // change what the path points at.
        let prefix = std::fs::canonicalize(&self.config.prefix).map_err(|e| DependsError::Io {
            path: self.config.prefix.clone(),
            error: e.to_string(),
        })?;

        let _lock = PrefixLock::acquire(self.lock_path(), &self.config.prefix)?;

        tracing::info!("Building dependency stack with {}", self.config.compiler);

        let mut spec = CommandSpec::new("sh")
            .arg(script.display().to_string())
            .arg(prefix.display().to_string())
            .current_dir(&self.project_dir)
            .env(CFLAGS_ENV, self.config.depends_cflags())
            .env(MPICC_ENV, &self.config.compiler)
            .env("CC", &self.config.compiler)
            .env("JOBS", self.config.jobs.to_string());
        if let Some(optimize) = &self.config.optimize {
            spec = spec.env(OPTIMIZE_ENV, optimize);
        }

        let captured = spec.run().map_err(|e| DependsError::Spawn {
            program: "sh".to_string(),
            error: e.to_string(),
        })?;

        if !captured.success {
            return Err(DependsError::ScriptFailed {
                script,
                status: captured.status,
                stdout: captured.stdout,
                stderr: captured.stderr,
            });
        }

        filesystem::write_file_atomic(&self.stamp_path(), &self.fingerprint()).map_err(|e| {
            DependsError::Io {
                path: self.stamp_path(),
                error: e.to_string(),
            }
        })?;

        Ok(BuildOutcome::Built)
    }
}

/// Exclusive lock held while one process builds a prefix.
///
/// Created with `create_new`, so two builders of the same prefix cannot
/// both proceed; the loser fails with a diagnostic instead of racing on
/// half-written artifacts. Removed on drop.
struct PrefixLock {
    path: PathBuf,
}

impl PrefixLock {
    fn acquire(path: PathBuf, prefix: &Path) -> Result<Self, DependsError> {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(DependsError::Locked {
                prefix: prefix.to_path_buf(),
                lock: path,
            }),
            Err(e) => Err(DependsError::Io {
                path,
                error: e.to_string(),
            }),
        }
    }
}

impl Drop for PrefixLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
