//! Build configuration resolution
//!
//! Assembles the per-invocation build configuration from CLI options,
//! environment variables, and manifest defaults. The resolved value is
//! immutable and threaded explicitly through every downstream step, so
//! nothing about the toolchain lives in shared mutable state.

use std::path::PathBuf;

use crate::config::defaults::{CFLAGS_ENV, OPTIMIZE_ENV, VISIBILITY_FLAG};

/// Immutable configuration for one extension build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Compiler used for compiling and linking (MPI-aware)
    pub compiler: String,
    /// Ordered compiler flags
    pub cflags: Vec<String>,
    /// Optimization flag forwarded to the dependency build
    pub optimize: Option<String>,
    /// Installation prefix for the dependency stack
    pub prefix: PathBuf,
    /// Parallel jobs forwarded to the dependency build
    pub jobs: usize,
}

impl BuildConfig {
    /// Assemble a configuration from already-resolved parts
    pub fn new(
        compiler: String,
        cflags: Vec<String>,
        optimize: Option<String>,
        prefix: PathBuf,
        jobs: usize,
    ) -> Self {
        Self {
            compiler,
            cflags,
            optimize,
            prefix,
            jobs,
        }
    }

    /// Resolve a configuration from the manifest's base flags plus the
    /// process environment (`CFLAGS`, `OPTIMIZE`).
    pub fn resolve(
        compiler: String,
        base_cflags: &[String],
        prefix: PathBuf,
        jobs: Option<usize>,
    ) -> Self {
        let mut cflags = base_cflags.to_vec();
        if let Ok(extra) = std::env::var(CFLAGS_ENV) {
            cflags.extend(extra.split_whitespace().map(String::from));
        }
        let optimize = std::env::var(OPTIMIZE_ENV).ok().filter(|v| !v.is_empty());

        Self::new(
            compiler,
            cflags,
            optimize,
            prefix,
            jobs.unwrap_or_else(num_cpus::get),
        )
    }

    /// CFLAGS value handed to the dependency build script. The stack is
    /// linked statically into a shared object, so its symbols are hidden.
    pub fn depends_cflags(&self) -> String {
        let mut flags = self.cflags.join(" ");
        if !flags.is_empty() {
            flags.push(' ');
        }
        flags.push_str(VISIBILITY_FLAG);
        flags
    }
}
