//! Compiler toolchain resolution
//!
//! Picks the MPI-aware compiler used for compiling and linking extensions
//! and for building the native dependency stack. One executable serves
//! both roles so the MPI runtime's include and link flags are always
//! present.

use crate::config::defaults::{DEFAULT_MPICC, MPICC_ENV};

/// Candidate compiler sources, in precedence order.
///
/// Resolution never fails: with no usable candidate the generic default
/// is returned, and an actually missing compiler surfaces later as a
/// dependency-build or link failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainResolver {
    /// Explicit per-invocation override (`--mpicc`)
    explicit: Option<String>,
    /// `MPICC` environment override
    env_override: Option<String>,
    /// Compiler found on `PATH`
    detected: Option<String>,
}

impl ToolchainResolver {
    /// Build a resolver from already-gathered candidates. Empty strings
    /// count as absent.
    pub fn new(
        explicit: Option<String>,
        env_override: Option<String>,
        detected: Option<String>,
    ) -> Self {
        Self {
            explicit: explicit.filter(|s| !s.is_empty()),
            env_override: env_override.filter(|s| !s.is_empty()),
            detected: detected.filter(|s| !s.is_empty()),
        }
    }

    /// Gather candidates from the CLI option, the process environment,
    /// and `PATH`.
    pub fn from_environment(explicit: Option<String>) -> Self {
        let env_override = std::env::var(MPICC_ENV).ok();
        let detected = which::which(DEFAULT_MPICC)
            .ok()
            .map(|path| path.display().to_string());
        Self::new(explicit, env_override, detected)
    }

    /// Resolve the compiler executable used for every compile and link
    /// invocation of this build.
    pub fn resolve(&self) -> String {
        self.explicit
            .clone()
            .or_else(|| self.env_override.clone())
            .or_else(|| self.detected.clone())
            .unwrap_or_else(|| DEFAULT_MPICC.to_string())
    }
}
