//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests. Tests
//! drive the compiled binary against a temporary project whose
//! dependency build script and compiler are shell stubs that record
//! their invocations.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Test project context
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create an executable file in the test project
    #[cfg(unix)]
    pub fn create_executable(&self, name: &str, content: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        self.create_file(name, content);
        let path = self.dir.path().join(name);
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat executable")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod executable");
        path
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Count the lines of a log file, zero if absent
    pub fn count_log_lines(&self, name: &str) -> usize {
        if !self.file_exists(name) {
            return 0;
        }
        self.read_file(name).lines().count()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample manifest TOML for testing
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "pfft-binding"
version = "0.1.0"

[build]
cflags = ["-O2"]

[extensions.core]
sources = ["pfft/core.c"]
include_dirs = ["pfft"]
libraries = ["m"]
"#;

/// Dependency build script stub that produces the full artifact layout
/// and records its invocation and environment under depends/.
#[allow(dead_code)]
pub const OK_SCRIPT: &str = r#"#!/bin/sh
set -e
prefix="$1"
mkdir -p "$prefix/lib" \
  "$prefix/build/pfft-1.0.8" \
  "$prefix/build/fftw-3.3.10-mpi" \
  "$prefix/build/fftw-3.3.10"
: > "$prefix/lib/libpfft.a"
: > "$prefix/build/pfft-1.0.8/libpfft.a"
: > "$prefix/build/pfft-1.0.8/libpfftf.a"
: > "$prefix/build/fftw-3.3.10-mpi/libfftw3_mpi.a"
: > "$prefix/build/fftw-3.3.10-mpi/libfftw3f_mpi.a"
: > "$prefix/build/fftw-3.3.10/libfftw3.a"
: > "$prefix/build/fftw-3.3.10/libfftw3f.a"
echo run >> depends/invocations.log
printf '%s\n' "$CFLAGS" > depends/cflags.txt
printf '%s\n' "$MPICC" > depends/mpicc.txt
printf '%s\n' "$prefix" > depends/prefix.txt
"#;

/// Dependency build script stub that fails
#[allow(dead_code)]
pub const FAILING_SCRIPT: &str = r#"#!/bin/sh
echo "configure: error: no fortran" >&2
exit 2
"#;

/// Compiler stub that records each invocation and touches the -o target
#[allow(dead_code)]
pub const STUB_COMPILER: &str = r#"#!/bin/sh
echo "$@" >> cc-invocations.log
out=
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    out="$2"
  fi
  shift
done
if [ -n "$out" ]; then
  : > "$out"
fi
"#;

/// Set up a complete buildable project with stub script and compiler.
/// Returns the absolute path of the stub compiler.
#[allow(dead_code)]
pub fn setup_buildable_project(project: &TestProject) -> PathBuf {
    project.create_file("pfftx.toml", SAMPLE_MANIFEST);
    project.create_file("pfft/core.c", "int core;\n");
    project.create_file("depends/install_pfft.sh", OK_SCRIPT);
    project.create_executable("stub-cc", STUB_COMPILER)
}

/// Run the pfftx binary in the project directory
pub fn run_pfftx(project: &TestProject, args: &[&str]) -> Output {
    run_pfftx_with_env(project, args, &[])
}

/// Run the pfftx binary with extra environment variables
pub fn run_pfftx_with_env(project: &TestProject, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pfftx"));
    cmd.current_dir(project.path());
    // Keep the host environment from leaking into toolchain resolution.
    cmd.env_remove("MPICC");
    cmd.env_remove("OPTIMIZE");
    cmd.env_remove("CFLAGS");
    for (key, value) in env {
        cmd.env(key, value);
    }
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute pfftx")
}
