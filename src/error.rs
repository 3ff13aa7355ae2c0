//! Error types for pfftx
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Manifest not found at '{path}'. Run pfftx from a directory containing pfftx.toml")]
    NotFound { path: PathBuf },

    /// Manifest parse error
    #[error("Failed to parse manifest: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    /// Extension name is not usable as a directory component
    #[error("Extension name '{name}' is invalid: {reason}")]
    InvalidName { name: String, reason: String },

    /// Extension lists no source files
    #[error("Extension '{extension}' lists no source files")]
    NoSources { extension: String },

    /// Extension requested on the command line does not exist
    #[error("Extension '{extension}' not found in manifest")]
    UnknownExtension { extension: String },

    /// IO error while reading the manifest
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

/// Dependency build errors
#[derive(Error, Debug)]
pub enum DependsError {
    /// The external build script exited non-zero
    #[error(
        "Dependency build script '{script}' failed with {status}; \
         check that MPICC points to a working MPI compiler\n\
         --- stdout ---\n{stdout}\n--- stderr ---\n{stderr}"
    )]
    ScriptFailed {
        script: PathBuf,
        status: String,
        stdout: String,
        stderr: String,
    },

    /// The build script is missing
    #[error("Dependency build script not found: {script}")]
    ScriptNotFound { script: PathBuf },

    /// Another build holds the prefix lock
    #[error("Prefix '{prefix}' is locked by another build; remove '{lock}' if it is stale")]
    Locked { prefix: PathBuf, lock: PathBuf },

    /// Failed to launch the subprocess
    #[error("Failed to launch '{program}': {error}")]
    Spawn { program: String, error: String },

    /// IO error under the prefix
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

/// Static-library artifact resolution errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Dependency build root is missing entirely
    #[error("Dependency build root '{root}' does not exist; the dependency build must run first")]
    MissingRoot { root: PathBuf },

    /// A required library yielded no matches
    #[error("Static library '{library}' not found under '{root}'")]
    NotFound { library: String, root: PathBuf },

    /// A required library yielded more than one match
    #[error(
        "Static library '{library}' matched {count} files under '{root}': {matches:?}; \
         run 'pfftx clean' to remove stale build trees",
        count = .matches.len()
    )]
    Ambiguous {
        library: String,
        root: PathBuf,
        matches: Vec<PathBuf>,
    },
}

/// Extension compile/link errors
#[derive(Error, Debug)]
pub enum LinkError {
    /// A source file failed to compile
    #[error("Compiling '{source_file}' failed with {status}\n--- stderr ---\n{stderr}")]
    CompileFailed {
        source_file: PathBuf,
        status: String,
        stderr: String,
    },

    /// The final link failed
    #[error("Linking '{output}' failed with {status}\n--- stderr ---\n{stderr}")]
    LinkFailed {
        output: PathBuf,
        status: String,
        stderr: String,
    },

    /// Failed to launch the compiler
    #[error("Failed to launch compiler '{program}': {error}")]
    Spawn { program: String, error: String },

    /// IO error while preparing build directories
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

/// Cleanup errors
#[derive(Error, Debug)]
pub enum CleanError {
    /// A matched target could not be removed
    #[error("Failed to remove '{path}': {error}")]
    Remove { path: PathBuf, error: String },

    /// A pattern's parent directory could not be read
    #[error("Failed to scan '{path}': {error}")]
    Scan { path: PathBuf, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level pfftx error type
#[derive(Error, Debug)]
pub enum PfftxError {
    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Dependency build error
    #[error("Dependency build error: {0}")]
    Depends(#[from] DependsError),

    /// Artifact resolution error
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Compile/link error
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// Cleanup error
    #[error("Clean error: {0}")]
    Clean(#[from] CleanError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
