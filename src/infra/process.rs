//! Subprocess execution
//!
//! Runs external commands with explicit argument vectors and captured
//! output. Commands are never passed through a shell, so paths with
//! spaces or metacharacters need no quoting.

use std::path::{Path, PathBuf};
use std::process::Command;

/// A subprocess invocation under construction
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    current_dir: Option<PathBuf>,
}

/// Captured result of a finished subprocess
#[derive(Debug)]
pub struct Captured {
    /// Whether the process exited with code zero
    pub success: bool,
    /// Human-readable exit status (e.g., "exit status: 2")
    pub status: String,
    /// Decoded stdout
    pub stdout: String,
    /// Decoded stderr
    pub stderr: String,
}

impl CommandSpec {
    /// Start building an invocation of `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
        }
    }

    /// Append a single argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set an environment variable for the child
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the child's working directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// The program being invoked
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument vector
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The working directory, if set
    pub fn dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Render the invocation for log output
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// Returns `Err` only when the process could not be launched; a
    /// non-zero exit is reported through [`Captured::success`].
    pub fn run(&self) -> std::io::Result<Captured> {
        tracing::debug!("Running: {}", self.display());

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for (key, value) in &self.env {
            command.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let output = command.output()?;

        Ok(Captured {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
