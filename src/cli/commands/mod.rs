//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod clean;
pub mod doctor;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dependency stack and every extension
    Build {
        /// Compiler used for compiling and linking (overrides MPICC)
        #[arg(long)]
        mpicc: Option<String>,

        /// Build only the named extension
        #[arg(short, long)]
        extension: Option<String>,

        /// Parallel jobs forwarded to the dependency build
        #[arg(short, long, env = "PFFTX_JOBS")]
        jobs: Option<usize>,

        /// Rebuild the dependency stack even if it is up to date
        #[arg(short, long)]
        force: bool,
    },

    /// Remove build byproducts
    Clean,

    /// Validate the project without building
    Check,

    /// Check system dependencies
    Doctor,
}

impl Commands {
    /// Dispatch to the command implementation
    pub async fn run(self) -> Result<()> {
        let project_dir = std::env::current_dir()?;
        match self {
            Self::Build {
                mpicc,
                extension,
                jobs,
                force,
            } => {
                build::execute(
                    &project_dir,
                    build::BuildOptions {
                        mpicc,
                        extension,
                        jobs,
                        force,
                    },
                )
                .await
            }
            Self::Clean => clean::execute(&project_dir).await,
            Self::Check => check::execute(&project_dir).await,
            Self::Doctor => doctor::execute(Some(project_dir.as_path())).await,
        }
    }
}
