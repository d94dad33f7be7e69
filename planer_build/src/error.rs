use planer_config::logging::{codes, Code};
use planer_config::{BuildConfigError, BuildDirError, ConfigError, OutputError};

use crate::executor::CommandError;

/// Everything a CLI command can fail with
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Build configuration error: {0}")]
    BuildConfig(#[from] BuildConfigError),

    #[error("Build directory error: {0}")]
    BuildDir(#[from] BuildDirError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Tool error: {0}")]
    Command(#[from] CommandError),

    #[error("No build directory given; pass --build or set top_build_dir")]
    MissingBuildDir,

    #[error("Cannot determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

impl BuildError {
    pub fn error_code(&self) -> Code {
        match self {
            BuildError::Config(e) => e.error_code(),
            BuildError::BuildConfig(e) => e.error_code(),
            BuildError::BuildDir(e) => e.error_code(),
            BuildError::Output(e) => e.error_code(),
            BuildError::Command(e) => e.error_code(),
            BuildError::MissingBuildDir => codes::build_dirs::NOT_FOUND,
            BuildError::WorkingDirectory(_) => codes::system::INITIALIZATION_FAILURE,
        }
    }

    /// Process exit status for this failure; a failing tool's own status is
    /// passed through
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Command(CommandError::NonZeroExit { exit_code, .. }) if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }
}
