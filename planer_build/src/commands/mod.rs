//! The commands behind the `planer` binary
//!
//! Each command takes a [`Session`] (directories plus tool preferences) and
//! returns a `BuildError` on failure. Printing is left to the binary.

mod actions;
mod configure;

pub use actions::{build, compile, init, monitor, upload};
pub use configure::{configure, Configured, DEFAULT_CONFIG_FILE};

use planer_config::{load_build_config, log_info, log_warning, BuildDirs, ProjectConfig};

use crate::config::ToolPreferences;
use crate::error::BuildError;
use crate::executor::CommandExecutor;
use crate::tools::{ArduinoCli, Gup};

/// Directories and tool preferences shared by every command
#[derive(Debug, Clone)]
pub struct Session {
    dirs: BuildDirs,
    preferences: ToolPreferences,
}

impl Session {
    pub fn new(dirs: BuildDirs, preferences: ToolPreferences) -> Self {
        Self { dirs, preferences }
    }

    pub fn dirs(&self) -> &BuildDirs {
        &self.dirs
    }

    pub fn preferences(&self) -> &ToolPreferences {
        &self.preferences
    }

    pub fn arduino_cli(&self) -> ArduinoCli {
        ArduinoCli::new(self.preferences.arduino_cli.as_str(), self.preferences.verbose)
    }

    pub fn gup(&self) -> Gup {
        Gup::new(self.preferences.gup.as_str(), self.preferences.jobs)
    }

    /// Executor allowed to run the configured tools
    ///
    /// `bounded` applies the preferred timeout; interactive tools run
    /// unbounded.
    fn executor(&self, bounded: bool) -> CommandExecutor {
        let mut executor = match self.preferences.timeout {
            Some(timeout) if bounded => CommandExecutor::with_timeout(timeout),
            _ => CommandExecutor::new(),
        };
        executor.allow_program(self.preferences.arduino_cli.as_str());
        executor.allow_program(self.preferences.gup.as_str());
        executor
    }

    /// Load the configuration `configure` left in the build directory
    pub fn load_project(&self) -> Result<ProjectConfig, BuildError> {
        let path = self.dirs.build_config_path();
        log_info!("Loading build configuration", "path" => path.display());

        let (project, recorded) = load_build_config(&path)?;
        if recorded.top_source_dir != self.dirs.top_source_dir {
            log_warning!(
                "Build directory was configured from another source tree",
                "configured" => recorded.top_source_dir.display(),
                "current" => self.dirs.top_source_dir.display()
            );
        }

        Ok(project)
    }
}
