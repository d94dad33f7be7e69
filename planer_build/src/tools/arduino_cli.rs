//! arduino-cli command lines

use std::path::Path;

use planer_config::ProjectConfig;

use super::Invocation;

/// Serial speed the firmware's logger is configured for
pub const MONITOR_BAUD_RATE: u32 = 115_200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArduinoCli {
    program: String,
    verbose: bool,
}

impl ArduinoCli {
    pub fn new(program: impl Into<String>, verbose: bool) -> Self {
        Self {
            program: program.into(),
            verbose,
        }
    }

    /// Compile `sketch` into `build_path`
    pub fn compile(
        &self,
        sketch: &Path,
        build_path: &Path,
        libraries: &Path,
        project: &ProjectConfig,
    ) -> Invocation {
        let invocation = Invocation::new(self.program.as_str())
            .arg("compile")
            .arg(sketch)
            .arg("--optimize-for-debug")
            .arg("--build-path")
            .arg(build_path)
            .args(["--warnings", "all"])
            .arg("--libraries")
            .arg(libraries);

        self.target(invocation, project).arg_if(self.verbose, "-v")
    }

    /// Flash a compiled image onto the board
    pub fn upload(&self, input_file: &Path, project: &ProjectConfig) -> Invocation {
        let invocation = Invocation::new(self.program.as_str())
            .arg("upload")
            .arg("--input-file")
            .arg(input_file);

        self.target(invocation, project).arg_if(self.verbose, "-v")
    }

    pub fn monitor(&self, project: &ProjectConfig) -> Invocation {
        let invocation = Invocation::new(self.program.as_str())
            .args(["monitor", "-q", "-c"])
            .arg(format!("baudrate={}", MONITOR_BAUD_RATE));

        self.target(invocation, project)
    }

    /// Install the board core at the configured version
    pub fn core_install(&self, project: &ProjectConfig) -> Invocation {
        Invocation::new(self.program.as_str())
            .args(["core", "install"])
            .arg(format!("{}@{}", project.arduino.core, project.arduino.version))
    }

    fn target(&self, invocation: Invocation, project: &ProjectConfig) -> Invocation {
        invocation
            .arg("-b")
            .arg(project.fqbn())
            .arg("-p")
            .arg(&project.arduino.port)
    }
}
