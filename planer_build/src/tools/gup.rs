//! gup command lines

use super::Invocation;

/// Target built when none is named
pub const DEFAULT_TARGET: &str = "_build/all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gup {
    program: String,
    jobs: usize,
}

impl Gup {
    pub fn new(program: impl Into<String>, jobs: usize) -> Self {
        Self {
            program: program.into(),
            jobs: jobs.max(1),
        }
    }

    /// Build `targets` (or the default target) with the build scripts
    /// calling back into `arduino_cli`
    pub fn build(&self, targets: &[String], arduino_cli: &str) -> Invocation {
        let invocation = Invocation::new(self.program.as_str())
            .arg("-j")
            .arg(self.jobs.to_string())
            .env("ARDUINO_CLI", arduino_cli);

        if targets.is_empty() {
            invocation.arg(DEFAULT_TARGET)
        } else {
            invocation.args(targets)
        }
    }
}
