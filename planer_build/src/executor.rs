//! Guarded execution of the external build tools

use std::collections::HashSet;
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use planer_config::logging::{codes, Code};
use planer_config::{log_debug, log_success};
use wait_timeout::ChildExt;

use crate::tools::Invocation;

/// Runs whitelisted programs with an optional timeout
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    timeout: Option<Duration>,
    allowed_programs: HashSet<String>,
}

impl CommandExecutor {
    /// Create executor with empty whitelist - must be configured before use
    pub fn new() -> Self {
        Self::default()
    }

    /// Create executor that kills children running longer than `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            allowed_programs: HashSet::new(),
        }
    }

    pub fn allow_program(&mut self, program: impl Into<String>) {
        self.allowed_programs.insert(program.into());
    }

    pub fn is_allowed(&self, program: &str) -> bool {
        self.allowed_programs.contains(program)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run an invocation to completion with the terminal's standard streams
    ///
    /// Without a timeout the call waits as long as the child runs, which is
    /// what the serial monitor needs.
    pub fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        let program = invocation.program.as_str();
        if !self.is_allowed(program) {
            return Err(CommandError::SecurityViolation {
                reason: format!("Command '{}' not in whitelist", program),
            });
        }

        let timeout = self.timeout;
        log_debug!("Spawning tool", "command" => invocation);

        let mut cmd = Command::new(program);
        cmd.args(&invocation.args);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| spawn_error(program, e))?;

        let status = wait(&mut child, timeout).map_err(|e| CommandError::ExecutionFailed {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

        let status = match status {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CommandError::Timeout {
                    program: program.to_string(),
                    timeout_ms: timeout.map(|t| t.as_millis() as u64).unwrap_or_default(),
                });
            }
        };

        let output = CommandOutput {
            exit_code: status.code().unwrap_or(-1),
            duration: start.elapsed(),
        };
        log_debug!(
            "Tool exited",
            "program" => program,
            "exit_code" => output.exit_code,
            "duration_ms" => output.duration.as_millis()
        );
        Ok(output)
    }

    /// Like `run`, but a non-zero exit status is an error
    pub fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        let output = self.run(invocation)?;
        if !output.success() {
            return Err(CommandError::NonZeroExit {
                program: invocation.program.clone(),
                exit_code: output.exit_code,
            });
        }
        log_success!(
            codes::success::COMMAND_COMPLETED,
            "Tool completed",
            "program" => invocation.program,
            "duration_ms" => output.duration.as_millis()
        );
        Ok(output)
    }
}

fn spawn_error(program: &str, e: io::Error) -> CommandError {
    match e.kind() {
        io::ErrorKind::NotFound => CommandError::ProgramNotFound {
            program: program.to_string(),
        },
        io::ErrorKind::PermissionDenied => CommandError::PermissionDenied {
            program: program.to_string(),
        },
        _ => CommandError::ExecutionFailed {
            program: program.to_string(),
            reason: e.to_string(),
        },
    }
}

fn wait(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    match timeout {
        Some(timeout) => child.wait_timeout(timeout),
        None => child.wait().map(Some),
    }
}

/// Command execution output
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Command execution errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Program not found: {program}")]
    ProgramNotFound { program: String },

    #[error("Execution failed for '{program}': {reason}")]
    ExecutionFailed { program: String, reason: String },

    #[error("'{program}' timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("Permission denied: {program}")]
    PermissionDenied { program: String },

    #[error("Security violation: {reason}")]
    SecurityViolation { reason: String },

    #[error("'{program}' exited with status {exit_code}")]
    NonZeroExit { program: String, exit_code: i32 },
}

impl CommandError {
    pub fn error_code(&self) -> Code {
        match self {
            CommandError::ProgramNotFound { .. } => codes::tools::PROGRAM_NOT_FOUND,
            CommandError::ExecutionFailed { .. } => codes::tools::EXECUTION_FAILED,
            CommandError::Timeout { .. } => codes::tools::TIMEOUT,
            CommandError::PermissionDenied { .. } => codes::tools::PERMISSION_DENIED,
            CommandError::SecurityViolation { .. } => codes::tools::SECURITY_VIOLATION,
            CommandError::NonZeroExit { .. } => codes::tools::NON_ZERO_EXIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;

    fn sh(script: &str) -> Invocation {
        Invocation::new("sh").arg("-c").arg(script)
    }

    fn executor() -> CommandExecutor {
        let mut executor = CommandExecutor::new();
        executor.allow_program("sh");
        executor
    }

    #[test]
    fn test_empty_whitelist() {
        let executor = CommandExecutor::new();
        assert!(!executor.is_allowed("arduino-cli"));
        assert!(!executor.is_allowed("gup"));
        assert_eq!(executor.timeout(), None);
    }

    #[test]
    fn test_security_violation() {
        let executor = CommandExecutor::new();
        let result = executor.run(&Invocation::new("rm").arg("-rf").arg("/"));

        assert_matches!(result, Err(CommandError::SecurityViolation { .. }));
    }

    #[test]
    fn test_environment_and_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = sh("printf '%s' \"$ARDUINO_CLI\" > env.txt; pwd > cwd.txt")
            .env("ARDUINO_CLI", "/opt/arduino-cli")
            .current_dir(dir.path());

        let output = executor().run(&invocation).unwrap();

        assert!(output.success());
        assert_eq!(
            fs::read_to_string(dir.path().join("env.txt")).unwrap(),
            "/opt/arduino-cli"
        );
        let reported = fs::read_to_string(dir.path().join("cwd.txt")).unwrap();
        assert_eq!(
            fs::canonicalize(reported.trim()).unwrap(),
            fs::canonicalize(dir.path()).unwrap()
        );
    }

    #[test]
    fn test_non_zero_exit() {
        let executor = executor();

        let output = executor.run(&sh("exit 3")).unwrap();
        assert_eq!(output.exit_code, 3);
        assert!(!output.success());

        let result = executor.run_checked(&sh("exit 3"));
        assert_matches!(result, Err(CommandError::NonZeroExit { exit_code: 3, .. }));
    }

    #[test]
    fn test_timeout_kills_child() {
        let mut executor = CommandExecutor::with_timeout(Duration::from_millis(100));
        executor.allow_program("sh");

        let start = Instant::now();
        let result = executor.run(&sh("sleep 5"));

        assert_matches!(result, Err(CommandError::Timeout { timeout_ms: 100, .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_no_timeout_waits_for_exit() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("done");
        let invocation = sh(&format!("sleep 0.2; touch '{}'", marker.display()));

        let output = executor().run_checked(&invocation).unwrap();

        assert!(output.duration >= Duration::from_millis(200));
        assert!(marker.exists());
    }

    #[test]
    fn test_program_not_found() {
        let mut executor = CommandExecutor::new();
        executor.allow_program("planer-no-such-tool");

        let result = executor.run(&Invocation::new("planer-no-such-tool"));
        assert_matches!(result, Err(CommandError::ProgramNotFound { .. }));
    }

    #[test]
    fn test_error_codes() {
        let err = CommandError::NonZeroExit {
            program: "gup".to_string(),
            exit_code: 1,
        };
        assert_eq!(err.error_code(), codes::tools::NON_ZERO_EXIT);
        assert_eq!(err.to_string(), "'gup' exited with status 1");
    }
}
