//! Error and success codes with their metadata
//!
//! Single source of truth for every code the toolkit logs. Codes are grouped
//! by the stage that raises them; the registry below carries the category,
//! description and recommended action shown to the user.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata for a registered code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl CodeMetadata {
    const fn new(
        code: &'static str,
        category: &'static str,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            description,
            recommended_action,
        }
    }
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Project configuration load errors
pub mod config {
    use super::Code;

    pub const IO_FAILURE: Code = Code::new("E010");
    pub const PARSE_FAILURE: Code = Code::new("E011");
    pub const MISSING_FIELD: Code = Code::new("E012");
    pub const TYPE_MISMATCH: Code = Code::new("E013");
    pub const INVALID_ENUM_VALUE: Code = Code::new("E014");
    pub const OUT_OF_RANGE: Code = Code::new("E015");
}

pub mod codegen {
    use super::Code;

    pub const TEMPLATE_FAILURE: Code = Code::new("E020");
}

pub mod output {
    use super::Code;

    pub const WRITE_FAILURE: Code = Code::new("E030");
    pub const SERIALIZE_FAILURE: Code = Code::new("E031");
}

/// Build directory layout errors
pub mod build_dirs {
    use super::Code;

    pub const SAME_AS_SOURCE: Code = Code::new("E040");
    pub const NOT_FOUND: Code = Code::new("E041");
    pub const NOT_UTF8: Code = Code::new("E042");
}

/// External tool invocation errors
pub mod tools {
    use super::Code;

    pub const PROGRAM_NOT_FOUND: Code = Code::new("E050");
    pub const EXECUTION_FAILED: Code = Code::new("E051");
    pub const TIMEOUT: Code = Code::new("E052");
    pub const PERMISSION_DENIED: Code = Code::new("E053");
    pub const SECURITY_VIOLATION: Code = Code::new("E054");
    pub const NON_ZERO_EXIT: Code = Code::new("E055");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I010");
    pub const CONFIG_LOADED: Code = Code::new("I011");
    pub const CONFIG_H_WRITTEN: Code = Code::new("I012");
    pub const BUILD_CONFIG_WRITTEN: Code = Code::new("I013");
    pub const COMMAND_COMPLETED: Code = Code::new("I014");
}

const METADATA: &[CodeMetadata] = &[
    CodeMetadata::new(
        "ERR001",
        "System",
        "Critical internal error",
        "File a bug report with the failing command line",
    ),
    CodeMetadata::new(
        "ERR002",
        "System",
        "Logging or environment initialization failure",
        "Check RUST_LOG and the log level argument",
    ),
    CodeMetadata::new(
        "E010",
        "Configuration",
        "Configuration file could not be read",
        "Check the path passed to --config and its permissions",
    ),
    CodeMetadata::new(
        "E011",
        "Configuration",
        "Configuration file is not valid TOML",
        "Fix the TOML syntax at the reported location",
    ),
    CodeMetadata::new(
        "E012",
        "Configuration",
        "Required configuration field is missing",
        "Add the named field to the configuration file",
    ),
    CodeMetadata::new(
        "E013",
        "Configuration",
        "Configuration value has the wrong type",
        "Use the expected TOML type for the named field",
    ),
    CodeMetadata::new(
        "E014",
        "Configuration",
        "Configuration value is not one of the allowed literals",
        "Use one of the listed values for the named field",
    ),
    CodeMetadata::new(
        "E015",
        "Configuration",
        "Configuration integer is outside its allowed range",
        "Use a value within the reported bounds",
    ),
    CodeMetadata::new(
        "E020",
        "CodeGeneration",
        "Header template rendering failed",
        "File a bug report with the configuration that triggered it",
    ),
    CodeMetadata::new(
        "E030",
        "Output",
        "Generated file could not be written",
        "Check that the build directory is writable",
    ),
    CodeMetadata::new(
        "E031",
        "Output",
        "Build configuration could not be serialised to TOML",
        "Use source and build paths that are valid UTF-8",
    ),
    CodeMetadata::new(
        "E040",
        "BuildDirectory",
        "Build directory is the source directory",
        "Pass a separate directory with --build",
    ),
    CodeMetadata::new(
        "E041",
        "BuildDirectory",
        "Build directory does not exist",
        "Create the build directory before running configure",
    ),
    CodeMetadata::new(
        "E042",
        "BuildDirectory",
        "Source or build directory path is not valid UTF-8",
        "Move the project to a path with UTF-8 characters only",
    ),
    CodeMetadata::new(
        "E050",
        "Tools",
        "External program not found",
        "Install the tool or point ARDUINO_CLI/GUP at it",
    ),
    CodeMetadata::new(
        "E051",
        "Tools",
        "External program could not be executed",
        "Run the reported command by hand to see the failure",
    ),
    CodeMetadata::new(
        "E052",
        "Tools",
        "External program timed out",
        "Raise PLANER_TOOL_TIMEOUT_SECS or check the device connection",
    ),
    CodeMetadata::new(
        "E053",
        "Tools",
        "Permission denied running external program",
        "Check execute permissions and serial port access",
    ),
    CodeMetadata::new(
        "E054",
        "Tools",
        "Program is not on the allowed tool list",
        "Only configured tools may be run",
    ),
    CodeMetadata::new(
        "E055",
        "Tools",
        "External program exited with an error status",
        "Inspect the tool output above",
    ),
];

static REGISTRY: OnceLock<HashMap<&'static str, &'static CodeMetadata>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, &'static CodeMetadata> {
    REGISTRY.get_or_init(|| METADATA.iter().map(|m| (m.code, m)).collect())
}

/// Get metadata for a specific code
pub fn get_metadata(code: &str) -> Option<&'static CodeMetadata> {
    registry().get(code).copied()
}

/// Get human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
