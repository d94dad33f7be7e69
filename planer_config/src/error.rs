//! Configuration load errors

use crate::logging::{codes, Code};
use std::fmt;
use std::path::PathBuf;

/// Location of a value in the configuration document, e.g. `arduino.port`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    pub section: &'static str,
    pub field: Option<&'static str>,
}

impl FieldPath {
    pub const fn section(section: &'static str) -> Self {
        Self {
            section,
            field: None,
        }
    }

    pub const fn field(section: &'static str, field: &'static str) -> Self {
        Self {
            section,
            field: Some(field),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{}.{}", self.section, field),
            None => write!(f, "{}", self.section),
        }
    }
}

/// Configuration load failures
///
/// Every validation variant names the offending section and field so the
/// source document can be fixed without reading generated output.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Missing required field `{path}`")]
    MissingField { path: FieldPath },

    #[error("Field `{path}` has the wrong type: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field `{path}` has invalid value {value:?}: expected one of {}", .allowed.join(", "))]
    InvalidEnumValue {
        path: FieldPath,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Field `{path}` value {value} is out of range ({min}..={max})")]
    OutOfRange {
        path: FieldPath,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ConfigError {
    /// Get the appropriate log code for this error type
    pub fn error_code(&self) -> Code {
        match self {
            ConfigError::Io { .. } => codes::config::IO_FAILURE,
            ConfigError::Parse { .. } => codes::config::PARSE_FAILURE,
            ConfigError::MissingField { .. } => codes::config::MISSING_FIELD,
            ConfigError::TypeMismatch { .. } => codes::config::TYPE_MISMATCH,
            ConfigError::InvalidEnumValue { .. } => codes::config::INVALID_ENUM_VALUE,
            ConfigError::OutOfRange { .. } => codes::config::OUT_OF_RANGE,
        }
    }

    /// The offending field, for validation failures
    pub fn path(&self) -> Option<FieldPath> {
        match self {
            ConfigError::MissingField { path }
            | ConfigError::TypeMismatch { path, .. }
            | ConfigError::InvalidEnumValue { path, .. }
            | ConfigError::OutOfRange { path, .. } => Some(*path),
            ConfigError::Io { .. } | ConfigError::Parse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::field("arduino", "port").to_string(), "arduino.port");
        assert_eq!(FieldPath::section("keypad").to_string(), "keypad");
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let error = ConfigError::TypeMismatch {
            path: FieldPath::field("motor", "steps_per_revolution"),
            expected: "integer",
            found: "string",
        };
        assert_eq!(
            error.to_string(),
            "Field `motor.steps_per_revolution` has the wrong type: expected integer, found string"
        );

        let error = ConfigError::InvalidEnumValue {
            path: FieldPath::field("display", "buffer_mode"),
            value: "3Page".to_string(),
            allowed: &["1Page", "2Page", "Full"],
        };
        assert_eq!(
            error.to_string(),
            "Field `display.buffer_mode` has invalid value \"3Page\": expected one of 1Page, 2Page, Full"
        );
    }

    #[test]
    fn test_error_codes() {
        let error = ConfigError::MissingField {
            path: FieldPath::field("arduino", "port"),
        };
        assert_eq!(error.error_code(), codes::config::MISSING_FIELD);
        assert_eq!(error.path(), Some(FieldPath::field("arduino", "port")));

        let error = ConfigError::Parse {
            origin: "config.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert_eq!(error.error_code(), codes::config::PARSE_FAILURE);
        assert_eq!(error.path(), None);
    }
}
