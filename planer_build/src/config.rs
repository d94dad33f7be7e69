// RUNTIME PREFERENCES (tool locations and behaviour)

use std::env;
use std::time::Duration;

/// Where the external tools live and how to run them
///
/// Defaults come from the environment so wrapper scripts and CI can point
/// the driver at a different toolchain without extra flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPreferences {
    /// arduino-cli executable (`ARDUINO_CLI`)
    pub arduino_cli: String,

    /// gup executable (`GUP`)
    pub gup: String,

    /// Parallel jobs passed to gup (`PLANER_JOBS`)
    pub jobs: usize,

    /// Pass `-v` to arduino-cli (`PLANER_VERBOSE`)
    pub verbose: bool,

    /// Kill non-interactive tools after this long (`PLANER_TOOL_TIMEOUT_SECS`)
    pub timeout: Option<Duration>,
}

impl ToolPreferences {
    /// Build preferences from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            arduino_cli: lookup("ARDUINO_CLI").unwrap_or_else(|| "arduino-cli".to_string()),
            gup: lookup("GUP").unwrap_or_else(|| "gup".to_string()),
            jobs: lookup("PLANER_JOBS")
                .and_then(|v| v.parse().ok())
                .filter(|jobs| *jobs > 0)
                .unwrap_or(4),
            verbose: lookup("PLANER_VERBOSE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            timeout: lookup("PLANER_TOOL_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

impl Default for ToolPreferences {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let prefs = ToolPreferences::from_lookup(lookup(&[]));

        assert_eq!(prefs.arduino_cli, "arduino-cli");
        assert_eq!(prefs.gup, "gup");
        assert_eq!(prefs.jobs, 4);
        assert!(!prefs.verbose);
        assert_eq!(prefs.timeout, None);
    }

    #[test]
    fn test_overrides() {
        let prefs = ToolPreferences::from_lookup(lookup(&[
            ("ARDUINO_CLI", "/opt/arduino/arduino-cli"),
            ("GUP", "/usr/local/bin/gup"),
            ("PLANER_JOBS", "8"),
            ("PLANER_VERBOSE", "true"),
            ("PLANER_TOOL_TIMEOUT_SECS", "300"),
        ]));

        assert_eq!(prefs.arduino_cli, "/opt/arduino/arduino-cli");
        assert_eq!(prefs.gup, "/usr/local/bin/gup");
        assert_eq!(prefs.jobs, 8);
        assert!(prefs.verbose);
        assert_eq!(prefs.timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let prefs = ToolPreferences::from_lookup(lookup(&[
            ("PLANER_JOBS", "0"),
            ("PLANER_VERBOSE", "yes"),
            ("PLANER_TOOL_TIMEOUT_SECS", "soon"),
        ]));

        assert_eq!(prefs.jobs, 4);
        assert!(!prefs.verbose);
        assert_eq!(prefs.timeout, None);
    }
}
