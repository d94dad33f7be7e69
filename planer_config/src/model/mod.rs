//! Typed project configuration
//!
//! The configuration document is validated against a fixed schema once, at
//! load time. A successful load yields a complete [`ProjectConfig`]; any
//! missing, mistyped or unknown-literal field fails the whole load.

pub mod enums;
pub mod reader;

pub use enums::{BufferMode, ConfigEnum, FirmwareLogLevel, KeypadDriver, MotorDriver};

use crate::error::ConfigError;
use crate::logging::codes;
use crate::{log_debug, log_success};
use reader::SectionReader;
use serde::Serialize;
use std::fs;
use std::path::Path;
use toml::Table;

/// Target board and serial port
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArduinoConfig {
    /// Platform core, e.g. `arduino:renesas_uno`
    pub core: String,
    /// Core version passed to `core install`
    pub version: String,
    pub board: String,
    pub port: String,
}

/// Keypad matrix GPIO assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypadConfig {
    pub row_pins: Vec<u8>,
    pub column_pins: Vec<u8>,
    pub driver: KeypadDriver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotorConfig {
    pub driver: MotorDriver,
    pub steps_per_revolution: u32,
    pub pins: Vec<u8>,
}

/// Display controller and its GPIO assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    /// Controller type, rendered verbatim (e.g. `PCD8544`)
    pub controller: String,
    pub buffer_mode: BufferMode,
    pub clock: u8,
    pub data: u8,
    pub cs: u8,
    pub dc: u8,
    pub reset: u8,
    pub backlight: u8,
}

/// Complete, validated project configuration
///
/// Created for one configuration pass and passed explicitly to whatever
/// needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub log_level: FirmwareLogLevel,
    pub arduino: ArduinoConfig,
    pub keypad: KeypadConfig,
    pub motor: MotorConfig,
    pub display: DisplayConfig,
}

impl ProjectConfig {
    /// Fully qualified board name, `<core>:<board>`
    pub fn fqbn(&self) -> String {
        format!("{}:{}", self.arduino.core, self.arduino.board)
    }

    /// Validate a parsed TOML document
    pub fn from_table(root: &Table) -> Result<Self, ConfigError> {
        let log_level = reader::optional_root_enum(root, "log_level")?.unwrap_or_default();

        Ok(Self {
            log_level,
            arduino: parse_arduino(reader::section(root, "arduino")?)?,
            keypad: parse_keypad(reader::section(root, "keypad")?)?,
            motor: parse_motor(reader::section(root, "motor")?)?,
            display: parse_display(reader::section(root, "display")?)?,
        })
    }
}

fn parse_arduino(section: SectionReader<'_>) -> Result<ArduinoConfig, ConfigError> {
    Ok(ArduinoConfig {
        core: section.string("core")?,
        version: section.string("version")?,
        board: section.string("board")?,
        port: section.string("port")?,
    })
}

fn parse_keypad(section: SectionReader<'_>) -> Result<KeypadConfig, ConfigError> {
    Ok(KeypadConfig {
        row_pins: section.integer_list("row_pins")?,
        column_pins: section.integer_list("column_pins")?,
        driver: section.optional_enumeration("driver")?.unwrap_or_default(),
    })
}

fn parse_motor(section: SectionReader<'_>) -> Result<MotorConfig, ConfigError> {
    Ok(MotorConfig {
        driver: section.enumeration("driver")?,
        steps_per_revolution: section.integer("steps_per_revolution")?,
        pins: section.integer_list("pins")?,
    })
}

fn parse_display(section: SectionReader<'_>) -> Result<DisplayConfig, ConfigError> {
    Ok(DisplayConfig {
        controller: section.string("controller")?,
        buffer_mode: section.enumeration("buffer_mode")?,
        clock: section.integer("clock")?,
        data: section.integer("data")?,
        cs: section.integer("cs")?,
        dc: section.integer("dc")?,
        reset: section.integer("reset")?,
        backlight: section.integer("backlight")?,
    })
}

/// Parse a TOML document; `origin` names it in syntax errors
pub fn parse_table(text: &str, origin: &str) -> Result<Table, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        message: e.to_string().trim_end().to_string(),
    })
}

/// Parse and validate configuration text
pub fn from_toml_str(text: &str) -> Result<ProjectConfig, ConfigError> {
    ProjectConfig::from_table(&parse_table(text, "<string>")?)
}

/// Read and validate a configuration file
pub fn load(path: impl AsRef<Path>) -> Result<ProjectConfig, ConfigError> {
    let path = path.as_ref();
    log_debug!("Loading project configuration", "path" => path.display());

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let root = parse_table(&text, &path.display().to_string())?;
    let config = ProjectConfig::from_table(&root)?;

    log_success!(codes::success::CONFIG_LOADED, "Project configuration loaded",
        "path" => path.display(),
        "fqbn" => config.fqbn()
    );

    Ok(config)
}
