//! Closed literal sets used by the configuration
//!
//! Each enum knows its TOML literals and the C symbol it renders to.

use serde::Serialize;

/// A string field restricted to a fixed set of literals
pub trait ConfigEnum: Sized + Copy {
    /// Accepted literals, in declaration order
    const LITERALS: &'static [&'static str];

    fn from_literal(literal: &str) -> Option<Self>;

    fn literal(&self) -> &'static str;
}

/// Firmware log verbosity, rendered as a `LOG_LEVEL_*` macro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FirmwareLogLevel {
    Error,
    #[default]
    Warning,
    Info,
    Debug,
}

impl FirmwareLogLevel {
    pub fn symbol(&self) -> &'static str {
        match self {
            FirmwareLogLevel::Error => "LOG_LEVEL_ERROR",
            FirmwareLogLevel::Warning => "LOG_LEVEL_WARNING",
            FirmwareLogLevel::Info => "LOG_LEVEL_INFO",
            FirmwareLogLevel::Debug => "LOG_LEVEL_DEBUG",
        }
    }
}

impl ConfigEnum for FirmwareLogLevel {
    const LITERALS: &'static [&'static str] = &["ERROR", "WARNING", "INFO", "DEBUG"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "ERROR" => Some(FirmwareLogLevel::Error),
            "WARNING" => Some(FirmwareLogLevel::Warning),
            "INFO" => Some(FirmwareLogLevel::Info),
            "DEBUG" => Some(FirmwareLogLevel::Debug),
            _ => None,
        }
    }

    fn literal(&self) -> &'static str {
        match self {
            FirmwareLogLevel::Error => "ERROR",
            FirmwareLogLevel::Warning => "WARNING",
            FirmwareLogLevel::Info => "INFO",
            FirmwareLogLevel::Debug => "DEBUG",
        }
    }
}

/// Keypad scanning strategy. Parsed and persisted, not rendered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeypadDriver {
    #[default]
    Digital,
    Analog,
}

impl ConfigEnum for KeypadDriver {
    const LITERALS: &'static [&'static str] = &["digital", "analog"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "digital" => Some(KeypadDriver::Digital),
            "analog" => Some(KeypadDriver::Analog),
            _ => None,
        }
    }

    fn literal(&self) -> &'static str {
        match self {
            KeypadDriver::Digital => "digital",
            KeypadDriver::Analog => "analog",
        }
    }
}

/// Stepper motor interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotorDriver {
    /// Step/direction driver board
    #[serde(rename = "driver")]
    Driver,
    /// Four wires driven directly from GPIO
    #[serde(rename = "full4wire")]
    Full4Wire,
}

impl MotorDriver {
    pub fn symbol(&self) -> &'static str {
        match self {
            MotorDriver::Driver => "motor::Driver",
            MotorDriver::Full4Wire => "motor::Full4Wire",
        }
    }
}

impl ConfigEnum for MotorDriver {
    const LITERALS: &'static [&'static str] = &["driver", "full4wire"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "driver" => Some(MotorDriver::Driver),
            "full4wire" => Some(MotorDriver::Full4Wire),
            _ => None,
        }
    }

    fn literal(&self) -> &'static str {
        match self {
            MotorDriver::Driver => "driver",
            MotorDriver::Full4Wire => "full4wire",
        }
    }
}

/// Display frame buffering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BufferMode {
    #[serde(rename = "1Page")]
    OnePage,
    #[serde(rename = "2Page")]
    TwoPage,
    #[serde(rename = "Full")]
    Full,
}

impl BufferMode {
    pub fn symbol(&self) -> &'static str {
        match self {
            BufferMode::OnePage => "_1Page",
            BufferMode::TwoPage => "_2Page",
            BufferMode::Full => "Full",
        }
    }
}

impl ConfigEnum for BufferMode {
    const LITERALS: &'static [&'static str] = &["1Page", "2Page", "Full"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "1Page" => Some(BufferMode::OnePage),
            "2Page" => Some(BufferMode::TwoPage),
            "Full" => Some(BufferMode::Full),
            _ => None,
        }
    }

    fn literal(&self) -> &'static str {
        match self {
            BufferMode::OnePage => "1Page",
            BufferMode::TwoPage => "2Page",
            BufferMode::Full => "Full",
        }
    }
}
