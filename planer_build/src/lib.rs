//! Planer build driver
//!
//! Runs the external tools of the firmware build (arduino-cli and gup) with
//! arguments taken from the validated project configuration.

pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod tools;

pub use commands::Session;
pub use config::ToolPreferences;
pub use error::BuildError;
pub use executor::{CommandError, CommandExecutor, CommandOutput};
pub use tools::Invocation;
