//! Planer project configuration
//!
//! Loads the firmware's TOML project configuration into a typed model and
//! renders it into the `config.h` header consumed by the firmware build.

#[macro_use]
pub mod logging;
pub mod build_config;
pub mod codegen;
pub mod error;
pub mod model;
pub mod output;

// Re-export key types for library consumers
pub use build_config::{load_build_config, write_build_config, BuildConfigError, BuildDirError, BuildDirs};
pub use codegen::{render, CodegenError};
pub use error::{ConfigError, FieldPath};
pub use model::{load, ProjectConfig};
pub use output::{write_atomic, write_config_h, OutputError};
