//! Build directory layout and the persisted `<build>/config.toml`
//!
//! `configure` copies the project configuration into the build directory
//! together with a `[build]` table recording both directories. Every other
//! command reads that copy back.

use crate::error::ConfigError;
use crate::logging::{codes, Code};
use crate::model::{self, reader, ProjectConfig};
use crate::output::{self, OutputError};
use crate::log_success;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted configuration inside the build directory
pub const BUILD_CONFIG_FILE: &str = "config.toml";

/// File name of the generated header inside the build directory
pub const CONFIG_H_FILE: &str = "config.h";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildDirError {
    #[error("Build directory must not be the source directory: {}", .0.display())]
    SameAsSource(PathBuf),

    #[error("Build directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Directory path is not valid UTF-8: {}", .0.display())]
    NotUtf8(PathBuf),
}

impl BuildDirError {
    pub fn error_code(&self) -> Code {
        match self {
            BuildDirError::SameAsSource(_) => codes::build_dirs::SAME_AS_SOURCE,
            BuildDirError::NotFound(_) => codes::build_dirs::NOT_FOUND,
            BuildDirError::NotUtf8(_) => codes::build_dirs::NOT_UTF8,
        }
    }
}

/// Source and build directory pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDirs {
    pub top_source_dir: PathBuf,
    pub top_build_dir: PathBuf,
}

impl BuildDirs {
    pub fn new(top_source_dir: impl Into<PathBuf>, top_build_dir: impl Into<PathBuf>) -> Self {
        Self {
            top_source_dir: top_source_dir.into(),
            top_build_dir: top_build_dir.into(),
        }
    }

    /// The build directory must exist and differ from the source directory.
    /// Both paths are recorded in `config.toml`, so both must be UTF-8.
    pub fn validate(&self) -> Result<(), BuildDirError> {
        for dir in [&self.top_source_dir, &self.top_build_dir] {
            if dir.to_str().is_none() {
                return Err(BuildDirError::NotUtf8(dir.clone()));
            }
        }

        if same_dir(&self.top_source_dir, &self.top_build_dir) {
            return Err(BuildDirError::SameAsSource(self.top_build_dir.clone()));
        }

        if !self.top_build_dir.is_dir() {
            return Err(BuildDirError::NotFound(self.top_build_dir.clone()));
        }

        Ok(())
    }

    pub fn build_config_path(&self) -> PathBuf {
        self.top_build_dir.join(BUILD_CONFIG_FILE)
    }

    pub fn config_h_path(&self) -> PathBuf {
        self.top_build_dir.join(CONFIG_H_FILE)
    }

    /// Arduino libraries shipped with the sources
    pub fn libraries_dir(&self) -> PathBuf {
        self.top_source_dir.join("libraries")
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[derive(Serialize)]
struct BuildConfigFile<'a> {
    #[serde(flatten)]
    project: &'a ProjectConfig,
    build: &'a BuildDirs,
}

/// Serialise the project configuration plus the `[build]` table
pub fn build_config_toml(dirs: &BuildDirs, project: &ProjectConfig) -> Result<String, BuildConfigError> {
    let file = BuildConfigFile {
        project,
        build: dirs,
    };

    Ok(toml::to_string(&file)?)
}

#[derive(Debug, thiserror::Error)]
pub enum BuildConfigError {
    #[error("Cannot serialise build configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl BuildConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            BuildConfigError::Serialize(_) => codes::output::SERIALIZE_FAILURE,
            BuildConfigError::Output(e) => e.error_code(),
        }
    }
}

/// Write `<build>/config.toml`
pub fn write_build_config(dirs: &BuildDirs, project: &ProjectConfig) -> Result<PathBuf, BuildConfigError> {
    let path = dirs.build_config_path();
    let text = build_config_toml(dirs, project)?;

    output::write_atomic(&path, &text)?;

    log_success!(codes::success::BUILD_CONFIG_WRITTEN, "Wrote build configuration",
        "path" => path.display()
    );
    Ok(path)
}

/// Read `<build>/config.toml` back into the project configuration and
/// the directories it was configured with
pub fn load_build_config(path: &Path) -> Result<(ProjectConfig, BuildDirs), ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let root = model::parse_table(&text, &path.display().to_string())?;
    let project = ProjectConfig::from_table(&root)?;

    let build = reader::section(&root, "build")?;
    let dirs = BuildDirs::new(build.string("top_source_dir")?, build.string("top_build_dir")?);

    Ok((project, dirs))
}
