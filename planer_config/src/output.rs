//! Atomic file output
//!
//! Generated files are written to a temporary file next to the destination
//! and renamed into place, so a failed pass never leaves a truncated file.

use crate::codegen::{self, CodegenError};
use crate::logging::{codes, Code};
use crate::model::ProjectConfig;
use crate::{log_debug, log_success};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render config.h: {0}")]
    Codegen(#[from] CodegenError),
}

impl OutputError {
    pub fn error_code(&self) -> Code {
        match self {
            OutputError::Io { .. } => codes::output::WRITE_FAILURE,
            OutputError::Codegen(e) => e.error_code(),
        }
    }
}

/// Replace `path` with `contents` in one rename
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), OutputError> {
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(contents.as_bytes()).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;

    log_debug!("Wrote file", "path" => path.display(), "bytes" => contents.len());
    Ok(())
}

/// Render the header and write it atomically; nothing is written if
/// rendering fails
pub fn write_config_h(config: &ProjectConfig, path: &Path) -> Result<(), OutputError> {
    let header = codegen::render(config)?;
    write_atomic(path, &header)?;

    log_success!(codes::success::CONFIG_H_WRITTEN, "Wrote config.h", "path" => path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::reference_config;
    use assert_matches::assert_matches;
    use std::fs;

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.h");

        fs::write(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        // Only the destination remains; the temporary file was renamed
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("config.h");

        let result = write_atomic(&path, "x");
        assert_matches!(result, Err(OutputError::Io { .. }));
        assert_eq!(result.unwrap_err().error_code(), codes::output::WRITE_FAILURE);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_config_h() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.h");
        let config = reference_config();

        write_config_h(&config, &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            codegen::render(&config).unwrap()
        );
    }
}
