use std::path::{Path, PathBuf};

use planer_config::{log_info, write_build_config, write_config_h};

use super::Session;
use crate::error::BuildError;

/// Project configuration read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml.default";

/// Files written by a successful `configure`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configured {
    pub build_config: PathBuf,
    pub config_h: PathBuf,
}

/// Validate the project configuration and set up the build directory
///
/// An invalid configuration leaves the build directory as it was. The
/// header is written before `config.toml`, so a failed write never leaves
/// a new `config.toml` next to a stale header.
pub fn configure(session: &Session, config: Option<&Path>) -> Result<Configured, BuildError> {
    let dirs = session.dirs();
    dirs.validate()?;

    let source = match config {
        Some(path) => path.to_path_buf(),
        None => dirs.top_source_dir.join(DEFAULT_CONFIG_FILE),
    };
    log_info!(
        "Configuring build directory",
        "config" => source.display(),
        "build" => dirs.top_build_dir.display()
    );

    let project = planer_config::load(&source)?;

    let config_h = dirs.config_h_path();
    write_config_h(&project, &config_h)?;
    let build_config = write_build_config(dirs, &project)?;

    Ok(Configured {
        build_config,
        config_h,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::Fixture;
    use crate::config::ToolPreferences;
    use assert_matches::assert_matches;
    use planer_config::{BuildDirError, BuildDirs, ConfigError, OutputError};
    use std::fs;

    fn no_env() -> ToolPreferences {
        ToolPreferences::from_lookup(|_| None)
    }

    #[test]
    fn test_configure_writes_build_files() {
        let fixture = Fixture::new();
        let session = fixture.session(no_env());

        let configured = configure(&session, None).unwrap();

        assert_eq!(configured.build_config, fixture.build.path().join("config.toml"));
        assert_eq!(configured.config_h, fixture.build.path().join("config.h"));

        let header = fs::read_to_string(&configured.config_h).unwrap();
        assert!(header.contains("Planer__config_h_INCLUDED"));
        assert!(header.contains(".rowPins = {3, 2, 14, 15}"));
        assert!(header.contains(".bufferMode = _1Page"));
        assert!(header.contains("LOG_LEVEL_WARNING"));

        let build_config = fs::read_to_string(&configured.build_config).unwrap();
        assert!(build_config.contains("[build]"));
        assert!(build_config.contains("top_build_dir"));
    }

    #[test]
    fn test_explicit_config_path() {
        let fixture = Fixture::new();
        let alternative = fixture.source.path().join("bench.toml");
        let text = fs::read_to_string(fixture.source.path().join(DEFAULT_CONFIG_FILE))
            .unwrap()
            .replace("buffer_mode = \"1Page\"", "buffer_mode = \"Full\"");
        fs::write(&alternative, text).unwrap();

        let configured = configure(&fixture.session(no_env()), Some(&alternative)).unwrap();

        let header = fs::read_to_string(configured.config_h).unwrap();
        assert!(header.contains(".bufferMode = Full"));
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let fixture = Fixture::new();
        let path = fixture.source.path().join(DEFAULT_CONFIG_FILE);
        let text = fs::read_to_string(&path)
            .unwrap()
            .replace("driver = \"driver\"", "driver = \"half4wire\"");
        fs::write(&path, text).unwrap();

        let result = configure(&fixture.session(no_env()), None);

        assert_matches!(
            result,
            Err(BuildError::Config(ConfigError::InvalidEnumValue { .. }))
        );
        assert!(!fixture.build.path().join("config.toml").exists());
        assert!(!fixture.build.path().join("config.h").exists());
    }

    #[test]
    fn test_failed_header_write_keeps_previous_build_config() {
        let fixture = Fixture::new();
        let session = fixture.session(no_env());
        let build_config = fixture.build.path().join("config.toml");
        fs::write(&build_config, "# previous").unwrap();
        // A directory in the header's place makes the final rename fail
        fs::create_dir(fixture.build.path().join("config.h")).unwrap();

        let result = configure(&session, None);

        assert_matches!(result, Err(BuildError::Output(OutputError::Io { .. })));
        assert_eq!(fs::read_to_string(&build_config).unwrap(), "# previous");
    }

    #[test]
    fn test_build_dir_must_differ_from_source() {
        let fixture = Fixture::new();
        let session = Session::new(
            BuildDirs::new(fixture.source.path(), fixture.source.path()),
            no_env(),
        );

        assert_matches!(
            configure(&session, None),
            Err(BuildError::BuildDir(BuildDirError::SameAsSource(_)))
        );
        assert!(!fixture.source.path().join("config.h").exists());
    }
}
