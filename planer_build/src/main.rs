use std::env;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use planer_build::{commands, BuildError, Session, ToolPreferences};
use planer_config::logging::{codes, LogEvent, LogLevel};
use planer_config::{log_success, BuildDirs};

/// Configure, build and flash the Planer firmware
#[derive(Parser, Debug)]
#[command(name = "planer", version, about)]
struct Cli {
    /// Log verbosity: 0 warnings, 1 info, 2 debug
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2), global = true)]
    log_level: u8,

    /// Pass -v to arduino-cli
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Source tree (defaults to the current directory)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Build directory
    #[arg(long, env = "top_build_dir", global = true)]
    build: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the project configuration and write config.toml and config.h into the build directory
    Configure {
        /// Project configuration (defaults to <source>/config.toml.default)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Prepare the toolchain
    Init {
        /// Install the configured Arduino core
        #[arg(long)]
        arduino_core: bool,
    },

    /// Run gup for the given targets (defaults to _build/all)
    Build { targets: Vec<String> },

    /// Compile a sketch into the build directory
    Compile { sketch: PathBuf },

    /// Upload a compiled image to the board
    Upload { file: PathBuf },

    /// Open the serial monitor
    Monitor,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(LogLevel::from_verbosity(cli.log_level).to_level_filter())
        .parse_env("RUST_LOG")
        .format_target(false)
        .try_init()?;

    log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Planer build driver started",
        "version" => env!("CARGO_PKG_VERSION")
    );

    if let Err(error) = run(cli) {
        print_detailed_error(&error);
        std::process::exit(error.exit_code());
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), BuildError> {
    let session = session(&cli)?;

    match &cli.command {
        Command::Configure { config } => {
            let configured = commands::configure(&session, config.as_deref())?;
            println!("Configured {}", session.dirs().top_build_dir.display());
            println!("  {}", configured.build_config.display());
            println!("  {}", configured.config_h.display());
        }
        Command::Init { arduino_core } => commands::init(&session, *arduino_core)?,
        Command::Build { targets } => commands::build(&session, targets)?,
        Command::Compile { sketch } => commands::compile(&session, sketch)?,
        Command::Upload { file } => commands::upload(&session, file)?,
        Command::Monitor => commands::monitor(&session)?,
    }

    Ok(())
}

fn session(cli: &Cli) -> Result<Session, BuildError> {
    let cwd = env::current_dir().map_err(BuildError::WorkingDirectory)?;

    let source = match &cli.source {
        Some(source) => absolute(&cwd, source),
        None => cwd.clone(),
    };
    let build = match &cli.build {
        Some(build) => absolute(&cwd, build),
        None => return Err(BuildError::MissingBuildDir),
    };

    let mut preferences = ToolPreferences::default();
    preferences.verbose |= cli.verbose;

    Ok(Session::new(BuildDirs::new(source, build), preferences))
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn print_detailed_error(error: &BuildError) {
    let event = LogEvent::error(error.error_code(), error.to_string());
    eprintln!("{}", event.format_detailed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_configure() {
        let cli = Cli::try_parse_from([
            "planer",
            "-l",
            "2",
            "--source",
            "/src/planer",
            "--build",
            "/build/planer",
            "configure",
            "--config",
            "bench.toml",
        ])
        .unwrap();

        assert_eq!(cli.log_level, 2);
        assert_eq!(cli.source, Some(PathBuf::from("/src/planer")));
        assert_eq!(cli.build, Some(PathBuf::from("/build/planer")));
        assert!(matches!(
            cli.command,
            Command::Configure { config: Some(ref path) } if path == Path::new("bench.toml")
        ));
    }

    #[test]
    fn test_parse_build_targets() {
        let cli = Cli::try_parse_from(["planer", "build", "_build/firmware.hex", "--build", "/b"]).unwrap();

        assert!(matches!(cli.command, Command::Build { ref targets } if targets == &["_build/firmware.hex"]));
    }

    #[test]
    fn test_log_level_range() {
        assert!(Cli::try_parse_from(["planer", "-l", "3", "monitor"]).is_err());
    }

    #[test]
    fn test_relative_dirs_resolve_against_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(absolute(cwd, Path::new("build")), PathBuf::from("/work/build"));
        assert_eq!(absolute(cwd, Path::new("/tmp/build")), PathBuf::from("/tmp/build"));
    }
}
