//! Commands that run external tools against a configured build directory

use std::path::Path;

use planer_config::{log_info, log_warning};

use super::Session;
use crate::error::BuildError;

/// Install the configured Arduino core
pub fn init(session: &Session, arduino_core: bool) -> Result<(), BuildError> {
    if !arduino_core {
        log_warning!("Nothing to initialise; pass --arduino-core to install the board core");
        return Ok(());
    }

    let project = session.load_project()?;
    let invocation = session.arduino_cli().core_install(&project);
    log_info!("Installing Arduino core", "core" => project.arduino.core, "version" => project.arduino.version);

    session.executor(true).run_checked(&invocation)?;
    Ok(())
}

/// Run gup in the build directory
pub fn build(session: &Session, targets: &[String]) -> Result<(), BuildError> {
    session.load_project()?;

    let preferences = session.preferences();
    let invocation = session
        .gup()
        .build(targets, &preferences.arduino_cli)
        .current_dir(&session.dirs().top_build_dir);

    session.executor(true).run_checked(&invocation)?;
    Ok(())
}

pub fn compile(session: &Session, sketch: &Path) -> Result<(), BuildError> {
    let project = session.load_project()?;
    let dirs = session.dirs();
    let invocation = session.arduino_cli().compile(
        sketch,
        &dirs.top_build_dir,
        &dirs.libraries_dir(),
        &project,
    );

    session.executor(true).run_checked(&invocation)?;
    Ok(())
}

pub fn upload(session: &Session, input_file: &Path) -> Result<(), BuildError> {
    let project = session.load_project()?;
    let invocation = session.arduino_cli().upload(input_file, &project);

    session.executor(true).run_checked(&invocation)?;
    Ok(())
}

/// Attach to the board's serial port until the monitor exits
pub fn monitor(session: &Session) -> Result<(), BuildError> {
    let project = session.load_project()?;
    let invocation = session.arduino_cli().monitor(&project);
    log_info!("Opening serial monitor", "port" => project.arduino.port);

    session.executor(false).run_checked(&invocation)?;
    Ok(())
}
