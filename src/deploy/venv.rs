//! Isolated environment for the supervised service.

use std::path::{Path, PathBuf};

use crate::error::{BotctlError, Result};
use crate::requirements::Interpreter;
use crate::shell::{execute_quiet, CommandRunner, Platform};
use crate::ui::UserInterface;

use super::hints::find_hint;

/// What [`ensure_venv`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvOutcome {
    /// The environment already had an interpreter.
    AlreadyPresent,
    /// `python -m venv` created it.
    Created,
}

/// Make sure a virtualenv exists at `venv`, returning its interpreter.
///
/// A directory whose interpreter is missing is treated as absent and
/// rebuilt in place.
pub fn ensure_venv(
    runner: &dyn CommandRunner,
    interpreter: &Interpreter,
    platform: &Platform,
    venv: &Path,
    working_dir: &Path,
    ui: &mut dyn UserInterface,
) -> Result<(PathBuf, VenvOutcome)> {
    let python = platform.venv_python(venv);
    if python.is_file() {
        tracing::debug!("Reusing virtualenv at {}", venv.display());
        return Ok((python, VenvOutcome::AlreadyPresent));
    }

    let command = interpreter.command(["-m", "venv"]).arg(venv.display().to_string());
    let mut spinner = ui.start_spinner("Creating virtualenv...");
    let result = execute_quiet(runner, &command, Some(working_dir))?;

    if !result.success {
        spinner.finish_error("Could not create virtualenv");
        let output = result.combined_output();
        ui.show_error_block(
            &command.to_string(),
            output.trim(),
            find_hint(&output).as_deref(),
        );
        return Err(BotctlError::CommandFailed {
            command: command.to_string(),
            code: result.exit_code,
        });
    }

    if !python.is_file() {
        spinner.finish_error("Virtualenv has no interpreter");
        return Err(BotctlError::file_missing(
            &python,
            "The virtualenv was created without an interpreter.",
        ));
    }

    spinner.finish_success(&format!("Created virtualenv at {}", venv.display()));
    Ok((python, VenvOutcome::Created))
}
