//! Dependency installation.
//!
//! A single `pip install -r <manifest>` run, all or nothing. There is no
//! retry; a non-zero exit stops whatever workflow called it.

use std::path::Path;

use crate::error::{BotctlError, Result};
use crate::shell::{CommandLine, CommandOptions, CommandRunner};
use crate::ui::UserInterface;

use super::hints::find_hint;

/// Install the manifest's packages with the interpreter at `python`.
///
/// Runs in `working_dir`. Output streams to the terminal in verbose mode;
/// otherwise it is captured and shown only when the install fails.
///
/// # Errors
///
/// `FileMissing` if the manifest does not exist (pip is not invoked),
/// `CommandFailed` if pip exits non-zero or cannot be spawned.
pub fn install_dependencies(
    runner: &dyn CommandRunner,
    python: &Path,
    manifest: &Path,
    working_dir: &Path,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    if !manifest.is_file() {
        return Err(BotctlError::file_missing(
            manifest,
            "The dependency manifest must exist in the working directory.",
        ));
    }

    let command = CommandLine::new(python.display().to_string())
        .args(["-m", "pip", "install", "-r"])
        .arg(manifest.display().to_string());

    let streamed = ui.output_mode().shows_command_output();
    let options = if streamed {
        CommandOptions::inherited(Some(working_dir))
    } else {
        CommandOptions::captured(Some(working_dir))
    };

    let mut spinner = ui.start_spinner("Installing dependencies...");
    let result = match runner.run(&command, &options) {
        Ok(result) => result,
        Err(e) => {
            spinner.finish_error("Could not run pip");
            return Err(e);
        }
    };

    if result.success {
        spinner.finish_success("Dependencies installed");
        tracing::info!("Installed dependencies from {}", manifest.display());
        return Ok(());
    }

    spinner.finish_error("Dependency installation failed");
    if !streamed {
        let output = result.combined_output();
        let hint = find_hint(&output);
        ui.show_error_block(&command.to_string(), output.trim(), hint.as_deref());
    }
    result.into_checked(&command).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn project_with_manifest() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "pyrogram==2.0.106\n").unwrap();
        temp
    }

    #[test]
    fn runs_pip_against_manifest_in_working_dir() {
        let temp = project_with_manifest();
        let runner = ScriptedRunner::new();
        let manifest = temp.path().join("requirements.txt");
        let mut ui = MockUI::new();

        install_dependencies(
            &runner,
            Path::new("/usr/bin/python3"),
            &manifest,
            temp.path(),
            &mut ui,
        )
        .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with(&["/usr/bin/python3", "-m", "pip", "install", "-r"]));
        assert_eq!(calls[0].args.last().unwrap(), &manifest.display().to_string());
    }

    #[test]
    fn missing_manifest_fails_before_pip() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();

        let err = install_dependencies(
            &runner,
            Path::new("python3"),
            &temp.path().join("requirements.txt"),
            temp.path(),
            &mut MockUI::new(),
        )
        .unwrap_err();

        assert!(matches!(err, BotctlError::FileMissing { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn non_zero_exit_is_command_failed_with_error_block() {
        let temp = project_with_manifest();
        let runner = ScriptedRunner::new();
        runner.respond(
            &["python3", "-m", "pip"],
            1,
            "ERROR: No matching distribution found for pyrogram==9.9\n",
        );
        let mut ui = MockUI::new();

        let err = install_dependencies(
            &runner,
            Path::new("python3"),
            &temp.path().join("requirements.txt"),
            temp.path(),
            &mut ui,
        )
        .unwrap_err();

        assert!(matches!(err, BotctlError::CommandFailed { code: Some(1), .. }));
        let (command, output, hint) = &ui.error_blocks()[0];
        assert!(command.contains("pip install"));
        assert!(output.contains("No matching distribution"));
        assert!(hint.as_deref().unwrap().contains("pyrogram==9.9"));
    }

    #[test]
    fn verbose_mode_skips_error_block() {
        let temp = project_with_manifest();
        let runner = ScriptedRunner::new();
        runner.respond(&["python3", "-m", "pip"], 2, "");
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        let result = install_dependencies(
            &runner,
            Path::new("python3"),
            &temp.path().join("requirements.txt"),
            temp.path(),
            &mut ui,
        );

        assert!(result.is_err());
        assert!(ui.error_blocks().is_empty());
    }

    #[test]
    fn running_twice_succeeds_twice() {
        let temp = project_with_manifest();
        let runner = ScriptedRunner::new();
        let manifest = temp.path().join("requirements.txt");
        let mut ui = MockUI::new();

        for _ in 0..2 {
            install_dependencies(&runner, Path::new("python3"), &manifest, temp.path(), &mut ui)
                .unwrap();
        }

        assert_eq!(runner.calls().len(), 2);
    }
}
