//! Process launcher.
//!
//! Direct mode runs the bot as a foreground child of botctl; supervised
//! mode hands the bot to the supervisor and returns.

use std::path::Path;

use crate::error::{BotctlError, Result};
use crate::project::Project;
use crate::requirements::{EnvironmentProber, PythonVersion};
use crate::service::Supervisor;
use crate::shell::{CommandLine, CommandOptions, CommandRunner};
use crate::ui::UserInterface;

use super::installer::install_dependencies;

/// How the bot is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Foreground child process inheriting the terminal.
    Direct,
    /// Started by the service supervisor.
    Supervised,
}

/// Check the configuration file, interpreter and entry point, install
/// dependencies, then run the bot in the foreground.
///
/// Returns the bot's exit code. A missing configuration file is fatal
/// here; this path never bootstraps it.
pub fn launch_direct(
    project: &Project,
    runner: &dyn CommandRunner,
    prober: &EnvironmentProber<'_>,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let env_file = project.env_file();
    if !env_file.is_file() {
        return Err(BotctlError::file_missing(
            &env_file,
            format!(
                "Copy {} to {} and fill in your settings (or run `botctl install`).",
                display_name(&project.env_template()),
                display_name(&env_file)
            ),
        ));
    }

    let minimum: PythonVersion = project.config().python.min_version.parse()?;
    let interpreter = prober.require_interpreter(minimum)?;
    tracing::info!(
        "Using Python {} at {}",
        interpreter.version,
        interpreter.path.display()
    );

    let entry_point = project.entry_point();
    if !entry_point.is_file() {
        return Err(BotctlError::file_missing(
            &entry_point,
            "Run botctl from the bot's working directory or pass --project.",
        ));
    }

    prober.ensure_package_manager(&interpreter)?;
    install_dependencies(
        runner,
        &interpreter.path,
        &project.manifest(),
        project.root(),
        ui,
    )?;

    let command: CommandLine = interpreter.command([entry_point.display().to_string()]);
    ui.success(&format!("Starting {}", project.config().app_name));
    tracing::info!("Launching {}", command);

    let result = runner.run(&command, &CommandOptions::inherited(Some(project.root())))?;
    let code = result.exit_code.unwrap_or(1);
    if code == 0 {
        ui.message("Bot exited");
    } else {
        ui.warning(&format!("Bot exited with code {}", code));
    }
    Ok(code)
}

/// Ask the supervisor to start the registered unit.
pub fn launch_supervised(
    project: &Project,
    supervisor: &dyn Supervisor,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let name = &project.config().service.name;
    supervisor.start(name)?;
    ui.success(&format!("Started {}", name));
    ui.show_hint(&format!("Follow the logs with: journalctl -u {} -f", name));
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotctlConfig;
    use crate::service::Systemd;
    use crate::shell::{Platform, ScriptedRunner};
    use crate::ui::MockUI;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        bin: PathBuf,
        python: String,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let python = bin.join("python3");
        fs::write(&python, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
        }
        let python = python.display().to_string();
        Fixture { temp, bin, python }
    }

    fn project(root: &Path) -> Project {
        Project::with_config(root, BotctlConfig::default())
    }

    #[test]
    fn missing_env_fails_before_any_command() {
        let fx = fixture();
        fs::write(fx.temp.path().join("requirements.txt"), "").unwrap();
        let runner = ScriptedRunner::new();
        let prober =
            EnvironmentProber::new(&runner, Platform::linux()).with_path(vec![fx.bin.clone()]);

        let err = launch_direct(&project(fx.temp.path()), &runner, &prober, &mut MockUI::new())
            .unwrap_err();

        assert!(matches!(err, BotctlError::FileMissing { .. }));
        assert!(err.to_string().contains(".env"));
        assert!(runner.calls().is_empty());
        assert!(!fx.temp.path().join(".env").exists());
    }

    #[test]
    fn missing_entry_point_fails_before_install() {
        let fx = fixture();
        fs::write(fx.temp.path().join(".env"), "A=1\n").unwrap();
        fs::write(fx.temp.path().join("requirements.txt"), "").unwrap();
        let runner = ScriptedRunner::new();
        runner.respond(&[&fx.python, "--version"], 0, "Python 3.11.2");
        let prober =
            EnvironmentProber::new(&runner, Platform::linux()).with_path(vec![fx.bin.clone()]);

        let err = launch_direct(&project(fx.temp.path()), &runner, &prober, &mut MockUI::new())
            .unwrap_err();

        assert!(err.to_string().contains("main.py"));
        assert!(!runner.was_run(&[&fx.python, "-m", "pip", "install"]));
    }

    #[test]
    fn failed_install_never_starts_the_bot() {
        let fx = fixture();
        for (name, body) in [(".env", "A=1\n"), ("requirements.txt", "x\n"), ("main.py", "")] {
            fs::write(fx.temp.path().join(name), body).unwrap();
        }
        let runner = ScriptedRunner::new();
        runner.respond(&[&fx.python, "--version"], 0, "Python 3.11.2");
        runner.respond(&[&fx.python, "-m", "pip", "install"], 1, "boom");
        let prober =
            EnvironmentProber::new(&runner, Platform::linux()).with_path(vec![fx.bin.clone()]);

        let err = launch_direct(&project(fx.temp.path()), &runner, &prober, &mut MockUI::new())
            .unwrap_err();

        assert!(matches!(err, BotctlError::CommandFailed { .. }));
        let entry = fx.temp.path().join("main.py").display().to_string();
        assert!(!runner.was_run(&[&fx.python, &entry]));
    }

    #[test]
    fn bot_exit_code_is_returned() {
        let fx = fixture();
        for (name, body) in [(".env", "A=1\n"), ("requirements.txt", "x\n"), ("main.py", "")] {
            fs::write(fx.temp.path().join(name), body).unwrap();
        }
        let entry = fx.temp.path().join("main.py").display().to_string();
        let runner = ScriptedRunner::new();
        runner.respond(&[&fx.python, "--version"], 0, "Python 3.11.2");
        runner.respond(&[&fx.python, &entry], 7, "");
        let prober =
            EnvironmentProber::new(&runner, Platform::linux()).with_path(vec![fx.bin.clone()]);

        let code = launch_direct(&project(fx.temp.path()), &runner, &prober, &mut MockUI::new())
            .unwrap();

        assert_eq!(code, 7);
        let install = runner.position(&[&fx.python, "-m", "pip", "install"]).unwrap();
        let launch = runner.position(&[&fx.python, &entry]).unwrap();
        assert!(install < launch);
    }

    #[test]
    fn supervised_mode_only_asks_the_supervisor() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        let systemd = Systemd::new(&runner);
        let mut ui = MockUI::new();

        launch_supervised(&project(temp.path()), &systemd, &mut ui).unwrap();

        let calls: Vec<String> = runner.calls().iter().map(|c| c.to_string()).collect();
        assert_eq!(calls, vec!["systemctl start telegram-bot.service"]);
        assert!(ui.has_hint("journalctl -u telegram-bot"));
    }
}
