//! Service supervisor adapter.
//!
//! Registration and lifecycle commands talk to the supervisor through the
//! [`Supervisor`] trait. [`Systemd`] drives `systemctl` and `journalctl`
//! through a [`CommandRunner`], so tests can pair it with a scripted runner.

use crate::error::Result;
use crate::shell::{execute_quiet, CommandLine, CommandRunner};

use super::unit::unit_file_name;

/// Operations on a supervised unit.
///
/// Every call returns once the supervisor has accepted the request; none
/// of them wait for the unit to reach a state.
pub trait Supervisor {
    /// Re-read unit files.
    fn daemon_reload(&self) -> Result<()>;

    /// Start the unit at boot.
    fn enable(&self, unit: &str) -> Result<()>;

    /// Stop starting the unit at boot.
    fn disable(&self, unit: &str) -> Result<()>;

    /// Start the unit now.
    fn start(&self, unit: &str) -> Result<()>;

    /// Stop the unit now.
    fn stop(&self, unit: &str) -> Result<()>;

    /// Restart the unit.
    fn restart(&self, unit: &str) -> Result<()>;

    /// Human-readable status; never fails because the unit is down.
    fn status(&self, unit: &str) -> Result<String>;

    /// `active`, `inactive`, `failed`, ...
    fn active_state(&self, unit: &str) -> Result<String>;

    /// Last `lines` journal lines for the unit.
    fn journal_tail(&self, unit: &str, lines: usize) -> Result<String>;
}

/// [`Supervisor`] backed by systemd.
pub struct Systemd<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Systemd<'a> {
    /// Drive systemd through `runner`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn systemctl(&self, verb: &str, unit: Option<&str>) -> CommandLine {
        let cmd = CommandLine::new("systemctl").arg(verb);
        match unit {
            Some(unit) => cmd.arg(unit_file_name(unit)),
            None => cmd,
        }
    }

    fn checked(&self, command: CommandLine) -> Result<()> {
        tracing::debug!("Supervisor: {}", command);
        execute_quiet(self.runner, &command, None)?.into_checked(&command)?;
        Ok(())
    }
}

impl Supervisor for Systemd<'_> {
    fn daemon_reload(&self) -> Result<()> {
        self.checked(self.systemctl("daemon-reload", None))
    }

    fn enable(&self, unit: &str) -> Result<()> {
        self.checked(self.systemctl("enable", Some(unit)))
    }

    fn disable(&self, unit: &str) -> Result<()> {
        self.checked(self.systemctl("disable", Some(unit)))
    }

    fn start(&self, unit: &str) -> Result<()> {
        self.checked(self.systemctl("start", Some(unit)))
    }

    fn stop(&self, unit: &str) -> Result<()> {
        self.checked(self.systemctl("stop", Some(unit)))
    }

    fn restart(&self, unit: &str) -> Result<()> {
        self.checked(self.systemctl("restart", Some(unit)))
    }

    fn status(&self, unit: &str) -> Result<String> {
        // Exits 3 for a stopped unit; the text is still what we want.
        let command = self.systemctl("status", Some(unit)).arg("--no-pager");
        let result = execute_quiet(self.runner, &command, None)?;
        Ok(result.combined_output().trim_end().to_string())
    }

    fn active_state(&self, unit: &str) -> Result<String> {
        let command = self.systemctl("is-active", Some(unit));
        let result = execute_quiet(self.runner, &command, None)?;
        let state = result.stdout.trim();
        if state.is_empty() {
            Ok("unknown".to_string())
        } else {
            Ok(state.to_string())
        }
    }

    fn journal_tail(&self, unit: &str, lines: usize) -> Result<String> {
        let command = CommandLine::new("journalctl")
            .arg("-u")
            .arg(unit_file_name(unit))
            .arg("-n")
            .arg(lines.to_string())
            .arg("--no-pager");
        let result = execute_quiet(self.runner, &command, None)?.into_checked(&command)?;
        Ok(result.stdout.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotctlError;
    use crate::shell::ScriptedRunner;

    #[test]
    fn lifecycle_verbs_map_to_systemctl() {
        let runner = ScriptedRunner::new();
        let systemd = Systemd::new(&runner);

        systemd.daemon_reload().unwrap();
        systemd.enable("telegram-bot").unwrap();
        systemd.start("telegram-bot").unwrap();
        systemd.stop("telegram-bot").unwrap();
        systemd.restart("telegram-bot").unwrap();
        systemd.disable("telegram-bot").unwrap();

        let calls: Vec<String> = runner.calls().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            calls,
            vec![
                "systemctl daemon-reload",
                "systemctl enable telegram-bot.service",
                "systemctl start telegram-bot.service",
                "systemctl stop telegram-bot.service",
                "systemctl restart telegram-bot.service",
                "systemctl disable telegram-bot.service",
            ]
        );
    }

    #[test]
    fn failing_verb_is_command_failed() {
        let runner = ScriptedRunner::new();
        runner.respond(&["systemctl", "start"], 5, "");

        let err = Systemd::new(&runner).start("telegram-bot").unwrap_err();

        assert!(matches!(err, BotctlError::CommandFailed { code: Some(5), .. }));
    }

    #[test]
    fn status_of_stopped_unit_is_not_an_error() {
        let runner = ScriptedRunner::new();
        runner.respond(&["systemctl", "status"], 3, "○ telegram-bot.service\n   Active: inactive (dead)\n");

        let text = Systemd::new(&runner).status("telegram-bot").unwrap();

        assert!(text.contains("inactive"));
    }

    #[test]
    fn active_state_reads_stdout_regardless_of_exit_code() {
        let runner = ScriptedRunner::new();
        runner.respond(&["systemctl", "is-active"], 3, "inactive\n");

        let state = Systemd::new(&runner).active_state("telegram-bot").unwrap();

        assert_eq!(state, "inactive");
    }

    #[test]
    fn journal_tail_requests_line_count() {
        let runner = ScriptedRunner::new();
        runner.respond(&["journalctl"], 0, "line 1\nline 2\n");

        let text = Systemd::new(&runner).journal_tail("telegram-bot", 10).unwrap();

        assert_eq!(text, "line 1\nline 2");
        assert!(runner.was_run(&[
            "journalctl",
            "-u",
            "telegram-bot.service",
            "-n",
            "10",
            "--no-pager"
        ]));
    }

    #[test]
    fn missing_systemctl_propagates() {
        let runner = ScriptedRunner::new();
        runner.unavailable(&["systemctl"]);

        assert!(Systemd::new(&runner).daemon_reload().is_err());
    }
}
