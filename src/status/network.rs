//! TCP connections owned by the bot.
//!
//! Reads `ss -tnp`, falling back to `netstat -tnp`. Without root both
//! tools only attribute sockets owned by the calling user.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BotctlError, Result};
use crate::shell::{execute_quiet, CommandLine, CommandRunner};

static RE_SS_PROCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"users:\(\("([^"]+)",pid=(\d+)"#).unwrap());

/// One established or listening socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub state: String,
    pub local: String,
    pub peer: String,
    pub process: String,
    pub pid: u32,
}

impl Connection {
    /// Single report line.
    pub fn line(&self) -> String {
        format!(
            "{} {} -> {} ({} pid {})",
            self.state, self.local, self.peer, self.process, self.pid
        )
    }
}

fn owned_by(process: &str, names: &[&str]) -> bool {
    names.iter().any(|name| process.starts_with(name))
}

/// Parse `ss -tnp` output, keeping sockets whose process starts with one
/// of `names`.
pub fn parse_ss(output: &str, names: &[&str]) -> Vec<Connection> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 {
                return None;
            }
            let caps = RE_SS_PROCESS.captures(line)?;
            let process = caps[1].to_string();
            if !owned_by(&process, names) {
                return None;
            }
            Some(Connection {
                state: fields[0].to_string(),
                local: fields[3].to_string(),
                peer: fields[4].to_string(),
                pid: caps[2].parse().ok()?,
                process,
            })
        })
        .collect()
}

/// Parse `netstat -tnp` output, whose last column is `pid/program`.
pub fn parse_netstat(output: &str, names: &[&str]) -> Vec<Connection> {
    output
        .lines()
        .filter(|line| line.starts_with("tcp"))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 7 {
                return None;
            }
            let (pid, process) = fields[6].split_once('/')?;
            if !owned_by(process, names) {
                return None;
            }
            Some(Connection {
                state: fields[5].to_string(),
                local: fields[3].to_string(),
                peer: fields[4].to_string(),
                pid: pid.parse().ok()?,
                process: process.to_string(),
            })
        })
        .collect()
}

/// Connections owned by a process named like one of `names`.
pub fn bot_connections(runner: &dyn CommandRunner, names: &[&str]) -> Result<Vec<Connection>> {
    let ss = CommandLine::new("ss").arg("-tnp");
    match execute_quiet(runner, &ss, None) {
        Ok(result) if result.success => return Ok(parse_ss(&result.stdout, names)),
        Ok(result) => tracing::debug!("ss exited with {:?}", result.exit_code),
        Err(e) => tracing::debug!("ss unavailable: {}", e),
    }

    let netstat = CommandLine::new("netstat").arg("-tnp");
    match execute_quiet(runner, &netstat, None) {
        Ok(result) if result.success => Ok(parse_netstat(&result.stdout, names)),
        _ => Err(BotctlError::tool_missing(
            "ss",
            "Install iproute2 (ss) or net-tools (netstat) to list connections.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;

    const SS: &str = "\
State  Recv-Q Send-Q Local Address:Port  Peer Address:Port Process
ESTAB  0      0      10.0.0.5:44322      149.154.167.220:443 users:((\"python3\",pid=1234,fd=7))
ESTAB  0      0      10.0.0.5:22         10.0.0.1:51000    users:((\"sshd\",pid=88,fd=4))
";

    const NETSTAT: &str = "\
Active Internet connections (w/o servers)
Proto Recv-Q Send-Q Local Address           Foreign Address         State       PID/Program name
tcp        0      0 10.0.0.5:44322          149.154.167.220:443     ESTABLISHED 1234/python3
tcp        0      0 10.0.0.5:22             10.0.0.1:51000          ESTABLISHED 88/sshd
";

    #[test]
    fn ss_output_is_filtered_by_process_name() {
        let conns = parse_ss(SS, &["python3", "python"]);

        assert_eq!(
            conns,
            vec![Connection {
                state: "ESTAB".to_string(),
                local: "10.0.0.5:44322".to_string(),
                peer: "149.154.167.220:443".to_string(),
                process: "python3".to_string(),
                pid: 1234,
            }]
        );
    }

    #[test]
    fn netstat_output_is_filtered_by_process_name() {
        let conns = parse_netstat(NETSTAT, &["python"]);

        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].pid, 1234);
        assert_eq!(conns[0].state, "ESTABLISHED");
    }

    #[test]
    fn falls_back_to_netstat() {
        let runner = ScriptedRunner::new();
        runner.unavailable(&["ss"]);
        runner.respond(&["netstat"], 0, NETSTAT);

        let conns = bot_connections(&runner, &["python3"]).unwrap();

        assert_eq!(conns.len(), 1);
        assert!(runner.was_run(&["netstat", "-tnp"]));
    }

    #[test]
    fn neither_tool_is_tool_missing() {
        let runner = ScriptedRunner::new();
        runner.unavailable(&["ss"]);
        runner.unavailable(&["netstat"]);

        let err = bot_connections(&runner, &["python3"]).unwrap_err();

        assert!(matches!(err, BotctlError::ToolMissing { .. }));
    }

    #[test]
    fn line_names_process_and_peer() {
        let conn = &parse_ss(SS, &["python"])[0];

        assert_eq!(
            conn.line(),
            "ESTAB 10.0.0.5:44322 -> 149.154.167.220:443 (python3 pid 1234)"
        );
    }
}
