//! Read-only status report.
//!
//! - [`host`] - Memory, CPU, load and disk summaries via `sysinfo`
//! - [`network`] - TCP connections owned by the bot's interpreter
//! - [`workdir`] - Working directory size and listing
//! - [`reporter`] - Collects the sections and renders them

pub mod host;
pub mod network;
pub mod reporter;
pub mod workdir;

pub use host::{DiskSummary, HostSummary};
pub use network::{parse_netstat, parse_ss, Connection};
pub use reporter::{Section, StatusReport, StatusReporter};
pub use workdir::WorkdirSummary;

/// Human-readable byte count using binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sizes_are_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn larger_sizes_scale() {
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }
}
