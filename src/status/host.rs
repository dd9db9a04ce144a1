//! Host resource summaries.

use std::path::PathBuf;

use sysinfo::{Disks, System};

use super::format_bytes;

/// One mounted filesystem.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskSummary {
    pub mount_point: PathBuf,
    pub total: u64,
    pub available: u64,
}

/// Point-in-time resource usage.
#[derive(Debug, Clone, PartialEq)]
pub struct HostSummary {
    pub memory_used: u64,
    pub memory_total: u64,
    pub cpu_percent: f32,
    /// 1, 5 and 15 minute load averages. All zero where unsupported.
    pub load: [f64; 3],
    pub disks: Vec<DiskSummary>,
}

impl HostSummary {
    /// Sample the current host.
    ///
    /// Blocks for the minimum CPU sampling interval.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();

        let load = System::load_average();
        let disks = Disks::new_with_refreshed_list()
            .list()
            .iter()
            .map(|d| DiskSummary {
                mount_point: d.mount_point().to_path_buf(),
                total: d.total_space(),
                available: d.available_space(),
            })
            .collect();

        Self {
            memory_used: sys.used_memory(),
            memory_total: sys.total_memory(),
            cpu_percent: sys.global_cpu_usage(),
            load: [load.one, load.five, load.fifteen],
            disks,
        }
    }

    /// Report lines, one per resource.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Memory: {} / {} ({})",
                format_bytes(self.memory_used),
                format_bytes(self.memory_total),
                percent(self.memory_used, self.memory_total)
            ),
            format!("CPU: {:.1}%", self.cpu_percent),
            format!(
                "Load: {:.2} {:.2} {:.2}",
                self.load[0], self.load[1], self.load[2]
            ),
        ];
        // Pseudo filesystems report zero size.
        for disk in self.disks.iter().filter(|d| d.total > 0) {
            let used = disk.total.saturating_sub(disk.available);
            lines.push(format!(
                "Disk {}: {} / {} ({})",
                disk.mount_point.display(),
                format_bytes(used),
                format_bytes(disk.total),
                percent(used, disk.total)
            ));
        }
        lines
    }
}

fn percent(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "n/a".to_string();
    }
    format!("{:.0}%", part as f64 * 100.0 / whole as f64)
}
