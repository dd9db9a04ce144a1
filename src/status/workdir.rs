//! Working directory size and listing.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{BotctlError, Result};

use super::format_bytes;

/// Size and top-level contents of the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkdirSummary {
    pub total_bytes: u64,
    pub file_count: usize,
    /// Sorted top-level names, directories suffixed with `/`.
    pub entries: Vec<String>,
    /// Entries left out of `entries` by the listing limit.
    pub remaining: usize,
}

impl WorkdirSummary {
    /// Walk `root` without following symlinks. Unreadable entries are skipped.
    pub fn collect(root: &Path, limit: usize) -> Result<Self> {
        if !root.is_dir() {
            return Err(BotctlError::file_missing(
                root,
                "Pass the bot's working directory with --project.",
            ));
        }
        let mut total_bytes = 0;
        let mut file_count = 0;
        for entry in WalkDir::new(root).follow_links(false).into_iter().flatten() {
            if entry.file_type().is_file() {
                file_count += 1;
                total_bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }

        let mut entries: Vec<String> = fs::read_dir(root)?
            .flatten()
            .map(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                match e.file_type() {
                    Ok(t) if t.is_dir() => format!("{}/", name),
                    _ => name,
                }
            })
            .collect();
        entries.sort();
        let remaining = entries.len().saturating_sub(limit);
        entries.truncate(limit);

        Ok(Self {
            total_bytes,
            file_count,
            entries,
            remaining,
        })
    }

    /// Report lines: the total, then the listing.
    pub fn lines(&self, root: &Path) -> Vec<String> {
        let mut lines = vec![format!(
            "{}: {} in {} files",
            root.display(),
            format_bytes(self.total_bytes),
            self.file_count
        )];
        lines.extend(self.entries.iter().map(|e| format!("  {}", e)));
        if self.remaining > 0 {
            lines.push(format!("  ... and {} more", self.remaining));
        }
        lines
    }
}
