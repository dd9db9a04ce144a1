//! Working directory archiver.
//!
//! - [`exclude`] - Glob exclusions matched per path component
//! - [`compressor`] - The [`Compressor`] trait and its adapters
//!
//! Archives are named `<prefix>_<YYYY-MM-DD_HH-MM-SS>.tar.gz` and written
//! into the working directory. Earlier archives are excluded through the
//! `<prefix>_*` pattern.

pub mod compressor;
pub mod exclude;

pub use compressor::{BuiltinTarGz, Compressor, SystemTar};
pub use exclude::{glob_match, ExclusionSet};

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::ArchiveConfig;
use crate::error::{BotctlError, Result};
use crate::project::Project;
use crate::status::format_bytes;
use crate::ui::UserInterface;

/// Extension of every archive botctl writes.
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// `<prefix>_<YYYY-MM-DD_HH-MM-SS>.<ext>`, to the second.
pub fn archive_name(prefix: &str, now: &DateTime<Local>, ext: &str) -> String {
    format!("{}_{}.{}", prefix, now.format("%Y-%m-%d_%H-%M-%S"), ext)
}

/// Configured exclusions plus earlier archives.
pub fn exclusions_for(config: &ArchiveConfig) -> ExclusionSet {
    let mut patterns = config.exclude.clone();
    patterns.push(format!("{}_*", config.prefix));
    ExclusionSet::new(patterns)
}

/// Archive the project's working directory with `compressor`.
///
/// Success means the output file exists; its contents are not verified.
pub fn create_archive(
    project: &Project,
    compressor: &dyn Compressor,
    now: &DateTime<Local>,
    ui: &mut dyn UserInterface,
) -> Result<PathBuf> {
    let config = &project.config().archive;
    let output = project
        .root()
        .join(archive_name(&config.prefix, now, ARCHIVE_EXTENSION));
    let exclusions = exclusions_for(config);
    tracing::debug!(
        "Archiving {} with {}, excluding {}",
        project.root().display(),
        compressor.name(),
        exclusions.patterns().join(" ")
    );

    let mut spinner = ui.start_spinner(&format!("Archiving {}...", project.root().display()));
    if let Err(e) = compressor.compress(project.root(), &output, &exclusions) {
        spinner.finish_error("Archive failed");
        if output.exists() {
            let _ = fs::remove_file(&output);
        }
        return Err(e);
    }

    if !output.is_file() {
        spinner.finish_error("Archive failed");
        return Err(BotctlError::file_missing(
            &output,
            "The compressor exited cleanly but wrote no archive.",
        ));
    }

    let size = fs::metadata(&output)?.len();
    spinner.finish_success(&format!(
        "Created {} ({})",
        output.display(),
        format_bytes(size)
    ));
    tracing::info!("Archive written to {}", output.display());
    Ok(output)
}
