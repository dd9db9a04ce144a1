//! Archive command implementation.
//!
//! The `botctl archive` command writes a timestamped `.tar.gz` of the
//! working directory, using the compressor named in the configuration.

use chrono::Local;

use crate::archive::{create_archive, exclusions_for, BuiltinTarGz, Compressor, SystemTar};
use crate::config::CompressorKind;
use crate::error::Result;
use crate::requirements::parse_system_path;
use crate::shell::{Platform, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectLocation};

/// The archive command implementation.
pub struct ArchiveCommand {
    location: ProjectLocation,
}

impl ArchiveCommand {
    /// Create a new archive command.
    pub fn new(location: ProjectLocation) -> Self {
        Self { location }
    }
}

impl Command for ArchiveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = self.location.open()?;
        let config = &project.config().archive;
        ui.show_header(&format!("{} - Archive", project.config().app_name));

        let runner = SystemRunner;
        let system_tar;
        let compressor: &dyn Compressor = match config.compressor {
            CompressorKind::Builtin => &BuiltinTarGz,
            CompressorKind::System => {
                system_tar =
                    SystemTar::locate(
                    &runner,
                    &parse_system_path(&Platform::detect()),
                    &exclusions_for(config),
                )?;
                &system_tar
            }
        };

        let path = create_archive(&project, compressor, &Local::now(), ui)?;
        tracing::debug!("Archive at {}", path.display());
        Ok(CommandResult::success())
    }
}
