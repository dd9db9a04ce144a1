//! Compressor adapters.
//!
//! [`BuiltinTarGz`] writes the archive in-process and is always available.
//! [`SystemTar`] shells out to the host's `tar` for operators who prefer it.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use walkdir::WalkDir;

use crate::error::{BotctlError, Result};
use crate::requirements::resolve_tool_path;
use crate::shell::{execute_quiet, CommandLine, CommandRunner};

use super::exclude::ExclusionSet;

/// Writes a compressed archive of a directory tree.
pub trait Compressor {
    /// Short name for messages.
    fn name(&self) -> &str;

    /// Archive `root` into `output`, skipping excluded paths.
    ///
    /// Entries are stored relative to `root`.
    fn compress(&self, root: &Path, output: &Path, exclusions: &ExclusionSet) -> Result<()>;
}

/// In-process gzip-compressed tar writer.
#[derive(Debug, Default)]
pub struct BuiltinTarGz;

impl Compressor for BuiltinTarGz {
    fn name(&self) -> &str {
        "builtin tar.gz"
    }

    fn compress(&self, root: &Path, output: &Path, exclusions: &ExclusionSet) -> Result<()> {
        let encoder = GzEncoder::new(File::create(output)?, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.follow_symlinks(false);

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| {
                let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
                !exclusions.is_excluded(rel) && entry.path() != output
            });

        for entry in walker {
            let entry = entry.map_err(|e| BotctlError::Other(anyhow::anyhow!(e)))?;
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if entry.file_type().is_dir() {
                builder.append_dir(rel, entry.path())?;
            } else {
                builder.append_path_with_name(entry.path(), rel)?;
            }
            tracing::debug!("archived {}", rel.display());
        }

        builder.into_inner()?.finish()?;
        Ok(())
    }
}

/// The host's `tar` binary.
pub struct SystemTar<'a> {
    runner: &'a dyn CommandRunner,
    program: PathBuf,
}

impl<'a> SystemTar<'a> {
    /// Find `tar` on `path_entries`.
    ///
    /// The error hint lists the exclusions so the operator can build the
    /// archive by hand.
    pub fn locate(
        runner: &'a dyn CommandRunner,
        path_entries: &[PathBuf],
        exclusions: &ExclusionSet,
    ) -> Result<Self> {
        match resolve_tool_path("tar", path_entries) {
            Some(program) => Ok(Self { runner, program }),
            None => Err(BotctlError::tool_missing(
                "tar",
                format!(
                    "Install tar or set archive.compressor to builtin. To archive by hand, exclude: {}",
                    exclusions.patterns().join(", ")
                ),
            )),
        }
    }

    /// The command that archives `root` into `output`.
    pub fn command(&self, root: &Path, output: &Path, exclusions: &ExclusionSet) -> CommandLine {
        let mut cmd = CommandLine::new(self.program.display().to_string())
            .arg("-czf")
            .arg(output.display().to_string());
        // tar sees the archive being written; keep it out.
        if let Some(name) = output.file_name() {
            cmd = cmd.arg(format!("--exclude=./{}", name.to_string_lossy()));
        }
        cmd.args(exclusions.patterns().iter().map(|p| format!("--exclude={}", p)))
            .arg("-C")
            .arg(root.display().to_string())
            .arg(".")
    }
}

impl Compressor for SystemTar<'_> {
    fn name(&self) -> &str {
        "tar"
    }

    fn compress(&self, root: &Path, output: &Path, exclusions: &ExclusionSet) -> Result<()> {
        let command = self.command(root, output, exclusions);
        tracing::debug!("Compressing with {}", command);
        execute_quiet(self.runner, &command, Some(root))?.into_checked(&command)?;
        Ok(())
    }
}
