//! The bot's working directory and the paths inside it.

use std::path::{Path, PathBuf};

use crate::config::{load_config, BotctlConfig};
use crate::error::{BotctlError, Result};

/// A working directory plus its resolved configuration.
///
/// Every component receives a `Project` instead of reading the process's
/// current directory, so workflows can run against any directory.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: BotctlConfig,
}

impl Project {
    /// Open `root`, loading `.botctl/config.yml` (or `config_override`).
    ///
    /// # Errors
    ///
    /// `FileMissing` if `root` is not a directory, or any configuration
    /// load error.
    pub fn open(root: &Path, config_override: Option<&Path>) -> Result<Self> {
        if !root.is_dir() {
            return Err(BotctlError::file_missing(
                root,
                "Pass the bot's working directory with --project.",
            ));
        }
        let root = root.canonicalize()?;
        let config = load_config(&root, config_override)?;
        tracing::debug!("Project root: {}", root.display());
        Ok(Self { root, config })
    }

    /// Use an already-built configuration.
    pub fn with_config(root: impl Into<PathBuf>, config: BotctlConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolved configuration.
    pub fn config(&self) -> &BotctlConfig {
        &self.config
    }

    /// `.env`
    pub fn env_file(&self) -> PathBuf {
        self.root.join(&self.config.paths.env_file)
    }

    /// `env_example.txt`
    pub fn env_template(&self) -> PathBuf {
        self.root.join(&self.config.paths.env_template)
    }

    /// `requirements.txt`
    pub fn manifest(&self) -> PathBuf {
        self.root.join(&self.config.paths.manifest)
    }

    /// `main.py`
    pub fn entry_point(&self) -> PathBuf {
        self.root.join(&self.config.paths.entry_point)
    }

    /// `venv/`
    pub fn venv(&self) -> PathBuf {
        self.root.join(&self.config.paths.venv)
    }
}
