//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// botctl - Deploy, run and inspect a supervised Python bot.
#[derive(Debug, Parser)]
#[command(name = "botctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .botctl/config.yml)
    #[arg(short, long, global = true, env = "BOTCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bot working directory (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output, including pip output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check Python and pip, create .env from the template, install dependencies
    Install,

    /// First run: install, then start the bot in the foreground
    QuickStart,

    /// Start the bot in the foreground, or the registered service
    Start(StartArgs),

    /// Register the bot as a systemd service and start it
    Deploy,

    /// Stop the registered service
    Stop,

    /// Restart the registered service
    Restart,

    /// Stop, disable and remove the registered service
    Uninstall(UninstallArgs),

    /// Show service, host, network and working directory status
    Status,

    /// Write a timestamped backup of the working directory
    Archive,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `start` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StartArgs {
    /// Start the registered systemd unit instead of a foreground process
    #[arg(long)]
    pub supervised: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
