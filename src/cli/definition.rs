//! Command-line surface

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::control::{ApplyArgs, TargetArgs};
use super::status::StatusArgs;
use super::watch::WatchCommands;
use crate::config::CONFIG_DIR_ENV;

#[derive(Parser)]
#[command(name = "dmon")]
#[command(about = "Watch a list of Docker containers and start/stop them")]
#[command(version)]
pub struct Cli {
    /// Directory holding the watchlist and settings (defaults to the user config dir)
    #[arg(long, global = true, env = CONFIG_DIR_ENV, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show watched containers and whether they are running
    #[command(alias = "ls")]
    Status(StatusArgs),

    /// Start watched containers
    Start(TargetArgs),

    /// Stop watched containers
    Stop(TargetArgs),

    /// Set several containers' desired states in one pass
    Apply(ApplyArgs),

    /// View or edit the watchlist
    Watch {
        #[command(subcommand)]
        command: WatchCommands,
    },

    /// Describe this tool
    About,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
