//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{login::LoginArgs, systems::SystemsArgs, volume::VolumeCommand};

/// Storage web-services API exploration tool.
#[derive(Parser, Debug)]
#[command(name = "devmgr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// JSON configuration file supplying server and credentials
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate against the API, demonstrating the two auth modes
    Login(LoginArgs),

    /// List monitored storage systems
    Systems(SystemsArgs),

    /// Volume operations
    Volume(VolumeCommand),
}
