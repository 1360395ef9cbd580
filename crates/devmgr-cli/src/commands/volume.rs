//! Volume subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use devmgr_client::ApiSession;

use crate::commands::{ConnectArgs, resolve};
use crate::output;

#[derive(Args, Debug)]
pub struct VolumeCommand {
    #[command(subcommand)]
    pub command: VolumeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VolumeSubcommand {
    /// Define a new volume on a storage system
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// The unique name of the volume to define
    pub name: String,

    /// The storage-system identifier
    #[arg(long, default_value = "1")]
    pub system: String,

    /// Pool to define the volume on; defaults to the first pool listed
    #[arg(long)]
    pub pool: Option<String>,

    /// Volume size, passed through to the API verbatim
    #[arg(long, default_value = "1")]
    pub size: String,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

pub async fn handle(config: Option<&Path>, cmd: VolumeCommand) -> Result<()> {
    match cmd.command {
        VolumeSubcommand::Create(args) => create(config, args).await,
    }
}

async fn create(config: Option<&Path>, args: CreateArgs) -> Result<()> {
    let conn = resolve(&args.connect, config)?;

    let session = ApiSession::basic_auth(conn.server, conn.credentials);
    let volume = session
        .create_volume(&args.system, &args.name, &args.size, args.pool.as_deref())
        .await
        .context("Failed to create volume")?;

    output::success(&format!("Volume '{}' created", volume.name));
    output::json_pretty(&volume)
}
