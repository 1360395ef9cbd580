//! Storage-system listing command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use devmgr_client::ApiSession;

use crate::commands::{ConnectArgs, resolve};
use crate::output;

#[derive(Args, Debug)]
pub struct SystemsArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

pub async fn run(config: Option<&Path>, args: SystemsArgs) -> Result<()> {
    let conn = resolve(&args.connect, config)?;

    let session = ApiSession::basic_auth(conn.server, conn.credentials);
    let systems = session
        .list_storage_systems()
        .await
        .context("Failed to list storage systems")?;

    output::json_pretty(&systems)
}
