//! devmgr - CLI tool for storage web-services API exploration.
//!
//! This is a thin wrapper over the `devmgr-client` library, intended for
//! manual exploration and debugging against a web-services proxy.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Login(args) => commands::login::run(config, args).await,
        Commands::Systems(args) => commands::systems::run(config, args).await,
        Commands::Volume(cmd) => commands::volume::handle(config, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
