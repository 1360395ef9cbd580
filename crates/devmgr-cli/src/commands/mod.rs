//! Command implementations.

pub mod login;
pub mod systems;
pub mod volume;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use devmgr_client::{Config, Credentials, ServerUrl};

/// Connection flags shared by every command.
///
/// Flags win over the configuration file; values absent from both are a
/// startup error.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// API endpoint, either a full URL or host[:port] (http assumed)
    #[arg(long)]
    pub server: Option<String>,

    /// User id for authentication
    #[arg(long)]
    pub username: Option<String>,

    /// Password corresponding to the user id
    #[arg(long)]
    pub password: Option<String>,
}

/// A resolved connection target.
pub struct Connection {
    pub server: ServerUrl,
    pub credentials: Credentials,
}

/// Resolve server and credentials from flags and the optional config file.
pub fn resolve(args: &ConnectArgs, config_path: Option<&Path>) -> Result<Connection> {
    let config = match config_path {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            Some(config)
        }
        None => None,
    };

    let server = match (&args.server, &config) {
        (Some(server), _) => ServerUrl::from_host_or_url(server)?,
        (None, Some(config)) => config.server().clone(),
        (None, None) => bail!("no server specified; pass --server or --config"),
    };

    let username = match (&args.username, &config) {
        (Some(username), _) => username.clone(),
        (None, Some(config)) => config.username().to_string(),
        (None, None) => bail!("no username specified; pass --username or --config"),
    };

    let password = match (&args.password, &config) {
        (Some(password), _) => password.clone(),
        (None, Some(config)) => config.password().to_string(),
        (None, None) => bail!("no password specified; pass --password or --config"),
    };

    Ok(Connection {
        server,
        credentials: Credentials::new(username, password),
    })
}
