//! Login command implementation.
//!
//! Demonstrates the two ways to authenticate with the API: an explicit
//! login that establishes a persistent server-side session (the session
//! cookie is reused on subsequent requests) or basic-auth credentials
//! attached to every request.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use devmgr_client::ApiSession;

use crate::commands::{ConnectArgs, resolve};
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Use per-request basic-auth instead of a session cookie
    #[arg(long)]
    pub basic: bool,
}

pub async fn run(config: Option<&Path>, args: LoginArgs) -> Result<()> {
    let conn = resolve(&args.connect, config)?;

    if args.basic {
        let session = ApiSession::basic_auth(conn.server.clone(), conn.credentials);

        eprintln!("{}", "Authenticating with basic credentials...".dimmed());
        let systems = session
            .list_storage_systems()
            .await
            .context("Basic-auth request failed")?;

        output::success("Authenticated with per-request basic-auth");
        println!();
        output::field("Server", conn.server.as_str());
        output::field("Systems", &systems.len().to_string());
        return Ok(());
    }

    let mut session = ApiSession::session_auth(conn.server.clone());

    eprintln!("{}", "Logging in...".dimmed());
    session
        .login(&conn.credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Server", conn.server.as_str());

    // A follow-up request on the same session rides the session cookie;
    // credentials are not resent.
    let systems = session
        .list_storage_systems()
        .await
        .context("Session reuse request failed")?;

    output::field("Systems", &systems.len().to_string());

    Ok(())
}
