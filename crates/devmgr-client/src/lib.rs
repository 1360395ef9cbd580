//! devmgr-client - Storage Web-Services API Client
//!
//! This library provides a small client for a storage-management REST API
//! with a session-centric design: all operations flow through an
//! [`ApiSession`], which authenticates either with an explicit login that
//! yields a reusable session cookie, or with basic-auth credentials
//! attached to every request. The mode is fixed at construction.
//!
//! # Example
//!
//! ```no_run
//! use devmgr_client::{ApiSession, Credentials, ServerUrl};
//!
//! # async fn example() -> Result<(), devmgr_client::Error> {
//! let server = ServerUrl::new("https://array.example.com:8443")?;
//! let mut session = ApiSession::session_auth(server);
//! session.login(&Credentials::new("rw", "rw-password")).await?;
//!
//! let volume = session.create_volume("1", "vol1", "1", None).await?;
//! println!("created {}", volume.name);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod systems;
pub mod types;
pub mod volumes;

// Re-export primary types at crate root for convenience
pub use auth::Credentials;
pub use config::Config;
pub use error::Error;
pub use session::ApiSession;
pub use systems::StorageSystem;
pub use types::ServerUrl;
pub use volumes::{Pool, Volume};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
