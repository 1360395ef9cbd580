//! Configuration loading.
//!
//! Configuration is an explicit struct constructed once at startup and
//! passed to whatever needs it; there is no ambient global. A missing
//! file or missing keys is a construction-time failure.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::auth::Credentials;
use crate::error::{ConfigError, Error};
use crate::types::ServerUrl;

/// Raw shape of the JSON configuration file. Extra keys are ignored.
#[derive(Debug, Deserialize)]
struct RawConfig {
    server: String,
    username: String,
    password: String,
}

/// Validated startup configuration: server endpoint plus credentials.
///
/// Loaded once per run and immutable afterwards.
pub struct Config {
    server: ServerUrl,
    username: String,
    password: String,
}

impl Config {
    /// Load and validate configuration from a JSON file.
    ///
    /// The `server` key may be a full URL or a bare `host[:port]`.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError`] when the file cannot be read, is not
    /// valid JSON, or misses a required key, and with an invalid-input
    /// error when the server value is not a usable URL.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: RawConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            server: ServerUrl::from_host_or_url(&raw.server)?,
            username: raw.username,
            password: raw.password,
        })
    }

    /// Returns the configured server endpoint.
    pub fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// Returns the configured user id.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the configured password.
    ///
    /// # Security
    ///
    /// Use this only to construct [`Credentials`]; never log or display
    /// the value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the configured credentials.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
