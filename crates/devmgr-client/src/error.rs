//! Error types for the devmgr client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, validation, and configuration errors.
//! Errors propagate immediately to the caller; nothing in this library
//! retries or recovers locally.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for devmgr operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, missing session token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success HTTP responses the caller did not anticipate.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Server-side validation failure (HTTP 422) on a create request.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// No storage pool matched the lookup.
    #[error("no matching storage pool on system '{system_id}'{}", name_suffix(.name))]
    PoolNotFound {
        system_id: String,
        name: Option<String>,
    },

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input validation errors (invalid server URL, empty identifiers).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

fn name_suffix(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" named '{}'", name),
        None => String::new(),
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A session-mode request was issued before a successful login.
    #[error("not logged in: session-cookie mode requires a successful login first")]
    NotLoggedIn,

    /// The login endpoint rejected the credentials.
    #[error("login failed with HTTP {status}{}", message_suffix(.message))]
    LoginFailed {
        status: u16,
        message: Option<String>,
    },

    /// An authenticated request was denied (HTTP 401 or 403).
    #[error("authentication denied with HTTP {status}")]
    Denied { status: u16 },

    /// `login` was called on a basic-auth session.
    #[error("login is only available on session-cookie sessions")]
    NotSessionMode,
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

/// A non-success HTTP response with its raw status and body.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body, possibly empty.
    pub body: String,
}

impl ApiError {
    /// Drain a non-success response into an error carrying its raw body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self { status, body }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Configuration loading errors. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or misses required keys.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid server URL format.
    #[error("invalid server URL '{value}': {reason}")]
    ServerUrl { value: String, reason: String },

    /// A required identifier was empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}
