//! Session token type.

use std::fmt;

/// An opaque session token issued by the server on successful login.
///
/// The token establishes a persistent authenticated context on the server
/// side and is reused on subsequent requests from the same session until
/// server-side expiry. Expiry is server-enforced and not tracked here.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct SessionToken(pub(crate) String);

impl SessionToken {
    /// Create a new session token.
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in the session cookie header.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP cookie headers.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
