//! Authentication primitives.
//!
//! Credentials are loaded once and immutable; the session token is issued
//! by the server on login and owned by exactly one [`ApiSession`].
//!
//! [`ApiSession`]: crate::ApiSession

mod credentials;
mod token;

pub use credentials::Credentials;
pub use token::SessionToken;
