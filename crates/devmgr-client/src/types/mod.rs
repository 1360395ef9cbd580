//! Validated value types shared across the client.

mod server_url;

pub use server_url::ServerUrl;

use crate::error::{Error, InvalidInputError};

/// Reject empty resource identifiers before any network I/O.
///
/// Uniqueness and existence are enforced server-side; this is the only
/// local check identifiers get.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(InvalidInputError::Empty { field }.into());
    }
    Ok(())
}
