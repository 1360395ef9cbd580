//! Storage-system listing.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ApiError, Error};
use crate::session::ApiSession;

/// Endpoint for the storage-system listing.
const STORAGE_SYSTEMS: &str = "/devmgr/v2/storage-systems";

/// A monitored storage system.
///
/// Fields beyond `id` vary by server version; unrecognized ones are kept
/// in `extra` so callers can still render the full descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSystem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wwn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ApiSession {
    /// List the storage systems monitored by the server.
    #[instrument(skip(self), fields(server = %self.server()))]
    pub async fn list_storage_systems(&self) -> Result<Vec<StorageSystem>, Error> {
        debug!("Listing storage systems");

        let response = self.get(STORAGE_SYSTEMS).await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await.into());
        }

        Ok(response.json().await?)
    }
}
