//! Storage-pool lookup and volume creation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{ApiError, Error};
use crate::session::ApiSession;
use crate::types::require_non_empty;

fn pools_path(system_id: &str) -> String {
    format!("/devmgr/v2/storage-systems/{}/storage-pools", system_id)
}

fn volumes_path(system_id: &str) -> String {
    format!("/devmgr/v2/storage-systems/{}/volumes", system_id)
}

/// A named storage-capacity grouping a volume draws space from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A provisioned volume as described by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Request body for volume creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateVolumeRequest<'a> {
    name: &'a str,
    size: &'a str,
    pool_id: &'a str,
}

/// Error body the volumes endpoint returns on a 422.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationBody {
    #[serde(default)]
    error_message: Option<String>,
}

impl ApiSession {
    /// Locate a storage pool on a system.
    ///
    /// With `name` unset the first pool in server-returned order is
    /// selected; the server's order is authoritative and no tie-break is
    /// applied. Fails with [`Error::PoolNotFound`] when the listing is
    /// empty or no pool carries the requested name.
    #[instrument(skip(self), fields(server = %self.server()))]
    pub async fn find_pool_by_name(
        &self,
        system_id: &str,
        name: Option<&str>,
    ) -> Result<Pool, Error> {
        require_non_empty("system id", system_id)?;

        debug!(system_id, ?name, "Looking up storage pool");

        let response = self.get(&pools_path(system_id)).await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await.into());
        }

        let pools: Vec<Pool> = response.json().await?;
        let pool = match name {
            None => pools.into_iter().next(),
            Some(name) => pools.into_iter().find(|pool| pool.name == name),
        };

        pool.ok_or_else(|| Error::PoolNotFound {
            system_id: system_id.to_string(),
            name: name.map(str::to_string),
        })
    }

    /// Define a new volume on a system.
    ///
    /// Resolves the pool first; a missing pool aborts before any creation
    /// request is sent. The creation POST carries `{name, size, poolId}`,
    /// with `size` forwarded to the API verbatim.
    ///
    /// # Errors
    ///
    /// - [`Error::PoolNotFound`] when no usable pool is located
    /// - [`Error::Validation`] on HTTP 422, carrying the server's
    ///   `errorMessage`
    /// - [`Error::Api`] on any other non-success status
    ///
    /// No path is retried.
    #[instrument(skip(self), fields(server = %self.server()))]
    pub async fn create_volume(
        &self,
        system_id: &str,
        name: &str,
        size: &str,
        pool_name: Option<&str>,
    ) -> Result<Volume, Error> {
        require_non_empty("volume name", name)?;

        let pool = self.find_pool_by_name(system_id, pool_name).await?;

        info!(system_id, name, pool = %pool.name, "Defining volume");

        let request = CreateVolumeRequest {
            name,
            size,
            pool_id: &pool.id,
        };

        let response = self.post(&volumes_path(system_id), &request).await?;
        let status = response.status();

        if status.is_success() {
            let volume: Volume = response.json().await?;
            info!(name = %volume.name, "Volume created");
            return Ok(volume);
        }

        if status.as_u16() == 422 {
            let message = response
                .json::<ValidationBody>()
                .await
                .unwrap_or_default()
                .error_message
                .unwrap_or_default();
            return Err(Error::Validation { message });
        }

        Err(ApiError::from_response(response).await.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_serializes_camel_case() {
        let request = CreateVolumeRequest {
            name: "vol1",
            size: "1",
            pool_id: "pool-a",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"name": "vol1", "size": "1", "poolId": "pool-a"})
        );
    }

    #[test]
    fn validation_body_reads_error_message() {
        let body: ValidationBody =
            serde_json::from_value(json!({"errorMessage": "duplicate name"})).unwrap();
        assert_eq!(body.error_message.as_deref(), Some("duplicate name"));
    }

    #[test]
    fn volume_serialization_omits_absent_fields() {
        let volume: Volume = serde_json::from_value(json!({"name": "vol1"})).unwrap();
        assert_eq!(serde_json::to_value(&volume).unwrap(), json!({"name": "vol1"}));
    }

    #[test]
    fn volume_descriptor_round_trips() {
        let body = json!({
            "id": "v-9",
            "name": "vol1",
            "poolId": "pool-a",
            "capacity": "1",
            "raidLevel": "raid5"
        });
        let volume: Volume = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&volume).unwrap(), body);
    }
}
