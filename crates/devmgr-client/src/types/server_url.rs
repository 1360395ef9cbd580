//! Server URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for a storage web-services endpoint.
///
/// This type ensures the URL is absolute, uses http or https, has a host,
/// and is normalized for endpoint path construction. Plain http is allowed
/// since management proxies are commonly reached over it on private
/// networks.
///
/// # Example
///
/// ```
/// use devmgr_client::ServerUrl;
///
/// let server = ServerUrl::new("https://array.example.com:8443").unwrap();
/// assert_eq!(server.endpoint("/devmgr/v2/storage-systems"),
///            "https://array.example.com:8443/devmgr/v2/storage-systems");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServerUrl {
    url: Url,
    normalized: String,
}

impl ServerUrl {
    /// Create a new server URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServerUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // The url crate forces a "/" path onto http/https URLs, so the
        // slash-free form has to be kept as a separate string.
        let normalized = if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
            url.as_str().trim_end_matches('/').to_string()
        } else {
            url.as_str().to_string()
        };

        Ok(Self { url, normalized })
    }

    /// Accept either a full URL or a bare `host[:port]`.
    ///
    /// Configuration files commonly carry just the host; those get an
    /// `http://` scheme, matching how the API proxy is usually addressed.
    pub fn from_host_or_url(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        if s.contains("://") {
            Self::new(s)
        } else {
            Self::new(format!("http://{}", s))
        }
    }

    /// Returns the full URL for an endpoint path such as
    /// `/devmgr/v2/storage-systems`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.normalized.trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the base URL as a string, without a trailing root slash.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        // Must have a host
        if url.host_str().is_none() {
            return Err(InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl FromStr for ServerUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServerUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> Deserialize<'de> for ServerUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServerUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServerUrl {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}
