use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{error::Error, model::Coordinates};

use super::{LocationProvider, PermissionStatus};

const DEFAULT_BASE_URL: &str = "http://ip-api.com/json";

/// Geolocation from the machine's public IP via ip-api.com.
///
/// Coarse (city-level at best) but needs no OS permission, so
/// `request_permission` always grants.
#[derive(Debug, Clone)]
pub struct IpLocator {
    base_url: String,
    http: Client,
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpLocator {
    pub fn new() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the locator at a different host (integration tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl LocationProvider for IpLocator {
    async fn request_permission(&self) -> Result<PermissionStatus, Error> {
        // Nothing OS-level to ask for an IP lookup.
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> Result<Coordinates, Error> {
        let res = self.http.get(&self.base_url).send().await.map_err(|e| {
            Error::network(format!("Failed to send request to ip-api.com: {e}"))
        })?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "ip-api.com request failed with status {status}"
            )));
        }

        let parsed: IpApiResponse = res
            .json()
            .await
            .map_err(|e| Error::network(format!("Failed to parse ip-api.com JSON: {e}")))?;

        if parsed.status != "success" {
            return Err(Error::network(format!(
                "ip-api.com lookup failed: {}",
                parsed.message.unwrap_or_else(|| "unknown reason".to_string())
            )));
        }

        match (parsed.lat, parsed.lon) {
            (Some(latitude), Some(longitude)) => {
                debug!(latitude, longitude, "resolved position from public IP");
                Ok(Coordinates { latitude, longitude })
            }
            _ => Err(Error::network("ip-api.com response contained no coordinates")),
        }
    }
}
