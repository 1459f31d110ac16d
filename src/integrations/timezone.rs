//! Google Time Zone Integration
//!
//! Resolves the IANA time zone for a latitude/longitude at a given instant.
//! v1 exports carry no UTC offset, so this is the only way to place their
//! timestamps in the zone the report was actually filed in.

use super::*;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/timezone/json";

/// Google Time Zone API client
pub struct GoogleTimezoneClient {
    client: Client,
    config: TimezoneConfig,
}

/// Configuration for the time zone service
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// Lookups fail with `NotAuthenticated` until this is set
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Response body from the Time Zone API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTimezoneResponse {
    #[serde(default)]
    pub dst_offset: i64,
    #[serde(default)]
    pub raw_offset: i64,
    pub status: String,
    #[serde(rename = "timeZoneId", default)]
    pub time_zone_id: Option<String>,
    #[serde(default)]
    pub time_zone_name: Option<String>,
}

impl GoogleTimezoneResponse {
    /// Zone identifier, or the service status when it is not `OK`
    pub fn into_zone_id(self) -> Result<String, IntegrationError> {
        if self.status != "OK" {
            return Err(IntegrationError::Status(self.status));
        }
        self.time_zone_id
            .ok_or_else(|| IntegrationError::ParseError("response has no timeZoneId".into()))
    }
}

impl GoogleTimezoneClient {
    /// Create a new time zone client
    pub fn new(config: TimezoneConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Query parameters for one lookup
    fn query(&self, latitude: f64, longitude: f64, at: DateTime<Utc>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("location", format!("{:.6},{:.6}", latitude, longitude)),
            ("timestamp", at.timestamp().to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("key", key.clone()));
        }
        params
    }
}

#[async_trait]
impl TimezoneLookup for GoogleTimezoneClient {
    fn name(&self) -> &str {
        "google"
    }

    async fn timezone_for(
        &self,
        latitude: f64,
        longitude: f64,
        at: DateTime<Utc>,
    ) -> Result<String, IntegrationError> {
        if self.config.api_key.is_none() {
            return Err(IntegrationError::NotAuthenticated);
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&self.query(latitude, longitude, at))
            .send()
            .await
            .map_err(|e| IntegrationError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IntegrationError::ApiError(format!(
                "Time Zone API returned {}",
                response.status()
            )));
        }

        let body: GoogleTimezoneResponse = response
            .json()
            .await
            .map_err(|e| IntegrationError::ParseError(e.to_string()))?;

        let zone = body.into_zone_id()?;
        tracing::debug!(latitude, longitude, zone = %zone, "Resolved time zone");
        Ok(zone)
    }
}
