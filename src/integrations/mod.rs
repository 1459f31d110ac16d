//! External Integrations
//!
//! Services a report can be enriched with after decoding:
//! - Time zone lookup for a snapshot's coordinates (Google Time Zone API)

mod timezone;

pub use timezone::{GoogleTimezoneClient, GoogleTimezoneResponse, TimezoneConfig};

use crate::report::Snapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Common trait for time zone services
#[async_trait]
pub trait TimezoneLookup: Send + Sync {
    /// Unique name for this service
    fn name(&self) -> &str;

    /// IANA time zone identifier (e.g. `America/Los_Angeles`) in effect at
    /// `at` for the given coordinates
    async fn timezone_for(
        &self,
        latitude: f64,
        longitude: f64,
        at: DateTime<Utc>,
    ) -> Result<String, IntegrationError>;
}

/// Look up the time zone a snapshot was filed in
///
/// Returns `None` when the snapshot has no location fix or no date.
pub async fn timezone_for_snapshot(
    lookup: &dyn TimezoneLookup,
    snapshot: &Snapshot,
) -> Result<Option<String>, IntegrationError> {
    let (Some((latitude, longitude)), Some(date)) = (snapshot.coordinates(), snapshot.date) else {
        return Ok(None);
    };
    let at = date.datetime().with_timezone(&Utc);
    tracing::debug!(service = lookup.name(), latitude, longitude, %at, "Looking up time zone");
    lookup.timezone_for(latitude, longitude, at).await.map(Some)
}

/// Errors that can occur during integration operations
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Service returned status {0}")]
    Status(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Not authenticated")]
    NotAuthenticated,
}
