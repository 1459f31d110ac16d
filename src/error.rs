//! Report error types
//!
//! Defines all errors that can occur while decoding, encoding, or deriving
//! values from a daily export. Every decode error is terminal for the
//! document being decoded.

use crate::codec::schema::SchemaVersion;
use thiserror::Error;

/// Errors that can occur in the codec and document layers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Timestamp was neither an ISO 8601 string nor a seconds offset
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Token was neither a `{text}` object nor a bare string
    #[error("Malformed phrase: {0}")]
    MalformedPhrase(String),

    /// Placemark region string could not be tokenized
    #[error("Malformed region: {0}")]
    MalformedRegion(String),

    /// Coded field (connection, report impetus) held an unexpected value
    #[error("Malformed field '{field}': {reason}")]
    MalformedField { field: &'static str, reason: String },

    /// Top-level document is not a JSON object or lacks `snapshots`
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Two versioned fields in the same document disagree on the schema
    #[error("Schema conflict: document already decoded as {recorded}, found a {found} field")]
    SchemaConflict {
        recorded: SchemaVersion,
        found: SchemaVersion,
    },

    /// A derived metric was requested against an absent raw reading
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// Encoding was asked to reject documents of unknown schema
    #[error("Schema version is unknown and no default was allowed")]
    UnresolvedSchema,
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::InvalidDocument(err.to_string())
    }
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
