//! Versioned scalar codecs
//!
//! The four leaf field types whose wire shape needs interpretation:
//!
//! - [`Timestamp`]: seconds since 2001-01-01 UTC (v1) or ISO 8601 text (v2)
//! - [`Token`]: bare string (v1) or `{uniqueIdentifier, text}` object (v2)
//! - [`Connection`]: integer network code, same in both versions
//! - [`Region`]: CLRegion description string, same in both versions
//!
//! Decoding tries each shape in a fixed order and records the version of the
//! first shape that parses. Encoding reproduces the shape of the version it
//! is given.

use crate::codec::schema::{SchemaSession, SchemaVersion};
use crate::codec::wire::WireCodec;
use crate::error::{ReportError, ReportResult};
use chrono::{DateTime, FixedOffset, Local, TimeDelta, Utc};
use serde_json::{Map, Value};

/// Unix time of 2001-01-01T00:00:00Z, the NSDate reference date
pub const APPLE_EPOCH_UNIX: i64 = 978_307_200;

/// chrono format for v2 timestamps, e.g. `2015-10-23T08:14:03-0700`
pub const ISO8601: &str = "%Y-%m-%dT%H:%M:%S%z";

/// chrono's `%z` also accepts `-07:00`, which would not re-encode as written
fn has_compact_offset(text: &str) -> bool {
    match text.as_bytes() {
        [.., sign, h1, h2, m1, m2] => {
            matches!(*sign, b'+' | b'-')
                && [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

fn apple_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(APPLE_EPOCH_UNIX, 0).unwrap_or_default()
}

// ============================================================================
// Timestamp
// ============================================================================

/// An absolute point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }

    /// Build from a v1 seconds offset, expressed in local civil time
    pub fn from_apple_seconds(seconds: f64) -> ReportResult<Self> {
        if !seconds.is_finite() {
            return Err(ReportError::MalformedTimestamp(seconds.to_string()));
        }

        // Split first so the nanosecond scaling never exceeds f64 precision
        let whole = seconds.trunc();
        let nanos = ((seconds - whole) * 1e9).round() as i64;

        let instant = TimeDelta::try_seconds(whole as i64)
            .map(|delta| delta + TimeDelta::nanoseconds(nanos))
            .and_then(|delta| apple_epoch().checked_add_signed(delta))
            .ok_or_else(|| ReportError::MalformedTimestamp(seconds.to_string()))?;

        Ok(Self(instant.with_timezone(&Local).fixed_offset()))
    }

    /// Seconds relative to 2001-01-01T00:00:00Z
    pub fn apple_seconds(&self) -> f64 {
        let delta = self.offset_from_epoch();
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// ISO 8601 text with numeric offset
    pub fn to_iso8601(&self) -> String {
        self.0.format(ISO8601).to_string()
    }

    fn offset_from_epoch(&self) -> TimeDelta {
        self.0.with_timezone(&Utc).signed_duration_since(apple_epoch())
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso8601())
    }
}

impl WireCodec for Timestamp {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        match raw {
            Value::String(text) => {
                if !has_compact_offset(&text) {
                    return Err(ReportError::MalformedTimestamp(format!(
                        "{:?}: offset must be written as +HHMM",
                        text
                    )));
                }
                let parsed = DateTime::parse_from_str(&text, ISO8601).map_err(|e| {
                    ReportError::MalformedTimestamp(format!("{:?}: {}", text, e))
                })?;
                session.record(SchemaVersion::V2)?;
                Ok(Self(parsed))
            }
            Value::Number(number) => {
                let seconds = number
                    .as_f64()
                    .ok_or_else(|| ReportError::MalformedTimestamp(number.to_string()))?;
                let timestamp = Self::from_apple_seconds(seconds)?;
                session.record(SchemaVersion::V1)?;
                Ok(timestamp)
            }
            other => Err(ReportError::MalformedTimestamp(other.to_string())),
        }
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        Ok(match version {
            SchemaVersion::V1 => {
                let delta = self.offset_from_epoch();
                if delta.subsec_nanos() == 0 {
                    // Whole seconds are written without a fraction by the app
                    Value::from(delta.num_seconds())
                } else {
                    Value::from(self.apple_seconds())
                }
            }
            _ => Value::String(self.to_iso8601()),
        })
    }
}

// ============================================================================
// Token
// ============================================================================

/// A short word or phrase the user picked as a response
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Only carried by v2 documents
    pub id: Option<String>,
    pub text: String,
}

impl Token {
    /// New token with a fresh upper-case UUID, as the app assigns
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string().to_uppercase()),
            text: text.into(),
        }
    }

    /// Token without an identifier
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl WireCodec for Token {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        match raw {
            Value::Object(mut map) => {
                let text = match map.remove("text") {
                    Some(Value::String(text)) => text,
                    _ => return Err(ReportError::MalformedPhrase(Value::Object(map).to_string())),
                };
                let id = match map.remove("uniqueIdentifier") {
                    None => None,
                    Some(Value::String(id)) => Some(id),
                    Some(other) => {
                        return Err(ReportError::MalformedPhrase(format!(
                            "uniqueIdentifier must be a string, got {}",
                            other
                        )))
                    }
                };
                session.record(SchemaVersion::V2)?;
                Ok(Self { id, text })
            }
            Value::String(text) => {
                session.record(SchemaVersion::V1)?;
                Ok(Self { id: None, text })
            }
            other => Err(ReportError::MalformedPhrase(other.to_string())),
        }
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        Ok(match version {
            SchemaVersion::V1 => Value::String(self.text.clone()),
            _ => {
                let mut map = Map::new();
                if let Some(id) = &self.id {
                    map.insert("uniqueIdentifier".to_string(), Value::String(id.clone()));
                }
                map.insert("text".to_string(), Value::String(self.text.clone()));
                Value::Object(map)
            }
        })
    }
}

// ============================================================================
// Connection
// ============================================================================

/// Network connection of the device when the report was filed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connection {
    /// Code 0
    Cellular,
    /// Code 1
    WiFi,
    /// Code 2
    NotConnected,
    /// Any code the app may add later
    Other(i64),
}

impl Connection {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Connection::Cellular,
            1 => Connection::WiFi,
            2 => Connection::NotConnected,
            other => Connection::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Connection::Cellular => 0,
            Connection::WiFi => 1,
            Connection::NotConnected => 2,
            Connection::Other(code) => *code,
        }
    }

    /// Short label; empty for unrecognised codes
    pub fn method(&self) -> &'static str {
        match self {
            Connection::Cellular => "Cellular",
            Connection::WiFi => "Wi-Fi",
            Connection::NotConnected => "Not connected",
            Connection::Other(_) => "",
        }
    }

    /// Sentence description; empty for unrecognised codes
    pub fn description(&self) -> &'static str {
        match self {
            Connection::Cellular => "Device is connected via cellular network",
            Connection::WiFi => "Device is connected via WiFi",
            Connection::NotConnected => "Device is not connected",
            Connection::Other(_) => "",
        }
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.method())
    }
}

impl WireCodec for Connection {
    fn decode(raw: Value, _session: &mut SchemaSession) -> ReportResult<Self> {
        raw.as_i64()
            .map(Self::from_code)
            .ok_or_else(|| ReportError::MalformedField {
                field: "connection",
                reason: format!("expected an integer code, got {}", raw),
            })
    }

    fn encode(&self, _version: SchemaVersion) -> ReportResult<Value> {
        Ok(Value::from(self.code()))
    }
}

// ============================================================================
// Region
// ============================================================================

/// A circular geofence parsed from a CLRegion description such as
/// `<+37.33169000,-122.03073200> radius 100.00m identifier:"Home"`
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    /// The description text exactly as it appeared on the wire
    pub identifier: String,
}

impl Region {
    /// Compose a region in the app's description format
    pub fn new(latitude: f64, longitude: f64, radius: f64, name: &str) -> Self {
        Self {
            latitude,
            longitude,
            radius,
            identifier: format!(
                "<{:+.8},{:+.8}> radius {:.2}m identifier:\"{}\"",
                latitude, longitude, radius, name
            ),
        }
    }

    /// Tokenize a description string
    ///
    /// Field 0 is latitude, field 1 longitude, field 3 radius. Field 2 is the
    /// `radius` keyword (or whatever word the OS version printed there) and is
    /// skipped by position.
    pub fn parse(text: &str) -> ReportResult<Self> {
        let cleaned: String = text
            .chars()
            .filter(|c| !matches!(c, '<' | '>'))
            .map(|c| if matches!(c, ',' | '+') { ' ' } else { c })
            .collect();
        let fields: Vec<&str> = cleaned.split_whitespace().collect();

        if fields.len() < 4 {
            return Err(ReportError::MalformedRegion(format!(
                "{:?}: expected at least 4 fields, found {}",
                text,
                fields.len()
            )));
        }

        let number = |field: &str, name: &str| -> ReportResult<f64> {
            field.parse::<f64>().map_err(|e| {
                ReportError::MalformedRegion(format!("{:?}: bad {} {:?}: {}", text, name, field, e))
            })
        };

        Ok(Self {
            latitude: number(fields[0], "latitude")?,
            longitude: number(fields[1], "longitude")?,
            radius: number(fields[3].trim_end_matches('m'), "radius")?,
            identifier: text.to_string(),
        })
    }

    /// The name following `identifier:`, without quotes
    pub fn label(&self) -> Option<&str> {
        let (_, rest) = self.identifier.split_once("identifier:")?;
        let label = rest.trim().trim_matches(|c| c == '"' || c == '\'');
        (!label.is_empty()).then_some(label)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

impl WireCodec for Region {
    fn decode(raw: Value, _session: &mut SchemaSession) -> ReportResult<Self> {
        match raw {
            Value::String(text) => Self::parse(&text),
            other => Err(ReportError::MalformedRegion(other.to_string())),
        }
    }

    fn encode(&self, _version: SchemaVersion) -> ReportResult<Value> {
        Ok(Value::String(self.identifier.clone()))
    }
}
