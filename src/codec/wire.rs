//! Codec trait and JSON object plumbing
//!
//! Anything whose wire shape can depend on the schema version implements
//! [`WireCodec`]. Structs that mix plain fields with versioned ones derive
//! serde for the plain part and move the versioned keys through
//! [`take_field`] / [`put_field`].

use crate::codec::schema::{SchemaSession, SchemaVersion};
use crate::error::{ReportError, ReportResult};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// A value decoded from, and encoded back to, an untyped JSON value
pub trait WireCodec: Sized {
    /// Decode a raw value, recording any schema inference in `session`
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self>;

    /// Encode in the exact shape used by `version`
    fn encode(&self, version: SchemaVersion) -> ReportResult<Value>;
}

impl<T: WireCodec> WireCodec for Vec<T> {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        match raw {
            Value::Array(items) => items
                .into_iter()
                .map(|item| T::decode(item, session))
                .collect(),
            other => Err(ReportError::InvalidDocument(format!(
                "expected an array, got {}",
                other
            ))),
        }
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        self.iter()
            .map(|item| item.encode(version))
            .collect::<ReportResult<Vec<_>>>()
            .map(Value::Array)
    }
}

/// Unwrap a JSON object, naming `what` on failure
pub fn expect_object(raw: Value, what: &str) -> ReportResult<Map<String, Value>> {
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(ReportError::InvalidDocument(format!(
            "{} must be a JSON object, got {}",
            what, other
        ))),
    }
}

/// Remove `key` from `map` and decode it if present
///
/// An explicit `null` counts as absent, the same as for plain `Option` fields.
pub fn take_field<T: WireCodec>(
    map: &mut Map<String, Value>,
    key: &str,
    session: &mut SchemaSession,
) -> ReportResult<Option<T>> {
    map.remove(key)
        .filter(|raw| !raw.is_null())
        .map(|raw| T::decode(raw, session))
        .transpose()
}

/// Insert the encoded form of `value` under `key`; absent values stay absent
pub fn put_field<T: WireCodec>(
    map: &mut Map<String, Value>,
    key: &str,
    value: Option<&T>,
    version: SchemaVersion,
) -> ReportResult<()> {
    if let Some(value) = value {
        map.insert(key.to_string(), value.encode(version)?);
    }
    Ok(())
}

/// Deserialize the remaining plain keys of an object
pub fn from_plain<T: DeserializeOwned>(map: Map<String, Value>) -> ReportResult<T> {
    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Serialize the plain part of a struct into an object
pub fn to_plain<T: Serialize>(value: &T, what: &str) -> ReportResult<Map<String, Value>> {
    expect_object(serde_json::to_value(value)?, what)
}
