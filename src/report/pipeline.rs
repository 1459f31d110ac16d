//! Decode/encode pipeline
//!
//! ```text
//! Decode:
//!   bytes → serde_json::Value → Day { snapshots → sections → versioned scalars }
//!                                  └─ one SchemaSession per call
//!
//! Encode:
//!   Day.schema_version → UnknownSchemaPolicy → version → Value → bytes
//! ```

use crate::codec::schema::{SchemaSession, SchemaVersion, UnknownSchemaPolicy};
use crate::codec::wire::{expect_object, WireCodec};
use crate::error::{ReportError, ReportResult};
use crate::report::day::Day;
use crate::report::snapshot::Snapshot;
use crate::source::ReportFile;
use serde_json::Value;

/// Decode an export document from raw bytes
pub fn decode_document(bytes: &[u8]) -> ReportResult<Day> {
    let raw: Value = serde_json::from_slice(bytes)?;
    decode_value(raw)
}

/// Decode an export document held in a string
pub fn decode_str(json: &str) -> ReportResult<Day> {
    decode_document(json.as_bytes())
}

/// Decode a file fetched from a [`crate::source::ReportSource`]
pub fn decode_file(file: &ReportFile) -> ReportResult<Day> {
    let mut day = decode_document(&file.contents)?;
    day.provenance = Some(file.provenance.clone());
    Ok(day)
}

/// Decode an already-parsed JSON document
pub fn decode_value(raw: Value) -> ReportResult<Day> {
    let mut map = expect_object(raw, "document")?;
    let mut session = SchemaSession::new();

    let snapshots = match map.remove("snapshots") {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Snapshot::decode(item, &mut session).map_err(|e| {
                    tracing::debug!(index, error = %e, "Snapshot failed to decode");
                    e
                })
            })
            .collect::<ReportResult<Vec<_>>>()?,
        Some(other) => {
            return Err(ReportError::InvalidDocument(format!(
                "snapshots must be an array, got {}",
                other
            )))
        }
        None => {
            return Err(ReportError::InvalidDocument(
                "missing required key 'snapshots'".to_string(),
            ))
        }
    };

    let questions = map
        .remove("questions")
        .map(serde_json::from_value)
        .transpose()?;

    let schema_version = session.finish();
    tracing::debug!(
        schema = %schema_version,
        snapshots = snapshots.len(),
        "Decoded report"
    );

    Ok(Day {
        snapshots,
        questions,
        schema_version,
        provenance: None,
        extra: map,
    })
}

/// Encode in the day's own schema, treating `Unknown` as the current format
pub fn encode_document(day: &Day) -> ReportResult<Vec<u8>> {
    encode_document_with(day, UnknownSchemaPolicy::Current)
}

/// Encode in the day's own schema under an explicit policy for `Unknown`
pub fn encode_document_with(day: &Day, policy: UnknownSchemaPolicy) -> ReportResult<Vec<u8>> {
    let value = encode_value(day, policy.resolve(day.schema_version)?)?;
    Ok(serde_json::to_vec(&value)?)
}

/// Indented variant of [`encode_document_with`]
pub fn encode_document_pretty(day: &Day, policy: UnknownSchemaPolicy) -> ReportResult<Vec<u8>> {
    let value = encode_value(day, policy.resolve(day.schema_version)?)?;
    Ok(serde_json::to_vec_pretty(&value)?)
}

/// Encode a day to a JSON value in the given version's shapes
pub fn encode_value(day: &Day, version: SchemaVersion) -> ReportResult<Value> {
    let mut map = day.extra.clone();
    map.insert("snapshots".to_string(), day.snapshots.encode(version)?);
    if let Some(questions) = &day.questions {
        map.insert("questions".to_string(), serde_json::to_value(questions)?);
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::scalar::{Timestamp, Token};
    use crate::report::sections::Response;
    use serde_json::json;

    #[test]
    fn test_truncated_document() {
        let day = decode_str(r#"{"snapshots":[{"battery":0.9}]}"#).unwrap();
        assert_eq!(day.snapshot_count(), 1);
        assert_eq!(day.snapshots[0].battery, Some(0.9));
        assert_eq!(day.schema_version, SchemaVersion::Unknown);
        assert!(day.questions.is_none());
    }

    #[test]
    fn test_invalid_documents() {
        for input in ["[1,2,3]", "\"text\"", "{\"questions\":[]}", "{\"snapshots\":{}}", "{"] {
            let err = decode_str(input).unwrap_err();
            assert!(
                matches!(err, ReportError::InvalidDocument(_)),
                "{} gave {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_schema_inferred_across_snapshots() {
        let day = decode_str(
            r#"{"snapshots":[{"battery":0.5},{"date":"2015-10-23T08:14:03-0700"}]}"#,
        )
        .unwrap();
        assert_eq!(day.schema_version, SchemaVersion::V2);
    }

    #[test]
    fn test_mixed_shapes_across_snapshots_conflict() {
        let err = decode_str(
            r#"{"snapshots":[{"date":"2015-10-23T08:14:03-0700"},{"date":467270043.5}]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReportError::SchemaConflict {
                recorded: SchemaVersion::V2,
                found: SchemaVersion::V1,
            }
        );
    }

    #[test]
    fn test_sessions_do_not_leak_between_calls() {
        let v1 = decode_str(r#"{"snapshots":[{"date":411436800}]}"#).unwrap();
        let v2 = decode_str(r#"{"snapshots":[{"date":"2015-10-23T08:14:03-0700"}]}"#).unwrap();
        assert_eq!(v1.schema_version, SchemaVersion::V1);
        assert_eq!(v2.schema_version, SchemaVersion::V2);
    }

    #[test]
    fn test_programmatic_day_encodes_as_current() {
        let date = chrono::DateTime::parse_from_rfc3339("2015-10-23T08:14:03-07:00").unwrap();
        let day = Day::new(vec![Snapshot {
            date: Some(Timestamp::new(date)),
            responses: Some(vec![Response {
                tokens: Some(vec![Token::bare("Coffee")]),
                ..Default::default()
            }]),
            ..Default::default()
        }]);

        let bytes = encode_document(&day).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({"snapshots": [{
                "date": "2015-10-23T08:14:03-0700",
                "responses": [{"tokens": [{"text": "Coffee"}]}]
            }]})
        );
    }

    #[test]
    fn test_reject_policy_refuses_unknown_schema() {
        let day = Day::new(Vec::new());
        assert_eq!(
            encode_document_with(&day, UnknownSchemaPolicy::Reject),
            Err(ReportError::UnresolvedSchema)
        );
    }

    #[test]
    fn test_decoded_day_ignores_policy() {
        let day = decode_str(r#"{"snapshots":[{"date":411436800}]}"#).unwrap();
        let bytes = encode_document_with(&day, UnknownSchemaPolicy::Reject).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"snapshots": [{"date": 411436800}]}));
    }

    #[test]
    fn test_unknown_nested_keys_survive() {
        let raw = json!({"snapshots": [{
            "audio": {"avg": -50.0, "peak": -40.0, "uniqueIdentifier": "A", "newMetric": 3},
            "weather": {"tempC": 12.5, "airQuality": "good"}
        }]});
        let day = decode_value(raw.clone()).unwrap();
        assert_eq!(encode_value(&day, SchemaVersion::V2).unwrap(), raw);
    }

    #[test]
    fn test_null_versioned_field_is_absent() {
        let day = decode_str(r#"{"snapshots":[{"date":null,"battery":null,"steps":5}]}"#).unwrap();
        let snapshot = &day.snapshots[0];
        assert_eq!(snapshot.date, None);
        assert_eq!(snapshot.battery, None);
        assert_eq!(day.schema_version, SchemaVersion::Unknown);

        let value = encode_value(&day, SchemaVersion::V1).unwrap();
        assert_eq!(value, json!({"snapshots": [{"steps": 5}]}));
    }

    #[test]
    fn test_unknown_top_level_keys_survive() {
        let day = decode_str(r#"{"snapshots":[],"exportedBy":"Reporter 2.1"}"#).unwrap();
        let value = encode_value(&day, SchemaVersion::V2).unwrap();
        assert_eq!(value, json!({"snapshots": [], "exportedBy": "Reporter 2.1"}));
    }
}
