//! A single report within a day

use crate::codec::scalar::{Connection, Timestamp};
use crate::codec::schema::{SchemaSession, SchemaVersion};
use crate::codec::wire::{expect_object, from_plain, put_field, take_field, to_plain, WireCodec};
use crate::error::ReportResult;
use crate::report::sections::{
    Altitude, Audio, Location, PhotoSet, ReportImpetus, Response, Weather,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One point-in-time report
///
/// Sections are `None` when their key was absent from the export. v2 no
/// longer writes `dwellStatus` or `sync`, so those stay `None` for v2 input
/// and are omitted again on encode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Steps since the previous report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<i64>,
    #[serde(skip)]
    pub responses: Option<Vec<Response>>,
    /// Battery charge between 0 and 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<i64>,
    #[serde(skip)]
    pub date: Option<Timestamp>,
    #[serde(skip)]
    pub day: Option<Timestamp>,
    #[serde(skip)]
    pub location: Option<Location>,
    #[serde(skip)]
    pub photo_set: Option<PhotoSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(skip)]
    pub connection: Option<Connection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<Altitude>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_impetus: Option<ReportImpetus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dwell_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<i64>,
    /// Keys this version of the reader does not know, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    /// `(latitude, longitude)` of the report's location fix
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.location.as_ref()?.coordinates()
    }

    /// Number of answered questions
    pub fn response_count(&self) -> usize {
        self.responses.as_ref().map_or(0, Vec::len)
    }
}

impl WireCodec for Snapshot {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        let mut map = expect_object(raw, "snapshot")?;
        let responses = take_field(&mut map, "responses", session)?;
        let date = take_field(&mut map, "date", session)?;
        let day = take_field(&mut map, "day", session)?;
        let location = take_field(&mut map, "location", session)?;
        let photo_set = take_field(&mut map, "photoSet", session)?;
        let connection = take_field(&mut map, "connection", session)?;
        Ok(Self {
            responses,
            date,
            day,
            location,
            photo_set,
            connection,
            ..from_plain(map)?
        })
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        let mut map = to_plain(self, "snapshot")?;
        put_field(&mut map, "responses", self.responses.as_ref(), version)?;
        put_field(&mut map, "date", self.date.as_ref(), version)?;
        put_field(&mut map, "day", self.day.as_ref(), version)?;
        put_field(&mut map, "location", self.location.as_ref(), version)?;
        put_field(&mut map, "photoSet", self.photo_set.as_ref(), version)?;
        put_field(&mut map, "connection", self.connection.as_ref(), version)?;
        Ok(Value::Object(map))
    }
}
