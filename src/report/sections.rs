//! Snapshot sections
//!
//! Every field is optional: v2 exports drop several keys v1 always wrote,
//! and a key that was absent must stay absent on re-encode. Sections with
//! only plain fields map structurally through serde. Sections holding a
//! versioned field ([`Timestamp`], [`Token`], [`Region`]) implement
//! [`WireCodec`] and route those keys by hand. Keys a section does not
//! model land in its `extra` map and are written back unchanged.

use crate::codec::scalar::{Region, Timestamp, Token};
use crate::codec::schema::{SchemaSession, SchemaVersion};
use crate::codec::wire::{expect_object, from_plain, put_field, take_field, to_plain, WireCodec};
use crate::error::ReportResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ambient sound level over one second, in raw CoreAudio dB (-160 to 0)
///
/// Use [`Audio::positive_average_db`] / [`Audio::positive_peak_db`] for the
/// positive scale the app displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "avg", skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak: Option<f64>,
    /// Keys this reader does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Barometric and GPS altitude readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Altitude {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors_ascended: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors_descended: Option<i64>,
    #[serde(rename = "gpsAltitudeFromLocation", skip_serializing_if = "Option::is_none")]
    pub gps_altitude_from_location: Option<f64>,
    #[serde(rename = "gpsRawAltitude", skip_serializing_if = "Option::is_none")]
    pub gps_raw_altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Weather conditions at the time of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "relativeHumidity", skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<String>,
    #[serde(rename = "visibilityKM", skip_serializing_if = "Option::is_none")]
    pub visibility_km: Option<f64>,
    #[serde(rename = "tempC", skip_serializing_if = "Option::is_none")]
    pub temp_c: Option<f64>,
    #[serde(rename = "precipTodayIn", skip_serializing_if = "Option::is_none")]
    pub precip_today_in: Option<f64>,
    #[serde(rename = "windKPH", skip_serializing_if = "Option::is_none")]
    pub wind_kph: Option<f64>,
    #[serde(rename = "windDegrees", skip_serializing_if = "Option::is_none")]
    pub wind_degrees: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "stationID", skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    #[serde(rename = "visibilityMi", skip_serializing_if = "Option::is_none")]
    pub visibility_mi: Option<f64>,
    #[serde(rename = "pressureIn", skip_serializing_if = "Option::is_none")]
    pub pressure_in: Option<f64>,
    #[serde(rename = "pressureMb", skip_serializing_if = "Option::is_none")]
    pub pressure_mb: Option<f64>,
    #[serde(rename = "feelslikeF", skip_serializing_if = "Option::is_none")]
    pub feels_like_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "feelslikeC", skip_serializing_if = "Option::is_none")]
    pub feels_like_c: Option<f64>,
    #[serde(rename = "tempF", skip_serializing_if = "Option::is_none")]
    pub temp_f: Option<f64>,
    #[serde(rename = "precipTodayMetric", skip_serializing_if = "Option::is_none")]
    pub precip_today_metric: Option<f64>,
    #[serde(rename = "windGustKPH", skip_serializing_if = "Option::is_none")]
    pub wind_gust_kph: Option<f64>,
    #[serde(rename = "windDirection", skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<String>,
    #[serde(rename = "dewpointC", skip_serializing_if = "Option::is_none")]
    pub dewpoint_c: Option<f64>,
    #[serde(rename = "uv", skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    #[serde(rename = "weather", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "windGustMPH", skip_serializing_if = "Option::is_none")]
    pub wind_gust_mph: Option<f64>,
    #[serde(rename = "windMPH", skip_serializing_if = "Option::is_none")]
    pub wind_mph: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reverse-geocoded address for a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placemark {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_administrative_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_thoroughfare: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thoroughfare: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip)]
    pub region: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Keys this reader does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireCodec for Placemark {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        let mut map = expect_object(raw, "placemark")?;
        let region = take_field(&mut map, "region", session)?;
        Ok(Self {
            region,
            ..from_plain(map)?
        })
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        let mut map = to_plain(self, "placemark")?;
        put_field(&mut map, "region", self.region.as_ref(), version)?;
        Ok(Value::Object(map))
    }
}

/// A CoreLocation fix with its reverse-geocoded placemark
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip)]
    pub placemark: Option<Placemark>,
    #[serde(skip)]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    /// `(latitude, longitude)` when both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

impl WireCodec for Location {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        let mut map = expect_object(raw, "location")?;
        let placemark = take_field(&mut map, "placemark", session)?;
        let timestamp = take_field(&mut map, "timestamp", session)?;
        Ok(Self {
            placemark,
            timestamp,
            ..from_plain(map)?
        })
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        let mut map = to_plain(self, "location")?;
        put_field(&mut map, "placemark", self.placemark.as_ref(), version)?;
        put_field(&mut map, "timestamp", self.timestamp.as_ref(), version)?;
        Ok(Value::Object(map))
    }
}

/// EXIF metadata of one photo taken between reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness_value: Option<f64>,
    #[serde(skip)]
    pub date_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_mode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_program: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<f64>,
    #[serde(rename = "fNumber", skip_serializing_if = "Option::is_none")]
    pub f_number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    #[serde(rename = "focalLengthIn35mm", skip_serializing_if = "Option::is_none")]
    pub focal_length_in_35mm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_speed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metering_mode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_unit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_capture_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensing_mode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_balance: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireCodec for Photo {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        let mut map = expect_object(raw, "photo")?;
        let date_time = take_field(&mut map, "dateTime", session)?;
        Ok(Self {
            date_time,
            ..from_plain(map)?
        })
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        let mut map = to_plain(self, "photo")?;
        put_field(&mut map, "dateTime", self.date_time.as_ref(), version)?;
        Ok(Value::Object(map))
    }
}

/// Photos taken since the previous report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSet {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip)]
    pub photos: Option<Vec<Photo>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireCodec for PhotoSet {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        let mut map = expect_object(raw, "photoSet")?;
        let photos = take_field(&mut map, "photos", session)?;
        Ok(Self {
            photos,
            ..from_plain(map)?
        })
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        let mut map = to_plain(self, "photoSet")?;
        put_field(&mut map, "photos", self.photos.as_ref(), version)?;
        Ok(Value::Object(map))
    }
}

/// How the report was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ReportImpetus {
    /// Code 0
    ButtonTapped,
    /// Code 1
    ButtonTappedWhileAsleep,
    /// Code 2
    Notification,
    /// Code 3
    SetToSleep,
    /// Code 4
    WokeUp,
    Other(i64),
}

impl ReportImpetus {
    pub fn code(&self) -> i64 {
        match self {
            ReportImpetus::ButtonTapped => 0,
            ReportImpetus::ButtonTappedWhileAsleep => 1,
            ReportImpetus::Notification => 2,
            ReportImpetus::SetToSleep => 3,
            ReportImpetus::WokeUp => 4,
            ReportImpetus::Other(code) => *code,
        }
    }

    /// Empty for unrecognised codes
    pub fn description(&self) -> &'static str {
        match self {
            ReportImpetus::ButtonTapped => "Report button tapped",
            ReportImpetus::ButtonTappedWhileAsleep => {
                "Report button tapped while Reporter is asleep"
            }
            ReportImpetus::Notification => "Report triggered by notification",
            ReportImpetus::SetToSleep => "Report triggered by setting app to sleep",
            ReportImpetus::WokeUp => "Report triggered by waking up app",
            ReportImpetus::Other(_) => "",
        }
    }
}

impl From<i64> for ReportImpetus {
    fn from(code: i64) -> Self {
        match code {
            0 => ReportImpetus::ButtonTapped,
            1 => ReportImpetus::ButtonTappedWhileAsleep,
            2 => ReportImpetus::Notification,
            3 => ReportImpetus::SetToSleep,
            4 => ReportImpetus::WokeUp,
            other => ReportImpetus::Other(other),
        }
    }
}

impl From<ReportImpetus> for i64 {
    fn from(impetus: ReportImpetus) -> Self {
        impetus.code()
    }
}

impl std::fmt::Display for ReportImpetus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A question the user has configured (v2 only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<i64>,
    #[serde(rename = "placeholderString", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-form text answer (v2)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextResponse {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Answer to a "where are you" question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip)]
    pub location: Option<Location>,
    #[serde(rename = "foursquareVenueId", skip_serializing_if = "Option::is_none")]
    pub foursquare_venue_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireCodec for LocationResponse {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        let mut map = expect_object(raw, "locationResponse")?;
        let location = take_field(&mut map, "location", session)?;
        Ok(Self {
            location,
            ..from_plain(map)?
        })
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        let mut map = to_plain(self, "locationResponse")?;
        put_field(&mut map, "location", self.location.as_ref(), version)?;
        Ok(Value::Object(map))
    }
}

/// One answered survey question. Unanswered questions are not written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(rename = "uniqueIdentifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip)]
    pub tokens: Option<Vec<Token>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_options: Option<Vec<String>>,
    #[serde(skip)]
    pub location_response: Option<LocationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_response: Option<String>,
    /// v2 layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_responses: Option<Vec<TextResponse>>,
    /// v1 layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_response: Option<String>,
    /// Keys this reader does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireCodec for Response {
    fn decode(raw: Value, session: &mut SchemaSession) -> ReportResult<Self> {
        let mut map = expect_object(raw, "response")?;
        let tokens = take_field(&mut map, "tokens", session)?;
        let location_response = take_field(&mut map, "locationResponse", session)?;
        Ok(Self {
            tokens,
            location_response,
            ..from_plain(map)?
        })
    }

    fn encode(&self, version: SchemaVersion) -> ReportResult<Value> {
        let mut map = to_plain(self, "response")?;
        put_field(&mut map, "tokens", self.tokens.as_ref(), version)?;
        put_field(
            &mut map,
            "locationResponse",
            self.location_response.as_ref(),
            version,
        )?;
        Ok(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_section_omits_absent_fields() {
        let audio: Audio = serde_json::from_value(json!({"avg": -50.5})).unwrap();
        assert_eq!(audio.peak, None);
        assert_eq!(serde_json::to_value(&audio).unwrap(), json!({"avg": -50.5}));
    }

    #[test]
    fn test_plain_section_keeps_unknown_keys() {
        let raw = json!({"uniqueIdentifier": "A", "avg": -50.0, "peak": -40.0, "newMetric": 3});
        let audio: Audio = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(audio.extra.get("newMetric"), Some(&json!(3)));
        assert_eq!(serde_json::to_value(&audio).unwrap(), raw);
    }

    #[test]
    fn test_codec_sections_keep_unknown_keys() {
        let raw = json!({
            "questionPrompt": "Where are you?",
            "confidence": 0.8,
            "locationResponse": {
                "text": "Home",
                "venueCategory": "Residence",
                "location": {
                    "latitude": 37.3,
                    "longitude": -122.0,
                    "floor": 2,
                    "placemark": {
                        "region": "<+37.30000000,-122.00000000> radius 50.00m",
                        "areasOfInterest": ["Campus"]
                    }
                }
            }
        });
        let mut session = SchemaSession::new();
        let response = Response::decode(raw.clone(), &mut session).unwrap();

        let location_response = response.location_response.as_ref().unwrap();
        let location = location_response.location.as_ref().unwrap();
        assert_eq!(response.extra.get("confidence"), Some(&json!(0.8)));
        assert_eq!(location_response.extra.get("venueCategory"), Some(&json!("Residence")));
        assert_eq!(location.extra.get("floor"), Some(&json!(2)));
        assert!(location.placemark.as_ref().unwrap().extra.contains_key("areasOfInterest"));
        assert!(!location.placemark.as_ref().unwrap().extra.contains_key("region"));

        assert_eq!(response.encode(SchemaVersion::V2).unwrap(), raw);
    }

    #[test]
    fn test_location_routes_versioned_keys() {
        let raw = json!({
            "latitude": 40.7,
            "longitude": -74.0,
            "timestamp": "2015-10-23T08:14:03-0400",
            "placemark": {
                "locality": "New York",
                "region": "<+40.70000000,-74.00000000> radius 70.85m"
            }
        });
        let mut session = SchemaSession::new();
        let location = Location::decode(raw.clone(), &mut session).unwrap();

        assert_eq!(session.version(), SchemaVersion::V2);
        assert_eq!(location.coordinates(), Some((40.7, -74.0)));
        let placemark = location.placemark.as_ref().unwrap();
        assert_eq!(placemark.locality.as_deref(), Some("New York"));
        assert!((placemark.region.as_ref().unwrap().radius - 70.85).abs() < 1e-9);

        assert_eq!(location.encode(SchemaVersion::V2).unwrap(), raw);
    }

    #[test]
    fn test_response_tokens_follow_version() {
        let raw = json!({
            "questionPrompt": "What are you doing?",
            "tokens": ["Working", "Coffee"]
        });
        let mut session = SchemaSession::new();
        let response = Response::decode(raw.clone(), &mut session).unwrap();

        assert_eq!(session.version(), SchemaVersion::V1);
        assert_eq!(response.tokens.as_ref().unwrap().len(), 2);
        assert_eq!(response.encode(SchemaVersion::V1).unwrap(), raw);
    }

    #[test]
    fn test_response_with_mixed_token_shapes_conflicts() {
        let raw = json!({"tokens": ["Working", {"uniqueIdentifier": "X", "text": "Coffee"}]});
        let mut session = SchemaSession::new();
        let err = Response::decode(raw, &mut session).unwrap_err();
        assert!(matches!(err, crate::ReportError::SchemaConflict { .. }));
    }

    #[test]
    fn test_photo_set_keeps_empty_photo_list() {
        let raw = json!({"uniqueIdentifier": "PS1", "photos": []});
        let mut session = SchemaSession::new();
        let set = PhotoSet::decode(raw.clone(), &mut session).unwrap();
        assert_eq!(set.photos.as_deref(), Some(&[][..]));
        assert_eq!(set.encode(SchemaVersion::V2).unwrap(), raw);
    }

    #[test]
    fn test_report_impetus_codes() {
        let impetus: ReportImpetus = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(impetus, ReportImpetus::Notification);
        assert_eq!(impetus.description(), "Report triggered by notification");

        let unknown: ReportImpetus = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(unknown.description(), "");
        assert_eq!(serde_json::to_value(unknown).unwrap(), json!(7));
    }

    #[test]
    fn test_question_field_names() {
        let raw = json!({
            "uniqueIdentifier": "Q1",
            "prompt": "How did you sleep?",
            "questionType": 2,
            "placeholderString": "Well"
        });
        let question: Question = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(question.placeholder.as_deref(), Some("Well"));
        assert_eq!(serde_json::to_value(&question).unwrap(), raw);
    }
}
