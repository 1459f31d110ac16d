//! Export document tree
//!
//! - **day**: [`Day`], the whole document
//! - **snapshot**: [`Snapshot`], one report
//! - **sections**: audio, location, weather and the other nested sections
//! - **metrics**: positive-scale decibel values derived from [`Audio`]
//! - **pipeline**: bytes ⇄ [`Day`]
//!
//! # Example
//!
//! ```rust
//! use reporter::report::{decode_str, encode_document};
//!
//! let day = decode_str(r#"{"snapshots":[{"battery":0.9,"audio":{"avg":-58.84077}}]}"#)?;
//! let latest = day.latest_snapshot().expect("one snapshot");
//! let db = latest.audio.as_ref().expect("audio").positive_average_db(true)?;
//! assert_eq!(db, 12.32);
//!
//! let bytes = encode_document(&day)?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), reporter::ReportError>(())
//! ```

pub mod day;
pub mod metrics;
pub mod pipeline;
pub mod sections;
pub mod snapshot;

pub use day::Day;
pub use pipeline::{
    decode_document, decode_file, decode_str, decode_value, encode_document,
    encode_document_pretty, encode_document_with, encode_value,
};
pub use sections::{
    Altitude, Audio, Location, LocationResponse, Photo, PhotoSet, Placemark, Question,
    ReportImpetus, Response, TextResponse, Weather,
};
pub use snapshot::Snapshot;
