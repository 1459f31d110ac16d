//! # Reporter
//!
//! Reader and writer for the daily JSON exports of the Reporter app.
//!
//! The app has written two incompatible export layouts over its lifetime.
//! Neither carries a version marker, so the layout is inferred from the
//! shape of the versioned fields themselves (dates, tokens) while decoding,
//! and re-encoding reproduces whichever layout was read.
//!
//! ## Features
//!
//! - **Schema inference**: one explicit session per decode, conflicts are errors
//! - **Lossless round-trip**: unknown keys are kept and written back
//! - **Sources**: pick exports out of a synced folder by filename date
//! - **Enrichment**: time zone lookup for a snapshot's coordinates
//!
//! ## Modules
//!
//! - [`codec`]: schema versions and the versioned scalar types
//! - [`report`]: the document tree and the decode/encode pipeline
//! - [`source`]: locating export files
//! - [`integrations`]: remote services
//! - [`config`]: TOML configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reporter::source::{FilesystemSource, ReportSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FilesystemSource::default_location()?;
//!     let day = reporter::decode_file(&source.latest_report()?)?;
//!
//!     println!("{} snapshots, schema {}", day.snapshot_count(), day.schema_version);
//!     if let Some(audio) = day.latest_snapshot().and_then(|s| s.audio.as_ref()) {
//!         println!("Average noise: {} dB", audio.positive_average_db(true)?);
//!     }
//!
//!     let bytes = reporter::encode_document(&day)?;
//!     std::fs::write("copy.json", bytes)?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod integrations;
pub mod numeric;
pub mod report;
pub mod source;

// Re-export top-level types for convenience
pub use codec::{
    Connection, Region, SchemaSession, SchemaVersion, Timestamp, Token, UnknownSchemaPolicy,
    WireCodec,
};

pub use error::{ReportError, ReportResult};

pub use report::{
    decode_document, decode_file, decode_str, decode_value, encode_document,
    encode_document_pretty, encode_document_with, encode_value, Audio, Day, Snapshot,
};

pub use source::{FilesystemSource, Provenance, ReportFile, ReportSource, SourceError};

pub use config::{Config, ConfigError, LoggingConfig};

pub use integrations::{
    timezone_for_snapshot, GoogleTimezoneClient, IntegrationError, TimezoneConfig,
    TimezoneLookup,
};
