//! Versioned field codecs
//!
//! - **schema**: version inference state for one decode call
//! - **wire**: the [`WireCodec`] trait and JSON object helpers
//! - **scalar**: timestamp, token, connection and region codecs
//!
//! # Data flow
//!
//! ```text
//! Decode:
//!   raw JSON value → try shapes in priority order → value + SchemaSession::record
//!
//! Encode:
//!   value + resolved SchemaVersion → JSON value in that version's shape
//! ```

pub mod scalar;
pub mod schema;
pub mod wire;

pub use scalar::{Connection, Region, Timestamp, Token, APPLE_EPOCH_UNIX, ISO8601};
pub use schema::{SchemaSession, SchemaVersion, UnknownSchemaPolicy};
pub use wire::WireCodec;
