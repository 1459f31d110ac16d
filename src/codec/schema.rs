//! Schema version tracking
//!
//! Export documents carry no version tag. The version is inferred from the
//! shape of the first versioned field decoded and recorded in a
//! [`SchemaSession`] owned by that single decode call. Encoding reads the
//! resolved version back out of the decoded [`crate::Day`].

use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};

/// Which historical export layout produced a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// No versioned field has been seen yet
    #[default]
    Unknown,
    /// Seconds-since-2001 timestamps, bare string tokens
    V1,
    /// ISO 8601 timestamps, `{uniqueIdentifier, text}` tokens
    V2,
}

impl SchemaVersion {
    /// The forward format used when nothing else is known
    pub const CURRENT: SchemaVersion = SchemaVersion::V2;

    pub fn is_known(&self) -> bool {
        !matches!(self, SchemaVersion::Unknown)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVersion::Unknown => write!(f, "unknown"),
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
        }
    }
}

/// How to encode a document whose schema was never inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSchemaPolicy {
    /// Treat `Unknown` as the current format
    #[default]
    #[serde(alias = "assume_current")]
    Current,
    /// Refuse with [`ReportError::UnresolvedSchema`]
    Reject,
}

impl UnknownSchemaPolicy {
    /// Resolve the version to encode with
    pub fn resolve(&self, version: SchemaVersion) -> ReportResult<SchemaVersion> {
        match (version, self) {
            (SchemaVersion::Unknown, UnknownSchemaPolicy::Current) => Ok(SchemaVersion::CURRENT),
            (SchemaVersion::Unknown, UnknownSchemaPolicy::Reject) => {
                Err(ReportError::UnresolvedSchema)
            }
            (known, _) => Ok(known),
        }
    }
}

/// Version state for exactly one decode call
///
/// Starts `Unknown`. The first versioned field fixes the version; any later
/// field of the other shape is a [`ReportError::SchemaConflict`].
#[derive(Debug, Default)]
pub struct SchemaSession {
    version: SchemaVersion,
}

impl SchemaSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the shape a versioned field was decoded from
    pub fn record(&mut self, found: SchemaVersion) -> ReportResult<()> {
        match self.version {
            _ if !found.is_known() => Ok(()),
            SchemaVersion::Unknown => {
                self.version = found;
                Ok(())
            }
            recorded if recorded == found => Ok(()),
            recorded => Err(ReportError::SchemaConflict { recorded, found }),
        }
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Consume the session, yielding the inferred version
    pub fn finish(self) -> SchemaVersion {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_unknown() {
        let session = SchemaSession::new();
        assert_eq!(session.version(), SchemaVersion::Unknown);
    }

    #[test]
    fn test_first_record_wins_and_repeat_is_idempotent() {
        let mut session = SchemaSession::new();
        session.record(SchemaVersion::V1).unwrap();
        session.record(SchemaVersion::V1).unwrap();
        assert_eq!(session.finish(), SchemaVersion::V1);
    }

    #[test]
    fn test_conflicting_record_is_rejected() {
        let mut session = SchemaSession::new();
        session.record(SchemaVersion::V2).unwrap();
        let err = session.record(SchemaVersion::V1).unwrap_err();
        assert_eq!(
            err,
            ReportError::SchemaConflict {
                recorded: SchemaVersion::V2,
                found: SchemaVersion::V1,
            }
        );
        assert_eq!(session.version(), SchemaVersion::V2);
    }

    #[test]
    fn test_unknown_record_is_ignored() {
        let mut session = SchemaSession::new();
        session.record(SchemaVersion::Unknown).unwrap();
        session.record(SchemaVersion::V1).unwrap();
        assert_eq!(session.version(), SchemaVersion::V1);
    }

    #[test]
    fn test_policy_resolution() {
        assert_eq!(
            UnknownSchemaPolicy::Current.resolve(SchemaVersion::Unknown),
            Ok(SchemaVersion::V2)
        );
        assert_eq!(
            UnknownSchemaPolicy::Reject.resolve(SchemaVersion::Unknown),
            Err(ReportError::UnresolvedSchema)
        );
        assert_eq!(
            UnknownSchemaPolicy::Reject.resolve(SchemaVersion::V1),
            Ok(SchemaVersion::V1)
        );
    }
}
