//! Source error types

use crate::error::ReportError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading export files
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading a file or directory failed
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filename does not follow `YYYY-MM-DD-reporter-export.json`
    #[error("Invalid export filename: {0}")]
    InvalidFilename(String),

    /// Storage directory contains no export files
    #[error("No reports found in {0:?}")]
    NoReports(PathBuf),

    /// Storage location could not be determined
    #[error("Configuration error: {0}")]
    Config(String),

    /// File was read but its contents failed to decode
    #[error("Decode error: {0}")]
    Decode(#[from] ReportError),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for source operations
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::InvalidFilename("notes.json".to_string());
        assert_eq!(err.to_string(), "Invalid export filename: notes.json");
    }

    #[test]
    fn test_report_error_conversion() {
        let err: SourceError = ReportError::InvalidDocument("empty".to_string()).into();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
