//! One day's export document

use crate::codec::schema::SchemaVersion;
use crate::report::sections::Question;
use crate::report::snapshot::Snapshot;
use crate::source::Provenance;
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// All snapshots and question definitions from one export file
///
/// Built once per decode and not mutated afterwards. `schema_version`
/// records which layout the document was decoded from so that encoding
/// reproduces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Day {
    /// In the order written, which is chronological
    pub snapshots: Vec<Snapshot>,
    /// Only present in v2 documents
    pub questions: Option<Vec<Question>>,
    pub schema_version: SchemaVersion,
    /// Where the bytes came from; `None` when decoded from a string
    pub provenance: Option<Provenance>,
    /// Unrecognised top-level keys, kept verbatim
    pub extra: Map<String, Value>,
}

impl Day {
    /// Empty day of unknown schema, for building documents by hand
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots,
            ..Default::default()
        }
    }

    /// First report of the day, if any
    pub fn earliest_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    /// Last report of the day, if any
    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn questions(&self) -> &[Question] {
        self.questions.as_deref().unwrap_or_default()
    }

    /// Date from the export filename, when loaded from a source
    pub fn date(&self) -> Option<NaiveDate> {
        self.provenance.as_ref().map(|p| p.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(steps: i64) -> Snapshot {
        Snapshot {
            steps: Some(steps),
            ..Default::default()
        }
    }

    #[test]
    fn test_earliest_and_latest() {
        let day = Day::new(vec![snapshot(1), snapshot(2), snapshot(3)]);
        assert_eq!(day.earliest_snapshot().unwrap().steps, Some(1));
        assert_eq!(day.latest_snapshot().unwrap().steps, Some(3));
    }

    #[test]
    fn test_single_snapshot_is_both_earliest_and_latest() {
        let day = Day::new(vec![snapshot(7)]);
        assert_eq!(day.earliest_snapshot(), day.latest_snapshot());
    }

    #[test]
    fn test_empty_day_has_no_earliest_or_latest() {
        let day = Day::new(Vec::new());
        assert!(day.earliest_snapshot().is_none());
        assert!(day.latest_snapshot().is_none());
        assert_eq!(day.snapshot_count(), 0);
    }

    #[test]
    fn test_questions_default_to_empty() {
        let day = Day::default();
        assert!(day.questions().is_empty());
        assert_eq!(day.schema_version, SchemaVersion::Unknown);
        assert_eq!(day.date(), None);
    }
}
