//! Export file sources
//!
//! The app writes one `YYYY-MM-DD-reporter-export.json` per day into a
//! synced folder. A [`ReportSource`] only fetches bytes and provenance; it
//! never decodes. Pair it with [`crate::report::decode_file`].
//!
//! - **filesystem**: a local (or locally synced) directory
//! - **error**: error types

mod error;
mod filesystem;

pub use error::{SourceError, SourceResult};
pub use filesystem::FilesystemSource;

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Suffix shared by every export filename
pub const EXPORT_SUFFIX: &str = "-reporter-export.json";

/// Where an export file came from
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    /// Base filename
    pub name: String,
    pub path: PathBuf,
    /// Source tag, e.g. "filesystem"
    pub origin: String,
    /// Last modification time, when the source reports one
    pub modified: Option<DateTime<Local>>,
    /// Date parsed from the filename
    pub date: NaiveDate,
}

/// Raw export bytes plus their provenance
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub provenance: Provenance,
    pub contents: Vec<u8>,
}

/// Common trait for export file sources
pub trait ReportSource {
    /// Tag recorded in [`Provenance::origin`]
    fn origin(&self) -> &str;

    /// All export files, without contents
    fn list_reports(&self) -> SourceResult<Vec<Provenance>>;

    /// Fetch the file at `path`
    fn report_for_path(&self, path: &Path) -> SourceResult<ReportFile>;

    /// Fetch the export written for `date`
    fn report_for_date(&self, date: NaiveDate) -> SourceResult<ReportFile>;

    /// Fetch the export with the newest filename date
    ///
    /// Modification times are ignored: the app rewrites older files when
    /// reports sync late.
    fn latest_report(&self) -> SourceResult<ReportFile> {
        let reports = self.list_reports()?;
        let latest = reports
            .iter()
            .max_by_key(|p| p.date)
            .ok_or_else(|| SourceError::NoReports(self.location()))?;
        tracing::debug!(name = %latest.name, origin = self.origin(), "Selected latest report");
        self.report_for_path(&latest.path)
    }

    /// Human-readable location, used in errors
    fn location(&self) -> PathBuf;
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2})-reporter-export\.json$").expect("valid filename regex")
    })
}

/// Parse the date out of an export filename (any directory part is ignored)
pub fn date_for_filename(path: &Path) -> SourceResult<NaiveDate> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SourceError::InvalidFilename(path.display().to_string()))?;

    let captures = filename_pattern()
        .captures(name)
        .ok_or_else(|| SourceError::InvalidFilename(name.to_string()))?;

    NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d")
        .map_err(|e| SourceError::InvalidFilename(format!("{}: {}", name, e)))
}

/// Export filename the app uses for `date`
pub fn filename_for_date(date: NaiveDate) -> String {
    format!("{}{}", date.format("%Y-%m-%d"), EXPORT_SUFFIX)
}
