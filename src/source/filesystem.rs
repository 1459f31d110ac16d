//! Local directory source
//!
//! Reads exports from a directory on disk, by default the Dropbox app folder
//! the Reporter app syncs into.

use super::*;
use chrono::{DateTime, Local};
use std::fs;

/// Exports stored in a local directory
#[derive(Debug, Clone)]
pub struct FilesystemSource {
    storage_dir: PathBuf,
}

impl FilesystemSource {
    /// Source rooted at `storage_dir`
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// Source rooted at `~/Dropbox/Apps/Reporter-App/`
    pub fn default_location() -> SourceResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| SourceError::Config("could not determine home directory".into()))?;
        Ok(Self::new(home.join("Dropbox").join("Apps").join("Reporter-App")))
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn modified(metadata: &fs::Metadata) -> Option<DateTime<Local>> {
        metadata.modified().ok().map(DateTime::<Local>::from)
    }
}

impl ReportSource for FilesystemSource {
    fn origin(&self) -> &str {
        "filesystem"
    }

    fn location(&self) -> PathBuf {
        self.storage_dir.clone()
    }

    fn list_reports(&self) -> SourceResult<Vec<Provenance>> {
        let entries =
            fs::read_dir(&self.storage_dir).map_err(|e| SourceError::io(&self.storage_dir, e))?;

        let mut reports = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourceError::io(&self.storage_dir, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if !name.contains(EXPORT_SUFFIX) {
                continue;
            }

            let date = match date_for_filename(&path) {
                Ok(date) => date,
                Err(e) => {
                    tracing::warn!(name = %name, error = %e, "Skipping export with unparseable name");
                    continue;
                }
            };

            let modified = entry.metadata().ok().as_ref().and_then(Self::modified);
            reports.push(Provenance {
                name,
                path,
                origin: self.origin().to_string(),
                modified,
                date,
            });
        }

        reports.sort_by_key(|p| p.date);
        tracing::debug!(dir = ?self.storage_dir, count = reports.len(), "Listed reports");
        Ok(reports)
    }

    fn report_for_path(&self, path: &Path) -> SourceResult<ReportFile> {
        let date = date_for_filename(path)?;
        let contents = fs::read(path).map_err(|e| SourceError::io(path, e))?;
        let metadata = fs::metadata(path).map_err(|e| SourceError::io(path, e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(ReportFile {
            provenance: Provenance {
                name,
                path: path.to_path_buf(),
                origin: self.origin().to_string(),
                modified: Self::modified(&metadata),
                date,
            },
            contents,
        })
    }

    fn report_for_date(&self, date: NaiveDate) -> SourceResult<ReportFile> {
        self.report_for_path(&self.storage_dir.join(filename_for_date(date)))
    }
}
