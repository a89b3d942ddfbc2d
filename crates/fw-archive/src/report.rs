// report.rs - ReportStore: dated report snapshots and their retention.
//
// One `report_<YYYY-MM-DD>.json` per day holds the active set and the full
// archive as of the last cycle that day. It is the one document outside
// readers (the dashboard) consume. Old snapshots, and the plain-text
// `log_report_<date>.txt` files older installs produced, are pruned by age.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use fw_shipment::ShipmentRecord;

use crate::atomic::{read_json, write_json_atomic};
use crate::error::ArchiveError;

pub const DEFAULT_RETENTION_DAYS: u32 = 14;

const SNAPSHOT_PATTERN: &str = r"^report_\d{4}-\d{2}-\d{2}\.json$";
const PRUNABLE_PATTERN: &str =
    r"^(?:report_\d{4}-\d{2}-\d{2}\.json|log_report_\d{4}-\d{2}-\d{2}\.txt)$";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub created_at: DateTime<Utc>,
    pub active_count: usize,
    pub archive_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub metadata: ReportMetadata,
    pub active: Vec<ShipmentRecord>,
    pub archive: Vec<ShipmentRecord>,
}

impl ReportSnapshot {
    pub fn new(
        created_at: DateTime<Utc>,
        active: Vec<ShipmentRecord>,
        archive: Vec<ShipmentRecord>,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                created_at,
                active_count: active.len(),
                archive_count: archive.len(),
            },
            active,
            archive,
        }
    }

    pub fn file_name(&self) -> String {
        format!("report_{}.json", self.metadata.created_at.format("%Y-%m-%d"))
    }
}

pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write (or overwrite) the snapshot for its creation date.
    pub fn write(&self, snapshot: &ReportSnapshot) -> Result<PathBuf, ArchiveError> {
        let path = self.dir.join(snapshot.file_name());
        write_json_atomic(&path, snapshot)?;
        tracing::debug!(path = %path.display(), "report snapshot written");
        Ok(path)
    }

    /// File names in the report dir matching `pattern`.
    fn matching(&self, pattern: &str) -> Result<Vec<PathBuf>, ArchiveError> {
        let re = Regex::new(pattern)?;
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ArchiveError::io(&self.dir, e)),
        };
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| re.is_match(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.path())
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// The most recent snapshot by file date, skipping unreadable ones.
    pub fn latest(&self) -> Result<Option<ReportSnapshot>, ArchiveError> {
        for path in self.matching(SNAPSHOT_PATTERN)?.iter().rev() {
            match read_json::<ReportSnapshot>(path) {
                Ok(Some(snapshot)) => return Ok(Some(snapshot)),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "skipping unreadable report"),
            }
        }
        Ok(None)
    }

    /// Delete dated report files last modified more than `horizon_days`
    /// before `now`. Returns the removed paths.
    ///
    /// A file that cannot be inspected or removed is logged and left alone.
    pub fn prune(&self, horizon_days: u32, now: DateTime<Utc>) -> Result<Vec<PathBuf>, ArchiveError> {
        let cutoff = now - Duration::days(i64::from(horizon_days));
        let mut removed = Vec::new();

        for path in self.matching(PRUNABLE_PATTERN)? {
            let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(modified) => DateTime::<Utc>::from(modified),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read report mtime");
                    continue;
                }
            };
            if modified >= cutoff {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "pruned old report");
                    removed.push(path);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to prune report");
                }
            }
        }
        Ok(removed)
    }
}
