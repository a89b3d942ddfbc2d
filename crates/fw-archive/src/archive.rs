// archive.rs - ArchiveStore: the append-only history of completed shipments.
//
// A JSON array of ShipmentRecord, each stamped with `archived_at`. Ids are
// unique across the whole file and the file never shrinks. Appending the
// same batch twice is a no-op the second time.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use fw_shipment::ShipmentRecord;

use crate::atomic::{load_records_or_empty, quarantine, read_json, write_json_atomic};
use crate::error::ArchiveError;

pub struct ArchiveStore {
    path: PathBuf,
}

impl ArchiveStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full archive; missing or corrupt reads as empty.
    pub fn load(&self) -> Vec<ShipmentRecord> {
        load_records_or_empty(&self.path)
    }

    /// Existing archive for an append. A corrupt file is moved aside first
    /// so it is never overwritten in place; any other read failure aborts.
    fn load_for_append(&self) -> Result<Vec<ShipmentRecord>, ArchiveError> {
        match read_json::<Vec<ShipmentRecord>>(&self.path) {
            Ok(records) => Ok(records.unwrap_or_default()),
            Err(e @ ArchiveError::Corrupt { .. }) => {
                let moved = quarantine(&self.path)?;
                tracing::warn!(
                    error = %e,
                    moved_to = %moved.display(),
                    "archive is corrupt, starting a fresh one"
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Append every record whose id is not archived yet, stamping
    /// `archived_at = today`. Returns how many were added.
    ///
    /// The file is rewritten only when at least one record was added.
    pub fn append(
        &self,
        completions: Vec<ShipmentRecord>,
        today: NaiveDate,
    ) -> Result<usize, ArchiveError> {
        if completions.is_empty() {
            return Ok(0);
        }

        let mut archive = self.load_for_append()?;
        let mut known: HashSet<String> = archive.iter().map(|r| r.id.clone()).collect();

        let before = archive.len();
        for mut record in completions {
            if !known.insert(record.id.clone()) {
                tracing::debug!(id = %record.id, "already archived, skipping");
                continue;
            }
            record.archived_at = Some(today);
            archive.push(record);
        }
        let added = archive.len() - before;

        if added > 0 {
            write_json_atomic(&self.path, &archive)?;
            tracing::info!(added, total = archive.len(), "archive updated");
        }
        Ok(added)
    }
}
