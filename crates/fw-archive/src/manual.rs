// manual.rs - ManualEntryStore: operator-entered reminder records.

use std::path::{Path, PathBuf};

use fw_shipment::{Carrier, ShipmentRecord};

use crate::atomic::{load_records_or_empty, write_json_atomic};
use crate::error::ArchiveError;

/// Prefix of generated manual entry ids.
pub const MANUAL_ID_PREFIX: &str = "MEMO-";

pub struct ManualEntryStore {
    path: PathBuf,
}

impl ManualEntryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Vec<ShipmentRecord> {
        load_records_or_empty(&self.path)
    }

    pub fn save(&self, entries: &[ShipmentRecord]) -> Result<(), ArchiveError> {
        write_json_atomic(&self.path, entries)
    }

    /// Insert or replace by id. The entry is forced to the manual carrier.
    pub fn upsert(&self, mut entry: ShipmentRecord) -> Result<(), ArchiveError> {
        entry.carrier = Carrier::Manual;
        entry.is_manual = true;
        let mut entries = self.load();
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        self.save(&entries)
    }

    /// Remove by id; `NotFound` when no entry has it.
    pub fn remove(&self, id: &str) -> Result<ShipmentRecord, ArchiveError> {
        let mut entries = self.load();
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ArchiveError::NotFound(id.to_string()))?;
        let removed = entries.remove(index);
        self.save(&entries)?;
        Ok(removed)
    }

    /// Next free "MEMO-NNNN" id.
    pub fn next_id(&self) -> String {
        let highest = self
            .load()
            .iter()
            .filter_map(|e| e.id.strip_prefix(MANUAL_ID_PREFIX))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{MANUAL_ID_PREFIX}{:04}", highest + 1)
    }
}
