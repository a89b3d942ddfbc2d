// state.rs - ActiveStateStore: the previous poll's active set.

use std::path::{Path, PathBuf};

use fw_shipment::ShipmentRecord;

use crate::atomic::{load_records_or_empty, write_json_atomic};
use crate::error::ArchiveError;

/// Snapshot of the shipments that were active after the last cycle. Used
/// only to detect shipments that vanish between polls.
pub struct ActiveStateStore {
    path: PathBuf,
}

impl ActiveStateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Previous active set; missing or corrupt reads as empty.
    pub fn load(&self) -> Vec<ShipmentRecord> {
        load_records_or_empty(&self.path)
    }

    pub fn save(&self, active: &[ShipmentRecord]) -> Result<(), ArchiveError> {
        write_json_atomic(&self.path, active)
    }
}
