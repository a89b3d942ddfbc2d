// atomic.rs - Whole-file replace and tolerant reads.
//
// Writes go to a temp file in the target's directory, are synced, then
// renamed over the target. Readers see the old file or the new one, never a
// partial write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use fw_shipment::ShipmentRecord;

use crate::error::ArchiveError;

/// Atomically replace `path` with `contents`. Creates the parent directory.
pub fn write_text_atomic(path: &Path, contents: &str) -> Result<(), ArchiveError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| ArchiveError::io(&dir, e))?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| ArchiveError::io(&dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| ArchiveError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ArchiveError::io(tmp.path(), e))?;
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| ArchiveError::io(tmp.path(), e))?;
    }
    tmp.persist(path)
        .map_err(|e| ArchiveError::io(path, e.error))?;
    Ok(())
}

/// Mode for the replacement file: the existing target's, else 0644.
/// Temp files start out owner-only.
#[cfg(unix)]
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.permissions()),
        _ => Some(fs::Permissions::from_mode(0o644)),
    }
}

#[cfg(not(unix))]
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.permissions())
}

/// Atomically replace `path` with pretty-printed JSON.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ArchiveError> {
    let json = serde_json::to_string_pretty(value)?;
    write_text_atomic(path, &json)
}

/// Read and parse a JSON file. `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ArchiveError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ArchiveError::io(path, e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| ArchiveError::Corrupt {
            path: path.display().to_string(),
            source,
        })
}

/// Load a record list, treating a missing or unreadable file as empty.
pub(crate) fn load_records_or_empty(path: &Path) -> Vec<ShipmentRecord> {
    match read_json::<Vec<ShipmentRecord>>(path) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "treating unreadable record file as empty");
            Vec::new()
        }
    }
}

/// Move a corrupt file aside to `<file>.corrupt-<UTC timestamp>`.
pub(crate) fn quarantine(path: &Path) -> Result<PathBuf, ArchiveError> {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".corrupt-{stamp}"));
    let target = path.with_file_name(name);
    fs::rename(path, &target).map_err(|e| ArchiveError::io(path, e))?;
    Ok(target)
}
