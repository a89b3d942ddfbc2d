// digest.rs - DigestStore: the digest of the last delivered summary.

use std::fs;
use std::path::{Path, PathBuf};

use fw_archive::{write_text_atomic, ArchiveError};

/// Single opaque hex string on disk. Absent means nothing was sent yet.
pub struct DigestStore {
    path: PathBuf,
}

impl DigestStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Last sent digest. An unreadable file counts as never sent.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let digest = text.trim();
                (!digest.is_empty()).then(|| digest.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read last digest");
                None
            }
        }
    }

    pub fn save(&self, digest: &str) -> Result<(), ArchiveError> {
        write_text_atomic(&self.path, digest)
    }
}
