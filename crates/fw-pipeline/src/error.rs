// error.rs - Pipeline-level errors.

use fw_archive::ArchiveError;
use fw_notify::TransportError;
use fw_shipment::ShipmentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// fw.toml exists but does not parse.
    #[error("invalid config {path}: {source}")]
    Config {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid status rules: {0}")]
    Rules(#[from] ShipmentError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
