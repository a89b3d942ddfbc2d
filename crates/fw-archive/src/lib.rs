//! # fw-archive
//!
//! File-backed persistence for Freight Watch.
//!
//! Every file is read fully, changed in memory and replaced atomically, so a
//! crash mid-write leaves the previous version in place. A single writer is
//! assumed; nothing here locks across processes.
//!
//! ## Key components
//!
//! - [`ArchiveStore`]: append-only, id-deduplicated history of completed shipments
//! - [`ActiveStateStore`]: the last poll's active set, overwritten each cycle
//! - [`ManualEntryStore`]: operator-entered reminder records
//! - [`ReportStore`]: dated report snapshots with age-based retention
//! - [`atomic`]: temp-file-then-rename writes and tolerant JSON reads

pub mod archive;
pub mod atomic;
pub mod error;
pub mod manual;
pub mod report;
pub mod state;

pub use archive::ArchiveStore;
pub use atomic::{read_json, write_json_atomic, write_text_atomic};
pub use error::ArchiveError;
pub use manual::{ManualEntryStore, MANUAL_ID_PREFIX};
pub use report::{ReportMetadata, ReportSnapshot, ReportStore, DEFAULT_RETENTION_DAYS};
pub use state::ActiveStateStore;
