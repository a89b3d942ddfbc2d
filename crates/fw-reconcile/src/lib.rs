//! # fw-reconcile
//!
//! Decides, for every poll, which shipments stay active and which move to
//! the archive.
//!
//! A shipment completes either because its carrier status says so or
//! because it was active last poll and is no longer reported at all. The
//! second case is a guess: the carrier API only lists open shipments.
//!
//! ## Key components
//!
//! - [`reconcile`]: partition the current poll against the previous active set
//! - [`sort_by_arrival`]: stable ascending arrival order, unknown dates last
//! - [`merge_manual`] / [`prune_manual`]: operator-entered reminders that ride
//!   along with every poll until they leave the active set

pub mod manual;
pub mod reconcile;

pub use manual::{merge_manual, prune_manual};
pub use reconcile::{reconcile, sort_by_arrival, Reconciliation, MISSING_ARRIVAL};
