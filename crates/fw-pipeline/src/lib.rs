//! # fw-pipeline
//!
//! One Freight Watch reconciliation cycle, end to end:
//!
//! ```text
//! fetch -> outage guard -> canonicalize -> + manual entries -> reconcile
//!   -> archive append -> save active -> prune manual -> report -> prune reports
//! ```
//!
//! Notification is a separate step the caller runs with the cycle's active
//! set, so a cycle can run without contacting anyone.
//!
//! ## Key components
//!
//! - [`PipelineConfig`]: `fw.toml` plus environment overrides and data file layout
//! - [`PayloadSource`]: raw carrier payloads for one cycle
//! - [`Cycle`]: runs the stages above and reports what happened
//! - [`build_notifier`]: notifier wired from configuration

pub mod config;
pub mod cycle;
pub mod error;
pub mod notify;
pub mod source;

pub use config::{DataPaths, PipelineConfig, RetentionConfig, CONFIG_FILE};
pub use cycle::{Cycle, CycleReport};
pub use error::PipelineError;
pub use notify::build_notifier;
pub use source::{CombinedFileSource, PayloadSource, StaticSource};
