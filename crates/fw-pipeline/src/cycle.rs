// cycle.rs - Cycle: one reconciliation pass over fresh carrier payloads.
//
// Persisted state is read fully at the start and written after reconcile.
// A write failure is logged and the cycle carries on with what it has in
// memory; the next cycle retries from whatever made it to disk.
//
// The archive is committed first. Until it holds this cycle's completions,
// the previous active snapshot and manual entries stay on disk, so the same
// completions are found again next cycle.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use fw_archive::{ActiveStateStore, ArchiveStore, ManualEntryStore, ReportSnapshot, ReportStore};
use fw_canon::Canonicalizer;
use fw_reconcile::{merge_manual, prune_manual, reconcile};
use fw_shipment::ShipmentRecord;

use crate::config::PipelineConfig;
use crate::source::PayloadSource;

/// What one cycle did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// No carrier produced a payload; nothing was reconciled or written.
    pub skipped: bool,

    /// Carriers that produced a payload.
    pub sources_with_data: usize,

    /// Canonical records from carriers plus merged manual entries.
    pub polled: usize,

    /// Active set after this cycle. On a skipped cycle, the previous one.
    pub active: Vec<ShipmentRecord>,

    pub just_completed: usize,
    pub vanished: usize,

    /// Records newly added to the archive.
    pub archived: usize,

    pub report_path: Option<PathBuf>,
    pub pruned_reports: usize,
}

pub struct Cycle<'a> {
    config: &'a PipelineConfig,
    canonicalizer: Canonicalizer,
}

impl<'a> Cycle<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            canonicalizer: Canonicalizer::new(config.normalizer.clone()),
        }
    }

    /// Replace the canonicalizer, e.g. to register an extra carrier format.
    pub fn with_canonicalizer(mut self, canonicalizer: Canonicalizer) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    pub fn run(&self, source: &dyn PayloadSource, now: DateTime<Utc>) -> CycleReport {
        let paths = &self.config.paths;
        let state = ActiveStateStore::new(&paths.active_state);
        let manual_store = ManualEntryStore::new(&paths.manual_entries);

        let payloads = source.fetch();
        let sources_with_data = payloads.iter().filter(|(_, p)| p.is_some()).count();

        // A total outage looks exactly like "everything was delivered".
        if sources_with_data == 0 {
            tracing::warn!(
                source = source.name(),
                "no carrier returned data, skipping cycle and keeping previous state"
            );
            return CycleReport {
                skipped: true,
                active: state.load(),
                ..CycleReport::default()
            };
        }

        let canonical = self.canonicalizer.canonicalize_all(&payloads);
        let manual = manual_store.load();
        let current = merge_manual(canonical, &manual);
        let polled = current.len();

        let last_active = state.load();
        let result = reconcile(current, last_active, &self.config.status);

        let archive = ArchiveStore::new(&paths.archive);
        let archive_committed = match archive.append(result.to_archive, now.date_naive()) {
            Ok(added) => Some(added),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "archive append failed, keeping previous active snapshot"
                );
                None
            }
        };
        let archived = archive_committed.unwrap_or(0);

        if archive_committed.is_some() {
            if let Err(e) = state.save(&result.active) {
                tracing::error!(error = %e, "failed to save active snapshot");
            }

            let remaining = prune_manual(manual.clone(), &result.active);
            if remaining.len() != manual.len() {
                if let Err(e) = manual_store.save(&remaining) {
                    tracing::error!(error = %e, "failed to save manual entries");
                }
            }
        }

        let reports = ReportStore::new(&paths.report_dir);
        let snapshot = ReportSnapshot::new(now, result.active.clone(), archive.load());
        let report_path = match reports.write(&snapshot) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(error = %e, "failed to write report snapshot");
                None
            }
        };

        let pruned_reports = match reports.prune(self.config.retention.report_days, now) {
            Ok(removed) => removed.len(),
            Err(e) => {
                tracing::warn!(error = %e, "report retention failed");
                0
            }
        };

        tracing::info!(
            polled,
            active = result.active.len(),
            just_completed = result.just_completed,
            vanished = result.vanished,
            archived,
            "cycle complete"
        );

        CycleReport {
            skipped: false,
            sources_with_data,
            polled,
            active: result.active,
            just_completed: result.just_completed,
            vanished: result.vanished,
            archived,
            report_path,
            pruned_reports,
        }
    }
}
