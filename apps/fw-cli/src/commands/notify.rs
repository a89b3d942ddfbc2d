// notify.rs - Notify subcommand: summary for the persisted active set.

use chrono::Utc;
use fw_archive::ActiveStateStore;
use fw_notify::NotifyOutcome;
use fw_pipeline::{build_notifier, PipelineConfig};

pub fn execute(config: &PipelineConfig, force: bool, dry_run: bool) -> anyhow::Result<()> {
    let active = ActiveStateStore::new(&config.paths.active_state).load();
    let notifier = build_notifier(config, dry_run)?;
    let outcome = notifier.notify(&active, force, Utc::now());
    print_outcome(&outcome);
    Ok(())
}

pub(crate) fn print_outcome(outcome: &NotifyOutcome) {
    if outcome.sent {
        println!("Notification sent ({} ready).", outcome.ready_count);
    } else {
        println!(
            "Notification not sent ({} ready, unchanged or undelivered).",
            outcome.ready_count
        );
    }
}
