// run.rs - One reconciliation cycle followed by the notification step.

use std::path::Path;

use chrono::Utc;
use fw_pipeline::{build_notifier, CombinedFileSource, Cycle, PipelineConfig};

pub fn execute(
    config: &PipelineConfig,
    input: Option<&Path>,
    force: bool,
    no_notify: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let path = input.unwrap_or(&config.paths.raw_payloads);
    let source = CombinedFileSource::new(path);
    let now = Utc::now();

    let report = Cycle::new(config).run(&source, now);
    if report.skipped {
        println!(
            "No carrier data in {}; cycle skipped, {} active shipment(s) kept.",
            path.display(),
            report.active.len()
        );
    } else {
        println!(
            "Cycle complete: {} polled, {} active, {} completed, {} vanished, {} archived.",
            report.polled,
            report.active.len(),
            report.just_completed,
            report.vanished,
            report.archived
        );
        if let Some(report_path) = &report.report_path {
            println!("Report: {}", report_path.display());
        }
    }

    if no_notify {
        return Ok(());
    }

    let notifier = build_notifier(config, dry_run)?;
    let outcome = notifier.notify(&report.active, force, now);
    super::notify::print_outcome(&outcome);
    Ok(())
}
