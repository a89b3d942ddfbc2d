// archive.rs - Archive subcommands: list.

use clap::Subcommand;
use fw_archive::ArchiveStore;
use fw_pipeline::PipelineConfig;

use super::manual::truncate;

#[derive(Subcommand)]
pub enum ArchiveCommands {
    /// Show the most recently archived shipments.
    List {
        /// Number of records to show.
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

pub fn execute(cmd: &ArchiveCommands, config: &PipelineConfig) -> anyhow::Result<()> {
    match cmd {
        ArchiveCommands::List { limit } => {
            let archive = ArchiveStore::new(&config.paths.archive).load();
            if archive.is_empty() {
                println!("Archive is empty.");
                return Ok(());
            }

            let start = archive.len().saturating_sub(*limit);
            println!(
                "{:<12} {:<16} {:<20} {:<28} STATUS",
                "ARCHIVED", "CARRIER", "ID", "SENDER"
            );
            println!("{}", "-".repeat(100));
            for record in &archive[start..] {
                let archived = record
                    .archived_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<12} {:<16} {:<20} {:<28} {}",
                    archived,
                    record.carrier.display_name(),
                    truncate(&record.id, 20),
                    truncate(&record.sender, 28),
                    record.status
                );
            }
            println!();
            println!("{} of {} archived record(s).", archive.len() - start, archive.len());
        }
    }
    Ok(())
}
