// report.rs - Report subcommands: show, prune.

use chrono::Utc;
use clap::Subcommand;
use fw_archive::ReportStore;
use fw_pipeline::PipelineConfig;

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Show the metadata of the latest report snapshot.
    Show,
    /// Delete dated report files older than the retention horizon.
    Prune {
        /// Override the configured retention (days).
        #[arg(long)]
        days: Option<u32>,
    },
}

pub fn execute(cmd: &ReportCommands, config: &PipelineConfig) -> anyhow::Result<()> {
    let reports = ReportStore::new(&config.paths.report_dir);
    match cmd {
        ReportCommands::Show => match reports.latest()? {
            Some(snapshot) => {
                let meta = &snapshot.metadata;
                println!("Report:   {}", snapshot.file_name());
                println!("Created:  {}", meta.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
                println!("Active:   {}", meta.active_count);
                println!("Archived: {}", meta.archive_count);
            }
            None => println!("No reports in {}", reports.dir().display()),
        },

        ReportCommands::Prune { days } => {
            let days = days.unwrap_or(config.retention.report_days);
            let removed = reports.prune(days, Utc::now())?;
            for path in &removed {
                println!("Removed {}", path.display());
            }
            println!("{} report file(s) older than {} day(s) removed.", removed.len(), days);
        }
    }
    Ok(())
}
