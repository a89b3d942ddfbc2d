//! # fw-cli
//!
//! Command-line interface for Freight Watch. One invocation runs one step;
//! scheduling is left to cron or a systemd timer.
//!
//! - `fw run` - reconcile the latest carrier payloads, then notify
//! - `fw notify` - send the ready-for-pickup summary for the current active set
//! - `fw manual add/list/remove` - operator-entered reminder shipments
//! - `fw archive list` - inspect completed shipments
//! - `fw report show/prune` - inspect or prune dated report snapshots

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fw_pipeline::PipelineConfig;
use tracing_subscriber::EnvFilter;

/// Freight Watch - shipment reconciliation and pickup notifications.
#[derive(Parser)]
#[command(name = "fw", version, about)]
struct Cli {
    /// Data directory holding fw.toml, snapshots, archive and reports.
    #[arg(long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one reconciliation cycle, then notify.
    Run {
        /// Send the summary even if it was already sent.
        #[arg(long)]
        force: bool,
        /// Skip the notification step.
        #[arg(long)]
        no_notify: bool,
        /// Print the summary instead of sending it.
        #[arg(long)]
        dry_run: bool,
        /// Raw payload document (defaults to <data-dir>/raw_payloads.json).
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Send the ready-for-pickup summary for the last active set.
    Notify {
        #[arg(long)]
        force: bool,
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage manual reminder entries.
    Manual {
        #[command(subcommand)]
        command: commands::manual::ManualCommands,
    },
    /// Inspect the archive of completed shipments.
    Archive {
        #[command(subcommand)]
        command: commands::archive::ArchiveCommands,
    },
    /// Inspect or prune dated report snapshots.
    Report {
        #[command(subcommand)]
        command: commands::report::ReportCommands,
    },
}

fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::from_default_env();
    for krate in ["fw", "fw_pipeline", "fw_canon", "fw_reconcile", "fw_archive", "fw_notify"] {
        filter = filter.add_directive(format!("{krate}={level}").parse()?);
    }

    // Logs go to stderr; stdout carries command output and dry-run messages.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json).context("invalid log filter")?;

    let data_dir = cli.data_dir.canonicalize().unwrap_or(cli.data_dir);
    let config = PipelineConfig::for_data_dir(&data_dir);
    tracing::debug!(data_dir = %data_dir.display(), "configuration loaded");

    match &cli.command {
        Commands::Run {
            force,
            no_notify,
            dry_run,
            input,
        } => commands::run::execute(&config, input.as_deref(), *force, *no_notify, *dry_run),
        Commands::Notify { force, dry_run } => commands::notify::execute(&config, *force, *dry_run),
        Commands::Manual { command } => commands::manual::execute(command, &config),
        Commands::Archive { command } => commands::archive::execute(command, &config),
        Commands::Report { command } => commands::report::execute(command, &config),
    }
}
