// manual.rs - Manual subcommands: add, list, remove.
//
// Manual entries are merged into every cycle and leave the store once they
// reach a completed status.

use clap::Subcommand;
use fw_archive::ManualEntryStore;
use fw_pipeline::PipelineConfig;
use fw_shipment::{Carrier, Route, ShipmentRecord};

#[derive(Subcommand)]
pub enum ManualCommands {
    /// Add or replace a manual entry.
    Add {
        /// Entry id (defaults to the next free MEMO-NNNN).
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        status: String,
        #[arg(long)]
        sender: Option<String>,
        /// Origin city.
        #[arg(long)]
        from: Option<String>,
        /// Destination city.
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        payment: Option<String>,
        /// Expected arrival, e.g. 2025-03-05.
        #[arg(long)]
        arrival: Option<String>,
    },
    /// List manual entries.
    List,
    /// Remove a manual entry by id.
    Remove { id: String },
}

pub fn execute(cmd: &ManualCommands, config: &PipelineConfig) -> anyhow::Result<()> {
    let store = ManualEntryStore::new(&config.paths.manual_entries);
    match cmd {
        ManualCommands::Add {
            id,
            status,
            sender,
            from,
            to,
            payment,
            arrival,
        } => {
            let id = id.clone().unwrap_or_else(|| store.next_id());
            let record = build_entry(&id, status, sender, from, to, payment, arrival);
            store.upsert(record)?;
            println!("Manual entry {} saved.", id);
        }

        ManualCommands::List => {
            let entries = store.load();
            if entries.is_empty() {
                println!("No manual entries.");
                return Ok(());
            }
            println!("{:<12} {:<28} {:<24} STATUS", "ID", "SENDER", "ROUTE");
            println!("{}", "-".repeat(88));
            for entry in &entries {
                println!(
                    "{:<12} {:<28} {:<24} {}",
                    entry.id,
                    truncate(&entry.sender, 28),
                    truncate(&format!("{} -> {}", entry.route.origin, entry.route.destination), 24),
                    entry.status
                );
            }
        }

        ManualCommands::Remove { id } => {
            let removed = store.remove(id)?;
            println!("Manual entry {} removed ({}).", removed.id, removed.status);
        }
    }
    Ok(())
}

fn build_entry(
    id: &str,
    status: &str,
    sender: &Option<String>,
    from: &Option<String>,
    to: &Option<String>,
    payment: &Option<String>,
    arrival: &Option<String>,
) -> ShipmentRecord {
    let mut record = ShipmentRecord::new(Carrier::Manual, id).with_status(status);
    if let Some(sender) = sender {
        record = record.with_sender(sender.as_str());
    }
    if from.is_some() || to.is_some() {
        let default = Route::default();
        record = record.with_route(Route::new(
            from.clone().unwrap_or(default.origin),
            to.clone().unwrap_or(default.destination),
        ));
    }
    if let Some(payment) = payment {
        record = record.with_payment(payment.as_str());
    }
    if let Some(arrival) = arrival {
        record = record.with_arrival(arrival.as_str());
    }
    record
}

/// Truncate to `max` characters, marking the cut with "...".
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
