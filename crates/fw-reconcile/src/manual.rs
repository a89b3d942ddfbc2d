// manual.rs - Operator-entered reminders merged into each poll.
//
// A manual entry is reported by no carrier. It enters the poll input as if
// a carrier had listed it, so it stays active until its status is edited to
// a completed one (or the entry is removed, which makes it vanish).

use std::collections::HashSet;

use fw_shipment::ShipmentRecord;

/// Append manual entries to the carrier records, forcing `is_manual`.
pub fn merge_manual(
    mut carrier_records: Vec<ShipmentRecord>,
    manual: &[ShipmentRecord],
) -> Vec<ShipmentRecord> {
    carrier_records.extend(manual.iter().cloned().map(|mut entry| {
        entry.is_manual = true;
        entry
    }));
    carrier_records
}

/// Keep only the manual entries whose id is still in the active set.
///
/// Returns the surviving entries; the caller persists them.
pub fn prune_manual(manual: Vec<ShipmentRecord>, active: &[ShipmentRecord]) -> Vec<ShipmentRecord> {
    let active_ids: HashSet<&str> = active.iter().map(|r| r.id.as_str()).collect();
    let before = manual.len();
    let kept: Vec<_> = manual
        .into_iter()
        .filter(|entry| active_ids.contains(entry.id.as_str()))
        .collect();
    if kept.len() != before {
        tracing::info!(removed = before - kept.len(), "pruned completed manual entries");
    }
    kept
}
