// reconcile.rs - One poll's lifecycle partition.
//
//   current ──classify──> Active ─────────sort──> active
//                   └───> JustCompleted ─┐
//   last_active - current_ids ──vanished─┴──────> to_archive
//
// Conservation: every record of `current` lands in exactly one of the two
// outputs, plus one `to_archive` entry per vanished id.

use std::collections::HashSet;

use fw_shipment::{ShipmentRecord, StatusRules};

/// Sort key for shipments without an expected arrival. Compares after every
/// real ISO date or date-time.
pub const MISSING_ARRIVAL: &str = "9999-12-31T23:59:59";

/// Result of reconciling one poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Still-open shipments, ascending by expected arrival.
    pub active: Vec<ShipmentRecord>,

    /// Completions to hand to the archive: status-completed first, then
    /// vanished ones.
    pub to_archive: Vec<ShipmentRecord>,

    /// How many of `to_archive` completed by status.
    pub just_completed: usize,

    /// How many of `to_archive` vanished from the carrier listing.
    pub vanished: usize,
}

/// Partition `current` against `last_active`.
///
/// Duplicate ids inside `current` are kept as-is. An empty `current`
/// completes the whole previous snapshot; callers guard against carrier
/// outages before getting here.
pub fn reconcile(
    current: Vec<ShipmentRecord>,
    last_active: Vec<ShipmentRecord>,
    rules: &StatusRules,
) -> Reconciliation {
    let current_ids: HashSet<String> = current.iter().map(|r| r.id.clone()).collect();

    let (mut to_archive, mut active): (Vec<_>, Vec<_>) = current
        .into_iter()
        .partition(|record| rules.is_completed(&record.status));
    let just_completed = to_archive.len();

    let vanished: Vec<ShipmentRecord> = last_active
        .into_iter()
        .filter(|record| !current_ids.contains(&record.id))
        .map(|mut record| {
            tracing::info!(
                id = %record.id,
                carrier = %record.carrier,
                "shipment vanished from source, archiving"
            );
            record.status = rules.vanished_status.clone();
            record
        })
        .collect();
    let vanished_count = vanished.len();
    to_archive.extend(vanished);

    sort_by_arrival(&mut active);

    tracing::debug!(
        active = active.len(),
        just_completed,
        vanished = vanished_count,
        "poll reconciled"
    );

    Reconciliation {
        active,
        to_archive,
        just_completed,
        vanished: vanished_count,
    }
}

/// Stable ascending sort by `expected_arrival`; records without one go last
/// in their original relative order.
pub fn sort_by_arrival(records: &mut [ShipmentRecord]) {
    records.sort_by(|a, b| arrival_key(a).cmp(arrival_key(b)));
}

fn arrival_key(record: &ShipmentRecord) -> &str {
    record.expected_arrival.as_deref().unwrap_or(MISSING_ARRIVAL)
}
