// summary.rs - ReadySummary: the ready-for-pickup subset of the active set.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use fw_shipment::{Carrier, ShipmentRecord, StatusRules};

use crate::config::ExclusionRules;

const FIELD_SEP: &[u8] = b"\x1f";
const RECORD_SEP: &[u8] = b"\x1e";

/// Ready shipments grouped by carrier. Groups iterate in carrier order;
/// records keep their active-set order within a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadySummary {
    groups: BTreeMap<Carrier, Vec<ShipmentRecord>>,
}

impl ReadySummary {
    /// Collect ready, admitted shipments from `active`.
    pub fn collect(
        active: &[ShipmentRecord],
        rules: &StatusRules,
        exclusions: &ExclusionRules,
    ) -> Self {
        let mut groups: BTreeMap<Carrier, Vec<ShipmentRecord>> = BTreeMap::new();
        for record in active {
            if rules.is_ready(&record.status) && exclusions.admits(record) {
                groups.entry(record.carrier).or_default().push(record.clone());
            }
        }
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = (Carrier, &[ShipmentRecord])> {
        self.groups.iter().map(|(c, records)| (*c, records.as_slice()))
    }

    /// SHA-256 hex over the `(id, payment_status)` pairs only.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (_, records) in self.groups() {
            for record in records {
                hasher.update(record.id.as_bytes());
                hasher.update(FIELD_SEP);
                hasher.update(record.payment_status.as_bytes());
                hasher.update(RECORD_SEP);
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_shipment::Route;

    fn ready(carrier: Carrier, id: &str) -> ShipmentRecord {
        ShipmentRecord::new(carrier, id)
            .with_status("Прибыл на терминал")
            .with_payment("Оплачено")
            .with_route(Route::new("МСК", "АСТРА"))
    }

    #[test]
    fn only_ready_and_admitted_are_collected() {
        let active = vec![
            ready(Carrier::Pecom, "P1"),
            ready(Carrier::Pecom, "P2").with_status("В пути"),
            ready(Carrier::Dellin, "D1").with_route(Route::new("АСТРА", "ПЕНЗА")),
            ready(Carrier::Baikal, "B1").with_sender("ЮЖНЫЙ ФОРПОСТ"),
        ];
        let summary = ReadySummary::collect(&active, &StatusRules::default(), &ExclusionRules::default());
        assert_eq!(summary.len(), 1);
        let (carrier, records) = summary.groups().next().unwrap();
        assert_eq!(carrier, Carrier::Pecom);
        assert_eq!(records[0].id, "P1");
    }

    #[test]
    fn groups_follow_carrier_order_and_keep_input_order() {
        let active = vec![
            ready(Carrier::Baikal, "B1"),
            ready(Carrier::Dellin, "D2"),
            ready(Carrier::Dellin, "D1"),
        ];
        let summary = ReadySummary::collect(&active, &StatusRules::default(), &ExclusionRules::none());
        let order: Vec<_> = summary
            .groups()
            .flat_map(|(_, records)| records.iter().map(|r| r.id.as_str()))
            .collect();
        assert_eq!(order, ["D2", "D1", "B1"]);
    }

    #[test]
    fn digest_ignores_status_text_but_not_payment() {
        let rules = StatusRules::default();
        let exclusions = ExclusionRules::none();
        let base = vec![ready(Carrier::Pecom, "P1")];
        let reworded = vec![ready(Carrier::Pecom, "P1").with_status("Готов к выдаче")];
        let repaid = vec![ready(Carrier::Pecom, "P1").with_payment("Долг: 100")];

        let d0 = ReadySummary::collect(&base, &rules, &exclusions).digest();
        let d1 = ReadySummary::collect(&reworded, &rules, &exclusions).digest();
        let d2 = ReadySummary::collect(&repaid, &rules, &exclusions).digest();
        assert_eq!(d0, d1);
        assert_ne!(d0, d2);
        assert_eq!(d0.len(), 64);
    }

    #[test]
    fn digest_separates_fields() {
        let rules = StatusRules::default();
        let exclusions = ExclusionRules::none();
        let a = vec![ready(Carrier::Pecom, "P1").with_payment("2Оплачено")];
        let b = vec![ready(Carrier::Pecom, "P12").with_payment("Оплачено")];
        assert_ne!(
            ReadySummary::collect(&a, &rules, &exclusions).digest(),
            ReadySummary::collect(&b, &rules, &exclusions).digest()
        );
    }
}
