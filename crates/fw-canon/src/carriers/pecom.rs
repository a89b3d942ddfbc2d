// pecom.rs - ПЭК: `{"cargos": [...]}`.
//
// Payer identity lives on each billed line item, not on the cargo, so the
// role is combined across `services.items[]`.

use serde_json::Value;

use fw_shipment::{Carrier, Measurements, PayerRole, Route, ShipmentRecord};

use super::{base_record, require_id, require_object};
use crate::error::CanonError;
use crate::format::{combine_roles, payment_owed, role_from_ids, CarrierFormat, PAID};
use crate::normalize::NameNormalizer;
use crate::value::{at, count, items, number, text};

#[derive(Debug, Default, Clone, Copy)]
pub struct PecomFormat;

impl CarrierFormat for PecomFormat {
    fn carrier(&self) -> Carrier {
        Carrier::Pecom
    }

    fn entries<'a>(&self, payload: &'a Value) -> Vec<&'a Value> {
        items(at(payload, &["cargos"])).iter().collect()
    }

    fn classify_payer_role(&self, entry: &Value) -> PayerRole {
        let sender = text(at(entry, &["sender", "inn"]));
        let recipient = text(at(entry, &["receiver", "inn"]));
        combine_roles(
            items(at(entry, &["services", "items"]))
                .iter()
                .filter_map(|item| text(at(item, &["payerInn"])))
                .map(|payer| role_from_ids(Some(payer.as_str()), sender.as_deref(), recipient.as_deref())),
        )
    }

    fn parse(&self, entry: &Value, names: &NameNormalizer) -> Result<ShipmentRecord, CanonError> {
        require_object(self.carrier(), entry)?;
        let cargo = at(entry, &["cargo"]);
        let id = require_id(self.carrier(), at(cargo, &["cargoBarCode"]))?;

        let mut record = base_record(self.carrier(), id, text(at(entry, &["info", "cargoStatus"])));
        record.sender = names.party(text(at(entry, &["sender", "sender"])).as_deref());
        record.recipient = names.party(text(at(entry, &["receiver", "receiver"])).as_deref());
        record.payer_role = self.classify_payer_role(entry);
        record.measurements = Measurements {
            pieces: count(at(cargo, &["amount"])),
            weight_kg: number(at(cargo, &["weight"])),
            volume_m3: number(at(cargo, &["volume"])),
        };
        record.route = Route::new(
            names.city(text(at(entry, &["sender", "branchInfo", "city"])).as_deref()),
            names.city(text(at(entry, &["receiver", "branch", "city"])).as_deref()),
        );
        record.expected_arrival = text(at(entry, &["info", "arrivalPlanDateTime"]));

        let debt = number(at(entry, &["services", "debt"]));
        record.payment_status = if debt > 0.0 {
            payment_owed(debt)
        } else {
            PAID.to_string()
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cargo_entry() -> Value {
        json!({
            "cargo": {"cargoBarCode": "PK-5501", "amount": 2, "weight": "35,5", "volume": "0.4"},
            "info": {"cargoStatus": "Ожидает выдачи на складе", "arrivalPlanDateTime": "2025-02-10T12:00:00"},
            "sender": {"sender": "«Южный Форпост»", "inn": "100", "branchInfo": {"city": "Краснодар"}},
            "receiver": {"receiver": "ООО Прием", "inn": "200", "branch": {"city": "г. Астрахань"}},
            "services": {"debt": 0, "items": [{"payerInn": "200"}, {"payerInn": "200"}]}
        })
    }

    #[test]
    fn cargo_maps_every_field() {
        let record = PecomFormat
            .parse(&cargo_entry(), &NameNormalizer::default())
            .unwrap();
        assert_eq!(record.id, "PK-5501");
        assert_eq!(record.status, "Ожидает выдачи на складе");
        assert_eq!(record.sender, "ЮЖНЫЙ ФОРПОСТ");
        assert_eq!(record.recipient, "ООО ПРИЕМ");
        assert_eq!(record.measurements.pieces, 2);
        assert_eq!(record.measurements.weight_kg, 35.5);
        assert_eq!(record.route.to_string(), "КРД -> АСТРА");
        assert_eq!(record.expected_arrival.as_deref(), Some("2025-02-10T12:00:00"));
        assert_eq!(record.payment_status, "Оплачено");
        assert_eq!(record.payer_role, PayerRole::Recipient);
    }

    #[test]
    fn positive_debt_is_reported() {
        let mut entry = cargo_entry();
        entry["services"]["debt"] = json!(450.0);
        let record = PecomFormat.parse(&entry, &NameNormalizer::default()).unwrap();
        assert_eq!(record.payment_status, "Долг: 450");
    }

    #[test]
    fn disagreeing_line_items_are_mixed() {
        let mut entry = cargo_entry();
        entry["services"]["items"] = json!([{"payerInn": "100"}, {"payerInn": "200"}]);
        assert_eq!(PecomFormat.classify_payer_role(&entry), PayerRole::Mixed);

        entry["services"]["items"] = json!([]);
        assert_eq!(PecomFormat.classify_payer_role(&entry), PayerRole::Unknown);
    }

    #[test]
    fn missing_barcode_is_an_error() {
        let entry = json!({"cargo": {}, "info": {"cargoStatus": "В пути"}});
        let err = PecomFormat
            .parse(&entry, &NameNormalizer::default())
            .unwrap_err();
        assert_eq!(err, CanonError::MissingId { carrier: Carrier::Pecom });
    }
}
