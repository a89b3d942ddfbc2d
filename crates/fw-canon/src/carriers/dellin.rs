// dellin.rs - Деловые Линии: `{"orders": [...]}`.

use serde_json::Value;

use fw_shipment::{Carrier, Measurements, PayerRole, Route, ShipmentRecord};

use super::{base_record, require_id, require_object};
use crate::error::CanonError;
use crate::format::{payment_due, role_from_ids, CarrierFormat, PAID, UNPAID};
use crate::normalize::NameNormalizer;
use crate::value::{at, count, flag, items, number, text};

#[derive(Debug, Default, Clone, Copy)]
pub struct DellinFormat;

impl DellinFormat {
    /// "<stateName> (<progressPercent>%)", or just the state name when the
    /// carrier omits progress.
    fn status(entry: &Value) -> Option<String> {
        let state = text(at(entry, &["stateName"]))?;
        match text(at(entry, &["progressPercent"])) {
            Some(progress) => Some(format!("{state} ({progress}%)")),
            None => Some(state),
        }
    }

    fn payment(entry: &Value) -> String {
        let debt = number(at(entry, &["totalSum"])) - number(at(entry, &["paidSum"]));
        if debt > 0.0 {
            payment_due(debt)
        } else if flag(at(entry, &["isPaid"])) {
            PAID.to_string()
        } else {
            UNPAID.to_string()
        }
    }
}

impl CarrierFormat for DellinFormat {
    fn carrier(&self) -> Carrier {
        Carrier::Dellin
    }

    fn entries<'a>(&self, payload: &'a Value) -> Vec<&'a Value> {
        items(at(payload, &["orders"])).iter().collect()
    }

    fn classify_payer_role(&self, entry: &Value) -> PayerRole {
        role_from_ids(
            text(at(entry, &["payer", "inn"])).as_deref(),
            text(at(entry, &["sender", "inn"])).as_deref(),
            text(at(entry, &["receiver", "inn"])).as_deref(),
        )
    }

    fn parse(&self, entry: &Value, names: &NameNormalizer) -> Result<ShipmentRecord, CanonError> {
        require_object(self.carrier(), entry)?;
        let id = require_id(self.carrier(), at(entry, &["orderId"]))?;

        let freight = at(entry, &["freight"]);
        let mut record = base_record(self.carrier(), id, Self::status(entry));
        record.sender = names.party(text(at(entry, &["sender", "name"])).as_deref());
        record.recipient = names.party(text(at(entry, &["receiver", "name"])).as_deref());
        record.payer_role = self.classify_payer_role(entry);
        record.measurements = Measurements {
            pieces: count(at(freight, &["places"])),
            weight_kg: number(at(freight, &["weight"])),
            volume_m3: number(at(freight, &["volume"])),
        };
        record.route = Route::new(
            names.city(text(at(entry, &["derival", "city"])).as_deref()),
            names.city(text(at(entry, &["arrival", "city"])).as_deref()),
        );
        record.expected_arrival = text(at(entry, &["orderDates", "arrivalToOspReceiver"]));
        record.payment_status = Self::payment(entry);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_shipment::UNKNOWN_NAME;
    use serde_json::json;

    fn parse(entry: Value) -> Result<ShipmentRecord, CanonError> {
        DellinFormat.parse(&entry, &NameNormalizer::default())
    }

    #[test]
    fn minimal_order_in_transit() {
        let payload = json!({"orders": [{
            "orderId": "X1",
            "stateName": "В пути",
            "progressPercent": 40,
            "isPaid": false,
            "freight": {"places": 1, "weight": "10", "volume": "0.5"}
        }]});
        let entries = DellinFormat.entries(&payload);
        assert_eq!(entries.len(), 1);

        let record = DellinFormat
            .parse(entries[0], &NameNormalizer::default())
            .unwrap();
        assert_eq!(record.id, "X1");
        assert_eq!(record.status, "В пути (40%)");
        assert_eq!(record.payment_status, "Не оплачено");
        assert_eq!(record.measurements.pieces, 1);
        assert_eq!(record.measurements.weight_kg, 10.0);
        assert_eq!(record.measurements.volume_m3, 0.5);
        assert_eq!(record.sender, UNKNOWN_NAME);
        assert_eq!(record.route, Route::default());
        assert_eq!(record.payer_role, PayerRole::Unknown);
        assert!(!record.is_manual);
    }

    #[test]
    fn full_order_maps_every_field() {
        let record = parse(json!({
            "orderId": 77001,
            "stateName": "Прибыл на терминал",
            "progressPercent": "90",
            "isPaid": true,
            "totalSum": 1500, "paidSum": 1500,
            "sender": {"name": "ООО \"Вектор\"", "inn": "111"},
            "receiver": {"name": "Индивидуальный предприниматель Петров", "inn": "222"},
            "payer": {"inn": "222"},
            "derival": {"city": "г. Москва"},
            "arrival": {"city": "Астрахань"},
            "orderDates": {"arrivalToOspReceiver": "2025-03-02"},
            "freight": {"places": "3", "weight": 120.5, "volume": 1.2}
        }))
        .unwrap();
        assert_eq!(record.id, "77001");
        assert_eq!(record.status, "Прибыл на терминал (90%)");
        assert_eq!(record.sender, "ООО ВЕКТОР");
        assert_eq!(record.recipient, "ИП ПЕТРОВ");
        assert_eq!(record.payer_role, PayerRole::Recipient);
        assert_eq!(record.route.to_string(), "МСК -> АСТРА");
        assert_eq!(record.expected_arrival.as_deref(), Some("2025-03-02"));
        assert_eq!(record.payment_status, "Оплачено");
    }

    #[test]
    fn outstanding_sum_reports_amount_due() {
        let record = parse(json!({
            "orderId": "D2", "stateName": "В пути",
            "isPaid": false, "totalSum": "2000", "paidSum": 800
        }))
        .unwrap();
        assert_eq!(record.payment_status, "К оплате: 1200");
        assert_eq!(record.status, "В пути");
    }

    #[test]
    fn missing_id_is_an_error() {
        let err = parse(json!({"stateName": "В пути"})).unwrap_err();
        assert_eq!(err, CanonError::MissingId { carrier: Carrier::Dellin });
    }

    #[test]
    fn unexpected_payload_shape_has_no_entries() {
        assert!(DellinFormat.entries(&json!({"cargos": []})).is_empty());
        assert!(DellinFormat.entries(&json!("oops")).is_empty());
    }

    #[test]
    fn payer_matching_sender() {
        let entry = json!({"payer": {"inn": "1"}, "sender": {"inn": "1"}, "receiver": {"inn": "2"}});
        assert_eq!(DellinFormat.classify_payer_role(&entry), PayerRole::Sender);
        let entry = json!({"payer": {"inn": "9"}, "sender": {"inn": "1"}, "receiver": {"inn": "2"}});
        assert_eq!(DellinFormat.classify_payer_role(&entry), PayerRole::ThirdParty);
    }
}
