// baikal.rs - Байкал Сервис: a bare array of orders or `{"orderList": [...]}`.
//
// Parties, route and payer come from the first cargo line; measurements are
// summed over all lines. An order without cargo lines carries nothing to
// track and is rejected.

use serde_json::Value;

use fw_shipment::{Carrier, Measurements, PayerRole, Route, ShipmentRecord, UNKNOWN_TEXT};

use super::{base_record, require_id, require_object};
use crate::error::CanonError;
use crate::format::{payment_due, role_from_ids, CarrierFormat};
use crate::normalize::NameNormalizer;
use crate::value::{at, count, first, items, number, text};

/// Marker the carrier returns in place of an order when it has nothing.
const PLACEHOLDER_STATUS: &str = "empty";

#[derive(Debug, Default, Clone, Copy)]
pub struct BaikalFormat;

impl BaikalFormat {
    fn measurements(cargo_list: &[Value]) -> Measurements {
        cargo_list
            .iter()
            .map(|line| at(line, &["cargo"]))
            .fold(Measurements::default(), |acc, cargo| Measurements {
                pieces: acc.pieces.saturating_add(count(at(cargo, &["places"]))),
                weight_kg: acc.weight_kg + number(at(cargo, &["weight"])),
                volume_m3: acc.volume_m3 + number(at(cargo, &["volume"])),
            })
    }

    fn payment(entry: &Value) -> String {
        let debt = number(at(entry, &["total"])) - number(at(entry, &["paid"]));
        if debt > 0.0 {
            payment_due(debt)
        } else {
            text(at(entry, &["paidStatus"])).unwrap_or_else(|| UNKNOWN_TEXT.to_string())
        }
    }
}

impl CarrierFormat for BaikalFormat {
    fn carrier(&self) -> Carrier {
        Carrier::Baikal
    }

    fn entries<'a>(&self, payload: &'a Value) -> Vec<&'a Value> {
        let orders = match payload {
            Value::Array(orders) => orders.as_slice(),
            _ => items(at(payload, &["orderList"])),
        };
        orders.iter().collect()
    }

    fn classify_payer_role(&self, entry: &Value) -> PayerRole {
        let line = first(at(entry, &["cargoList"]));
        let payer = text(at(first(at(line, &["services"])), &["payer", "inn"]));
        role_from_ids(
            payer.as_deref(),
            text(at(line, &["consignor", "inn"])).as_deref(),
            text(at(line, &["consignee", "inn"])).as_deref(),
        )
    }

    fn parse(&self, entry: &Value, names: &NameNormalizer) -> Result<ShipmentRecord, CanonError> {
        require_object(self.carrier(), entry)?;
        if text(at(entry, &["status"])).as_deref() == Some(PLACEHOLDER_STATUS) {
            return Err(CanonError::Placeholder { carrier: self.carrier() });
        }
        let id = require_id(self.carrier(), at(entry, &["number"]))?;

        let cargo_list = items(at(entry, &["cargoList"]));
        let Some(first) = cargo_list.first() else {
            return Err(CanonError::EmptyCargo { carrier: self.carrier(), id });
        };

        let mut record = base_record(self.carrier(), id, text(at(entry, &["orderstatus"])));
        record.sender = names.party(text(at(first, &["consignor", "name"])).as_deref());
        record.recipient = names.party(text(at(first, &["consignee", "name"])).as_deref());
        record.payer_role = self.classify_payer_role(entry);
        record.measurements = Self::measurements(cargo_list);
        record.route = Route::new(
            names.city(text(at(first, &["departure", "name"])).as_deref()),
            names.city(text(at(first, &["destination", "name"])).as_deref()),
        );
        record.expected_arrival = text(at(first, &["dateArrivalPlane"]))
            .or_else(|| text(at(entry, &["dateArrivalPlane"])));
        record.payment_status = Self::payment(entry);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order() -> Value {
        json!({
            "number": "BK-0091",
            "orderstatus": "Груз прибыл, готов к выдаче",
            "paidStatus": "Оплачено",
            "total": 3000, "paid": 3000,
            "cargoList": [
                {
                    "cargo": {"places": 2, "weight": "40", "volume": "0.3"},
                    "consignor": {"name": "ООО Восток-Снаб", "inn": "10"},
                    "consignee": {"name": "ООО Прием", "inn": "20"},
                    "departure": {"name": "Новосибирск"},
                    "destination": {"name": "Астрахань"},
                    "dateArrivalPlane": "2025-04-01",
                    "services": [{"payer": {"inn": "10"}}]
                },
                {"cargo": {"places": "1", "weight": 5.5, "volume": 0.2}}
            ]
        })
    }

    #[test]
    fn order_sums_cargo_lines() {
        let record = BaikalFormat.parse(&order(), &NameNormalizer::default()).unwrap();
        assert_eq!(record.id, "BK-0091");
        assert_eq!(record.status, "Груз прибыл, готов к выдаче");
        assert_eq!(record.measurements.pieces, 3);
        assert_eq!(record.measurements.weight_kg, 45.5);
        assert!((record.measurements.volume_m3 - 0.5).abs() < 1e-9);
        assert_eq!(record.sender, "ООО ВОСТОК-СНАБ");
        assert_eq!(record.route.to_string(), "НСК -> АСТРА");
        assert_eq!(record.expected_arrival.as_deref(), Some("2025-04-01"));
        assert_eq!(record.payment_status, "Оплачено");
        assert_eq!(record.payer_role, PayerRole::Sender);
    }

    #[test]
    fn unpaid_balance_reports_amount_due() {
        let mut entry = order();
        entry["paid"] = json!(1000);
        let record = BaikalFormat.parse(&entry, &NameNormalizer::default()).unwrap();
        assert_eq!(record.payment_status, "К оплате: 2000");
    }

    #[test]
    fn empty_cargo_list_is_rejected() {
        let entry = json!({"number": "BK-1", "orderstatus": "В пути", "cargoList": []});
        let err = BaikalFormat
            .parse(&entry, &NameNormalizer::default())
            .unwrap_err();
        assert_eq!(
            err,
            CanonError::EmptyCargo { carrier: Carrier::Baikal, id: "BK-1".to_string() }
        );
    }

    #[test]
    fn placeholder_entry_is_rejected() {
        let err = BaikalFormat
            .parse(&json!({"status": "empty"}), &NameNormalizer::default())
            .unwrap_err();
        assert_eq!(err, CanonError::Placeholder { carrier: Carrier::Baikal });
    }

    #[test]
    fn both_payload_shapes_are_accepted() {
        let bare = json!([order(), order()]);
        let wrapped = json!({"orderList": [order()]});
        assert_eq!(BaikalFormat.entries(&bare).len(), 2);
        assert_eq!(BaikalFormat.entries(&wrapped).len(), 1);
        assert!(BaikalFormat.entries(&json!({"orders": []})).is_empty());
    }

    #[test]
    fn arrival_falls_back_to_order_level() {
        let mut entry = order();
        entry["cargoList"][0]
            .as_object_mut()
            .unwrap()
            .remove("dateArrivalPlane");
        entry["dateArrivalPlane"] = json!("2025-05-05");
        let record = BaikalFormat.parse(&entry, &NameNormalizer::default()).unwrap();
        assert_eq!(record.expected_arrival.as_deref(), Some("2025-05-05"));
    }
}
