// format.rs - CarrierFormat: one implementation per carrier payload shape.
//
// Each carrier exposes its own nesting, field names and payment model. A
// CarrierFormat knows how to split a payload into per-shipment entries, how
// to turn one entry into a ShipmentRecord, and how to decide who pays for
// it. Adding a carrier means adding one implementation, nothing else.

use serde_json::Value;

use fw_shipment::{Carrier, PayerRole, ShipmentRecord};

use crate::error::CanonError;
use crate::normalize::NameNormalizer;

pub const PAID: &str = "Оплачено";
pub const UNPAID: &str = "Не оплачено";

/// Pluggable parser for one carrier's payload.
pub trait CarrierFormat: Send + Sync {
    /// The carrier this format parses.
    fn carrier(&self) -> Carrier;

    /// Split a whole payload into raw per-shipment entries.
    ///
    /// An unexpected payload shape yields no entries, never an error.
    fn entries<'a>(&self, payload: &'a Value) -> Vec<&'a Value>;

    /// Infer who pays for one raw entry from its payer identity fields.
    fn classify_payer_role(&self, entry: &Value) -> PayerRole;

    /// Build the canonical record for one raw entry.
    fn parse(&self, entry: &Value, names: &NameNormalizer) -> Result<ShipmentRecord, CanonError>;
}

/// Compare a payer tax id against the sender and recipient ids.
///
/// Recipient is checked first: when one party is on both sides of the
/// waybill it is the paying recipient that matters for pickup.
pub fn role_from_ids(
    payer: Option<&str>,
    sender: Option<&str>,
    recipient: Option<&str>,
) -> PayerRole {
    let Some(payer) = payer else {
        return PayerRole::Unknown;
    };
    if recipient == Some(payer) {
        PayerRole::Recipient
    } else if sender == Some(payer) {
        PayerRole::Sender
    } else {
        PayerRole::ThirdParty
    }
}

/// Combine per-line-item roles: agreement keeps the role, disagreement is
/// `Mixed`, no items is `Unknown`.
pub fn combine_roles(roles: impl IntoIterator<Item = PayerRole>) -> PayerRole {
    let mut combined: Option<PayerRole> = None;
    for role in roles {
        match combined {
            None => combined = Some(role),
            Some(existing) if existing != role => return PayerRole::Mixed,
            Some(_) => {}
        }
    }
    combined.unwrap_or(PayerRole::Unknown)
}

/// Render an amount without float noise or a trailing ".0".
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// "К оплате: <amount>" - computed as total minus already paid.
pub fn payment_due(amount: f64) -> String {
    format!("К оплате: {}", format_amount(amount))
}

/// "Долг: <amount>" - debt as reported by the carrier itself.
pub fn payment_owed(amount: f64) -> String {
    format!("Долг: {}", format_amount(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_ids_prefers_recipient() {
        assert_eq!(
            role_from_ids(Some("1"), Some("1"), Some("1")),
            PayerRole::Recipient
        );
        assert_eq!(
            role_from_ids(Some("1"), Some("1"), Some("2")),
            PayerRole::Sender
        );
        assert_eq!(
            role_from_ids(Some("3"), Some("1"), Some("2")),
            PayerRole::ThirdParty
        );
        assert_eq!(role_from_ids(None, Some("1"), Some("2")), PayerRole::Unknown);
    }

    #[test]
    fn combine_roles_detects_disagreement() {
        use PayerRole::*;
        assert_eq!(combine_roles([Recipient, Recipient]), Recipient);
        assert_eq!(combine_roles([Recipient, Sender]), Mixed);
        assert_eq!(combine_roles([]), Unknown);
    }

    #[test]
    fn amounts_render_compactly() {
        assert_eq!(format_amount(1200.0), "1200");
        assert_eq!(format_amount(0.1 + 0.2), "0.3");
        assert_eq!(payment_due(350.5), "К оплате: 350.5");
        assert_eq!(payment_owed(90.0), "Долг: 90");
    }
}
