// record.rs - ShipmentRecord: one trackable freight movement.
//
// A ShipmentRecord is rebuilt from scratch on every poll. No identity
// survives a poll except through the `id` string, which is unique per
// carrier and unique within the active set at any instant.
//
// The record moves through three logical states:
//   Active -> JustCompleted (this poll only) -> Archived
// Once archived it is immutable except for the one-time `archived_at` stamp.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel for absent free-text fields (status, payment).
pub const UNKNOWN_TEXT: &str = "Н/Д";

/// Sentinel for absent or unusable party and city names.
pub const UNKNOWN_NAME: &str = "???";

/// The freight carrier a shipment belongs to.
///
/// `Manual` marks operator-entered reminders that no carrier API reports.
/// It is the serde default so side-channel entries may omit the field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    Dellin,
    Pecom,
    Baikal,
    #[default]
    Manual,
}

impl Carrier {
    /// Carriers that are polled through an API.
    pub const POLLED: [Carrier; 3] = [Carrier::Dellin, Carrier::Pecom, Carrier::Baikal];

    /// Human-facing carrier name used in summaries and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Carrier::Dellin => "Деловые Линии",
            Carrier::Pecom => "ПЭК",
            Carrier::Baikal => "Байкал Сервис",
            Carrier::Manual => "Памятка",
        }
    }

    /// Key under which the fetch stage stores this carrier's raw payload.
    pub fn source_key(&self) -> &'static str {
        match self {
            Carrier::Dellin => "Dellin",
            Carrier::Pecom => "Pecom",
            Carrier::Baikal => "Baikal",
            Carrier::Manual => "Manual",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Carrier::Dellin => write!(f, "dellin"),
            Carrier::Pecom => write!(f, "pecom"),
            Carrier::Baikal => write!(f, "baikal"),
            Carrier::Manual => write!(f, "manual"),
        }
    }
}

/// Who pays for the shipment, inferred from carrier payer identity fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayerRole {
    Sender,
    Recipient,
    ThirdParty,
    /// Several line items name different payers.
    Mixed,
    #[default]
    Unknown,
}

impl fmt::Display for PayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayerRole::Sender => write!(f, "sender"),
            PayerRole::Recipient => write!(f, "recipient"),
            PayerRole::ThirdParty => write!(f, "third_party"),
            PayerRole::Mixed => write!(f, "mixed"),
            PayerRole::Unknown => write!(f, "unknown"),
        }
    }
}

/// Cargo dimensions normalized to (count, kg, m³).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default)]
    pub pieces: u32,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub volume_m3: f64,
}

impl fmt::Display for Measurements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}м/ {}кг/ {}м3",
            self.pieces, self.weight_kg, self.volume_m3
        )
    }
}

/// Normalized "origin -> destination" pair of abbreviated city names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new(UNKNOWN_NAME, UNKNOWN_NAME)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}

/// The canonical shipment record.
///
/// Every field except `id` has a serde default, so operator-entered records
/// (which carry only a handful of fields) deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    #[serde(default)]
    pub carrier: Carrier,

    /// Carrier-scoped tracking identifier. Never empty.
    pub id: String,

    #[serde(default = "unknown_name")]
    pub sender: String,

    #[serde(default = "unknown_name")]
    pub recipient: String,

    #[serde(default)]
    pub payer_role: PayerRole,

    /// Free-text carrier status. Classified by [`crate::StatusRules`].
    #[serde(default = "unknown_text")]
    pub status: String,

    #[serde(default)]
    pub measurements: Measurements,

    #[serde(default)]
    pub route: Route,

    /// Carrier-supplied ISO-like date or date-time. `None` sorts last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_arrival: Option<String>,

    /// "Оплачено", "Не оплачено", "Долг: <amount>" or "К оплате: <amount>".
    #[serde(default = "unknown_text")]
    pub payment_status: String,

    #[serde(default)]
    pub is_manual: bool,

    /// Set exactly once, when the record enters the archive.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_archive_date"
    )]
    pub archived_at: Option<NaiveDate>,
}

fn unknown_name() -> String {
    UNKNOWN_NAME.to_string()
}

fn unknown_text() -> String {
    UNKNOWN_TEXT.to_string()
}

/// Accepts `YYYY-MM-DD` and the legacy `DD.MM.YYYY` form older archives use.
fn deserialize_archive_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("unrecognized archive date '{raw}'")))
}

impl ShipmentRecord {
    /// Create a record with every optional field at its sentinel value.
    pub fn new(carrier: Carrier, id: impl Into<String>) -> Self {
        Self {
            carrier,
            id: id.into(),
            sender: unknown_name(),
            recipient: unknown_name(),
            payer_role: PayerRole::Unknown,
            status: unknown_text(),
            measurements: Measurements::default(),
            route: Route::default(),
            expected_arrival: None,
            payment_status: unknown_text(),
            is_manual: carrier == Carrier::Manual,
            archived_at: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_payment(mut self, payment_status: impl Into<String>) -> Self {
        self.payment_status = payment_status.into();
        self
    }

    pub fn with_arrival(mut self, arrival: impl Into<String>) -> Self {
        self.expected_arrival = Some(arrival.into());
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    /// True when the payment text reports the shipment as fully paid.
    ///
    /// "Оплачено" counts, "Не оплачено" and "К оплате: ..." do not.
    pub fn is_paid(&self) -> bool {
        let text = self.payment_status.trim().to_lowercase();
        text.starts_with("оплачен") || text == "paid"
    }
}
