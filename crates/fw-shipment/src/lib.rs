//! # fw-shipment
//!
//! The canonical, carrier-agnostic shipment model shared by every stage of
//! the Freight Watch pipeline.
//!
//! Carrier payloads differ wildly in shape; the canonicalizer maps each of
//! them into one [`ShipmentRecord`]. The reconciler, archive and notifier
//! only ever see this type.
//!
//! Status strings are not enumerated (carriers use arbitrary vocabularies).
//! [`StatusRules`] classifies them into lifecycle phases by keyword.

pub mod error;
pub mod record;
pub mod status;

pub use error::ShipmentError;
pub use record::{Carrier, Measurements, PayerRole, Route, ShipmentRecord, UNKNOWN_NAME, UNKNOWN_TEXT};
pub use status::{ClassificationRule, Phase, StatusRules};
