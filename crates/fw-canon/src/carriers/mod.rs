// carriers - Built-in CarrierFormat implementations.

mod baikal;
mod dellin;
mod pecom;

pub use baikal::BaikalFormat;
pub use dellin::DellinFormat;
pub use pecom::PecomFormat;

use serde_json::Value;

use fw_shipment::{Carrier, ShipmentRecord};

use crate::error::CanonError;
use crate::value;

/// Required tracking id of an entry, or `MissingId`.
pub(crate) fn require_id(carrier: Carrier, id: &Value) -> Result<String, CanonError> {
    value::text(id).ok_or(CanonError::MissingId { carrier })
}

/// Reject anything that is not a JSON object before field access.
pub(crate) fn require_object(carrier: Carrier, entry: &Value) -> Result<(), CanonError> {
    if entry.is_object() {
        Ok(())
    } else {
        Err(CanonError::NotAnObject { carrier })
    }
}

/// Start a record with the carrier's id; `status` falls back to the sentinel.
pub(crate) fn base_record(carrier: Carrier, id: String, status: Option<String>) -> ShipmentRecord {
    let record = ShipmentRecord::new(carrier, id);
    match status {
        Some(status) => record.with_status(status),
        None => record,
    }
}
