// error.rs - Per-shipment canonicalization failures.
//
// None of these abort a payload. The canonicalizer logs them and skips the
// offending entry.

use fw_shipment::Carrier;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanonError {
    /// The entry has no usable tracking identifier and cannot be reconciled.
    #[error("{carrier}: shipment entry has no tracking id")]
    MissingId { carrier: Carrier },

    /// The carrier requires a cargo list and this entry's list is empty.
    #[error("{carrier}: shipment '{id}' has an empty cargo list")]
    EmptyCargo { carrier: Carrier, id: String },

    /// The entry is a placeholder the carrier returns when it has no data.
    #[error("{carrier}: placeholder entry")]
    Placeholder { carrier: Carrier },

    /// The entry is not a JSON object.
    #[error("{carrier}: shipment entry is not an object")]
    NotAnObject { carrier: Carrier },
}
