//! # fw-canon
//!
//! Maps each carrier's raw JSON payload into canonical [`ShipmentRecord`]s.
//!
//! Carrier payloads are loosely typed: any leaf may be absent or null, numbers
//! arrive as strings, nested objects go missing. Canonicalization never fails
//! for a whole payload. A single malformed shipment (no tracking id, empty
//! cargo list where one is required) is skipped with a warning and the rest
//! of the payload is still processed.
//!
//! ## Key components
//!
//! - [`CarrierFormat`]: one implementation per carrier payload shape, each
//!   with its own payer-role inference
//! - [`NameNormalizer`]: party and city name cleanup with lookup tables
//! - [`Canonicalizer`]: dispatches payloads to the right format
//!
//! [`ShipmentRecord`]: fw_shipment::ShipmentRecord

pub mod canonicalizer;
pub mod carriers;
pub mod error;
pub mod format;
pub mod normalize;
mod value;

pub use canonicalizer::Canonicalizer;
pub use carriers::{BaikalFormat, DellinFormat, PecomFormat};
pub use error::CanonError;
pub use format::CarrierFormat;
pub use normalize::{Abbreviation, NameNormalizer};
