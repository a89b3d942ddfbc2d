// canonicalizer.rs - Dispatch raw carrier payloads to their CarrierFormat.

use serde_json::Value;

use fw_shipment::{Carrier, ShipmentRecord};

use crate::carriers::{BaikalFormat, DellinFormat, PecomFormat};
use crate::error::CanonError;
use crate::format::CarrierFormat;
use crate::normalize::NameNormalizer;

/// Holds one format per carrier and the shared name normalizer.
///
/// Formats are looked up by [`CarrierFormat::carrier`]; registering a second
/// format for the same carrier replaces the first.
pub struct Canonicalizer {
    formats: Vec<Box<dyn CarrierFormat>>,
    names: NameNormalizer,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(NameNormalizer::default())
    }
}

impl Canonicalizer {
    /// Canonicalizer with the three built-in carrier formats.
    pub fn new(names: NameNormalizer) -> Self {
        Self {
            formats: Vec::new(),
            names,
        }
        .with_format(Box::new(DellinFormat))
        .with_format(Box::new(PecomFormat))
        .with_format(Box::new(BaikalFormat))
    }

    pub fn with_format(mut self, format: Box<dyn CarrierFormat>) -> Self {
        self.formats.retain(|f| f.carrier() != format.carrier());
        self.formats.push(format);
        self
    }

    pub fn names(&self) -> &NameNormalizer {
        &self.names
    }

    fn format_for(&self, carrier: Carrier) -> Option<&dyn CarrierFormat> {
        self.formats
            .iter()
            .find(|f| f.carrier() == carrier)
            .map(|f| f.as_ref())
    }

    /// Canonicalize one carrier's payload. Malformed entries are skipped.
    pub fn canonicalize(&self, carrier: Carrier, payload: &Value) -> Vec<ShipmentRecord> {
        let Some(format) = self.format_for(carrier) else {
            tracing::warn!(carrier = %carrier, "no payload format registered, payload ignored");
            return Vec::new();
        };

        let entries = format.entries(payload);
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            match format.parse(entry, &self.names) {
                Ok(record) => records.push(record),
                Err(e @ CanonError::Placeholder { .. }) => {
                    tracing::debug!(error = %e, "skipping placeholder entry");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed shipment entry");
                }
            }
        }
        tracing::debug!(carrier = %carrier, count = records.len(), "payload canonicalized");
        records
    }

    /// Canonicalize every fetched payload in order. `None` payloads
    /// contribute nothing.
    pub fn canonicalize_all(&self, payloads: &[(Carrier, Option<Value>)]) -> Vec<ShipmentRecord> {
        payloads
            .iter()
            .filter_map(|(carrier, payload)| payload.as_ref().map(|p| (*carrier, p)))
            .flat_map(|(carrier, payload)| self.canonicalize(carrier, payload))
            .collect()
    }
}
