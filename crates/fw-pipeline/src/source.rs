// source.rs - PayloadSource: raw carrier payloads for one cycle.
//
// Fetching from carrier APIs happens outside this crate. What arrives here
// is, per polled carrier, either a raw JSON payload or None ("this carrier
// produced nothing this cycle": timeout, auth failure, missing key).

use std::path::{Path, PathBuf};

use serde_json::Value;

use fw_archive::read_json;
use fw_shipment::Carrier;

pub trait PayloadSource {
    fn name(&self) -> &str;

    /// One entry per polled carrier, in polling order.
    fn fetch(&self) -> Vec<(Carrier, Option<Value>)>;
}

/// Reads the combined payload document the fetch stage writes:
/// `{"Dellin": ..., "Pecom": ..., "Baikal": ..., "Timestamp": ...}`.
/// Unknown keys are ignored.
pub struct CombinedFileSource {
    path: PathBuf,
}

impl CombinedFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn split(document: Option<Value>) -> Vec<(Carrier, Option<Value>)> {
        let mut document = document.unwrap_or(Value::Null);
        Carrier::POLLED
            .iter()
            .map(|carrier| {
                let payload = document
                    .get_mut(carrier.source_key())
                    .map(Value::take)
                    .filter(|payload| !payload.is_null());
                (*carrier, payload)
            })
            .collect()
    }
}

impl PayloadSource for CombinedFileSource {
    fn name(&self) -> &str {
        "combined-file"
    }

    fn fetch(&self) -> Vec<(Carrier, Option<Value>)> {
        let document = match read_json::<Value>(&self.path) {
            Ok(Some(document)) => Some(document),
            Ok(None) => {
                tracing::warn!(path = %self.path.display(), "raw payload file not found");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "raw payload file unreadable");
                None
            }
        };
        Self::split(document)
    }
}

/// Fixed payloads, for dry runs and tests.
pub struct StaticSource {
    payloads: Vec<(Carrier, Option<Value>)>,
}

impl StaticSource {
    pub fn new(payloads: Vec<(Carrier, Option<Value>)>) -> Self {
        Self { payloads }
    }
}

impl PayloadSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Vec<(Carrier, Option<Value>)> {
        self.payloads.clone()
    }
}
