//! Receipt records and their open-ended payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Producer-defined key/value data for one receipt.
///
/// Insertion order is preserved, values may nest arbitrarily.
pub type Payload = serde_json::Map<String, Value>;

/// Keys injected into the flattened view of a record
pub const INJECTED_KEYS: [&str; 3] = ["id", "filename", "processed_date"];

/// A persisted receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Assigned by the store, never reused
    pub id: i64,
    /// Business key, unique across the store
    pub filename: String,
    /// Local timestamp in `YYYY-MM-DDTHH:MM:SS.ffffff` form
    pub processed_at: String,
    /// Whatever the extractor produced
    pub payload: Payload,
}

impl ReceiptRecord {
    /// Payload merged with `id`, `filename` and `processed_date` as top-level keys.
    ///
    /// The injected keys win over payload keys of the same name. The typed
    /// record keeps the original payload, so nothing is lost by calling this.
    pub fn flattened(&self) -> Payload {
        let mut flat = self.payload.clone();
        for key in INJECTED_KEYS {
            if flat.contains_key(key) {
                tracing::warn!(
                    "Payload key '{}' of {} is shadowed in the flattened view",
                    key,
                    self.filename
                );
            }
        }
        flat.insert("id".to_string(), Value::from(self.id));
        flat.insert("filename".to_string(), Value::from(self.filename.clone()));
        flat.insert("processed_date".to_string(), Value::from(self.processed_at.clone()));
        flat
    }

    /// Payload entries that are not injected keys, in payload order
    pub fn payload_entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.payload
            .iter()
            .filter(|(k, _)| !INJECTED_KEYS.contains(&k.as_str()))
    }
}
