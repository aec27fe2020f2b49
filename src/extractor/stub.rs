//! Stub extractor
//!
//! Returns the same mock receipt for every file. It exists so the scan,
//! store and display path can be exercised before a real extractor exists.

use crate::record::Payload;
use serde_json::{json, Value};
use std::path::Path;

use super::framework::{ExtractError, ReceiptExtractor};

/// (name, price, protein, calories)
const MOCK_ITEMS: [(&str, f64, f64, f64); 3] = [
    ("Mock Item 1", 12.99, 15.5, 250.0),
    ("Mock Item 2", 8.50, 20.0, 180.0),
    ("Mock Item 3", 5.75, 5.0, 120.0),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct StubExtractor;

impl StubExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ReceiptExtractor for StubExtractor {
    fn name(&self) -> &str {
        "stub"
    }

    fn extract(&self, path: &Path) -> Result<Payload, ExtractError> {
        if !path.is_file() {
            return Err(ExtractError::Unsupported(path.display().to_string()));
        }

        let items: Vec<Value> = MOCK_ITEMS
            .iter()
            .map(|(name, price, protein, calories)| {
                json!({
                    "name": name,
                    "price": price,
                    "protein": protein,
                    "calories": calories,
                })
            })
            .collect();
        let total: f64 = MOCK_ITEMS.iter().map(|(_, price, _, _)| price).sum();

        let mut payload = Payload::new();
        payload.insert("items".to_string(), Value::Array(items));
        payload.insert("total_price".to_string(), json!(total));
        payload.insert("store_name".to_string(), json!("Mock Store"));
        payload.insert("date".to_string(), json!("2025-11-02"));
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_payload_shape() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("r.pdf");
        std::fs::write(&file, b"%PDF").unwrap();

        let payload = StubExtractor::new().extract(&file).unwrap();
        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["items", "total_price", "store_name", "date"]);

        let items = payload["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["name"], json!("Mock Item 1"));

        let total = payload["total_price"].as_f64().unwrap();
        assert!((total - 27.24).abs() < 1e-9);
    }

    #[test]
    fn test_stub_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("r.png");
        std::fs::write(&file, b"png").unwrap();

        let stub = StubExtractor::new();
        assert_eq!(stub.extract(&file).unwrap(), stub.extract(&file).unwrap());
    }

    #[test]
    fn test_stub_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = StubExtractor::new().extract(&dir.path().join("gone.pdf"));
        assert!(matches!(err, Err(ExtractError::Unsupported(_))));
    }
}
