//! Core extractor framework
//!
//! Defines the trait every receipt extractor implements and the registry
//! used to pick one by name.

use crate::record::Payload;
use crate::{Error, Result};
use std::path::Path;

/// Failure to extract data from a single receipt file
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported file: {0}")]
    Unsupported(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Failed(String),
}

/// Trait for receipt extractors
///
/// An extractor turns one receipt file into a free-form payload. The shape
/// of that payload is up to the extractor; nothing downstream inspects it.
pub trait ReceiptExtractor: Send + Sync {
    /// Name used to select this extractor from configuration
    fn name(&self) -> &str;

    /// Extract receipt data from a file
    fn extract(&self, path: &Path) -> std::result::Result<Payload, ExtractError>;
}

/// Registry of extractors, looked up by name
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn ReceiptExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor
    pub fn register(&mut self, extractor: impl ReceiptExtractor + 'static) {
        self.extractors.push(Box::new(extractor));
    }

    /// Find an extractor by name
    pub fn find(&self, name: &str) -> Option<&dyn ReceiptExtractor> {
        self.extractors
            .iter()
            .find(|e| e.name() == name)
            .map(|e| e.as_ref())
    }

    /// Names of all registered extractors
    pub fn names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Take an extractor out of the registry by name.
    ///
    /// Unknown names are a configuration error so a run aborts before any
    /// file is touched.
    pub fn take(mut self, name: &str) -> Result<Box<dyn ReceiptExtractor>> {
        match self.extractors.iter().position(|e| e.name() == name) {
            Some(idx) => Ok(self.extractors.swap_remove(idx)),
            None => Err(Error::Config(format!(
                "unknown extractor '{}' (available: {})",
                name,
                self.names().join(", ")
            ))),
        }
    }
}

/// Create a default registry with all built-in extractors
pub fn default_registry() -> ExtractorRegistry {
    let mut registry = ExtractorRegistry::new();
    registry.register(super::stub::StubExtractor::new());
    registry
}

/// Resolve a built-in extractor by name
pub fn by_name(name: &str) -> Result<Box<dyn ReceiptExtractor>> {
    default_registry().take(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestExtractor;

    impl ReceiptExtractor for TestExtractor {
        fn name(&self) -> &str { "test" }
        fn extract(&self, _path: &Path) -> std::result::Result<Payload, ExtractError> {
            Ok(Payload::new())
        }
    }

    #[test]
    fn test_registry() {
        let mut registry = ExtractorRegistry::new();
        registry.register(TestExtractor);

        assert!(registry.find("test").is_some());
        assert!(registry.find("ocr").is_none());
        assert_eq!(registry.names(), vec!["test"]);
    }

    #[test]
    fn test_by_name_stub() {
        let extractor = by_name("stub").unwrap();
        assert_eq!(extractor.name(), "stub");
    }

    #[test]
    fn test_by_name_unknown_is_config_error() {
        let err = by_name("ocr").err().unwrap();
        match err {
            Error::Config(msg) => {
                assert!(msg.contains("ocr"));
                assert!(msg.contains("stub"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
