//! Receipt Extractor Framework
//!
//! An extractor reads one receipt file and returns an open-ended payload.
//! This is the seam where real OCR or model-backed extraction plugs in;
//! the built-in `stub` extractor returns fixed mock data.

pub mod framework;
pub mod stub;

pub use framework::{by_name, default_registry, ExtractError, ExtractorRegistry, ReceiptExtractor};
pub use stub::StubExtractor;
