//! # Receipt Processor
//!
//! Scans a folder for receipt files and keeps what an extractor pulls out
//! of them in a local SQLite store.
//!
//! Receipt Processor provides:
//! - A non-recursive file scanner for PDF and image receipts
//! - A pluggable extractor seam (ships with a deterministic stub)
//! - SQLite-backed storage of one JSON payload per filename
//! - An idempotent pipeline that skips files already on record
//! - Best-effort notifications for newly stored receipts

pub mod record;
pub mod scanner;
pub mod extractor;
pub mod notifier;
pub mod storage;
pub mod pipeline;
pub mod watcher;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use record::{Payload, ReceiptRecord};
pub use scanner::FileScanner;
pub use extractor::{ExtractError, ReceiptExtractor, StubExtractor};
pub use notifier::{BackgroundNotifier, LogNotifier, Notifier, NotifierEvent, NotifyError};
pub use storage::SqliteStore;
pub use pipeline::{Pipeline, RunSummary};

/// Result type alias for receipt processing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for receipt processing operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Receipt not found: {0}")]
    ReceiptNotFound(i64),
}
