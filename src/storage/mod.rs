//! Storage Layer - SQLite-backed persistence
//!
//! One table holds every receipt:
//! - receipts(id, filename, processed_date, raw_data)
//!
//! Each store operation opens its own connection and closes it on return.

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
