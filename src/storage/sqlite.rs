//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params, OptionalExtension};
use crate::Result;
use crate::record::{Payload, ReceiptRecord};
use super::schema;

/// Format of `processed_date`. Fixed width, so text order is time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// SQLite-backed storage for receipts
///
/// Holds only the database location; every operation opens a fresh
/// connection and drops it before returning.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Point a store at a database file without touching disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Point a store at a database file and make sure the schema exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.initialize()?;
        Ok(store)
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the schema if it is missing. Safe to call on every startup.
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.connect()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Check whether a receipt with exactly this filename is stored
    pub fn exists(&self, filename: &str) -> Result<bool> {
        let conn = self.connect()?;
        let found: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM receipts WHERE filename = ?1)",
            [filename],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    /// Persist a payload for a file and return the new receipt id
    pub fn save(&self, filename: &str, payload: &Payload) -> Result<i64> {
        let raw = serde_json::to_string(payload)?;
        let processed_date = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO receipts (filename, processed_date, raw_data) VALUES (?1, ?2, ?3)",
            params![filename, processed_date, raw],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All receipts, newest first
    pub fn get_all(&self) -> Result<Vec<ReceiptRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, filename, processed_date, raw_data FROM receipts ORDER BY processed_date DESC, id DESC"
        )?;

        let records = stmt
            .query_map([], |row| Self::row_to_record(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// The payload stored for a receipt id
    pub fn get_by_id(&self, id: i64) -> Result<Option<Payload>> {
        let conn = self.connect()?;
        let raw: Option<String> = conn
            .query_row("SELECT raw_data FROM receipts WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// The full record for a receipt id
    pub fn get_record(&self, id: i64) -> Result<Option<ReceiptRecord>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, filename, processed_date, raw_data FROM receipts WHERE id = ?1",
            [id],
            |row| Self::row_to_record(row),
        )
        .optional()
        .map_err(Into::into)
    }

    /// Count all receipts
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM receipts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Summary of what is stored
    pub fn stats(&self) -> Result<DbStats> {
        let conn = self.connect()?;
        let (receipts, newest): (i64, Option<String>) = conn.query_row(
            "SELECT COUNT(*), MAX(processed_date) FROM receipts",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(DbStats {
            receipts: receipts as usize,
            newest,
        })
    }

    /// Helper to convert a row to a ReceiptRecord
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<ReceiptRecord> {
        let raw: String = row.get(3)?;
        let payload: Payload = serde_json::from_str(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(ReceiptRecord {
            id: row.get(0)?,
            filename: row.get(1)?,
            processed_at: row.get(2)?,
            payload,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub receipts: usize,
    pub newest: Option<String>,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Receipts: {}", self.receipts)?;
        write!(f, "  Last processed: {}", self.newest.as_deref().unwrap_or("never"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("receipts.db")).unwrap();
        (dir, store)
    }

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, store) = temp_store();
        store.save("a.pdf", &Payload::new()).unwrap();

        store.initialize().unwrap();
        store.initialize().unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_initialize_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("receipts.db");
        let store = SqliteStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_exists() {
        let (_dir, store) = temp_store();
        assert!(!store.exists("a.pdf").unwrap());

        let id = store.save("a.pdf", &payload(json!({"total_price": 3.5}))).unwrap();
        assert!(id > 0);
        assert!(store.exists("a.pdf").unwrap());
        assert!(!store.exists("A.pdf").unwrap());
        assert!(!store.exists("a.pdf ").unwrap());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let (_dir, store) = temp_store();
        let first = store.save("a.pdf", &Payload::new()).unwrap();
        let second = store.save("b.pdf", &Payload::new()).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_payload_round_trip() {
        let (_dir, store) = temp_store();
        let original = payload(json!({
            "store_name": "Corner Shop",
            "total_price": 27.24,
            "count": 3,
            "negative": -12,
            "paid": true,
            "note": null,
            "items": [
                {"name": "Milk", "price": 0.1, "tags": ["dairy", "cold"]},
                {"name": "Bread", "price": 1e-7}
            ],
            "nested": {"deeper": {"deepest": [1, 2.5, "three"]}}
        }));

        let id = store.save("r.pdf", &original).unwrap();
        let loaded = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(loaded, original);

        let keys: Vec<&str> = loaded.keys().map(String::as_str).collect();
        assert_eq!(keys[0], "store_name");
        assert_eq!(keys[keys.len() - 1], "nested");
    }

    #[test]
    fn test_get_by_id_missing() {
        let (_dir, store) = temp_store();
        assert!(store.get_by_id(42).unwrap().is_none());
        assert!(store.get_record(42).unwrap().is_none());
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_dir, store) = temp_store();
        store.save("first.pdf", &payload(json!({"n": 1}))).unwrap();
        store.save("second.pdf", &payload(json!({"n": 2}))).unwrap();
        store.save("third.pdf", &payload(json!({"n": 3}))).unwrap();

        let all = store.get_all().unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["third.pdf", "second.pdf", "first.pdf"]);
        assert_eq!(all[0].payload["n"], json!(3));
    }

    #[test]
    fn test_get_record_matches_save() {
        let (_dir, store) = temp_store();
        let id = store.save("b.jpg", &payload(json!({"date": "2025-11-02"}))).unwrap();

        let record = store.get_record(id).unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.filename, "b.jpg");
        assert_eq!(record.processed_at.len(), "2025-11-02T10:15:30.123456".len());
        assert!(chrono::NaiveDateTime::parse_from_str(&record.processed_at, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_stats() {
        let (_dir, store) = temp_store();
        assert_eq!(store.stats().unwrap().receipts, 0);
        assert!(store.stats().unwrap().newest.is_none());

        store.save("a.pdf", &Payload::new()).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.receipts, 1);
        assert!(stats.newest.is_some());
        assert!(stats.to_string().contains("Receipts: 1"));
    }

    #[test]
    fn test_operations_fail_without_schema() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("fresh.db"));
        assert!(matches!(store.exists("a.pdf"), Err(crate::Error::Storage(_))));
    }
}
