//! Database schema definitions

/// SQL to create the receipts table
///
/// `raw_data` holds the extractor payload as JSON text.
pub const CREATE_RECEIPTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS receipts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    processed_date TEXT NOT NULL,
    raw_data TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_receipts_filename ON receipts(filename)",
    "CREATE INDEX IF NOT EXISTS idx_receipts_processed_date ON receipts(processed_date)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_RECEIPTS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
