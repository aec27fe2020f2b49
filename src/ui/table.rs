use crate::record::ReceiptRecord;
use serde_json::Value;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

/// Display format for processed timestamps, e.g. `Nov 02, 2025 10:15`
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y %H:%M";

/// Payload entries shown in the list preview
const PREVIEW_ENTRIES: usize = 2;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
pub struct ReceiptRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Filename")]
    pub filename: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Preview")]
    pub preview: String,
}

impl From<&ReceiptRecord> for ReceiptRow {
    fn from(record: &ReceiptRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename.clone(),
            date: format_processed_date(&record.processed_at),
            preview: preview(record),
        }
    }
}

/// Table of receipts in the order given
pub fn receipts_table(records: &[ReceiptRecord]) -> String {
    let rows: Vec<ReceiptRow> = records.iter().map(ReceiptRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render a stored timestamp for humans, or return it untouched if it does not parse
pub fn format_processed_date(raw: &str) -> String {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Short `key: value` summary of the first payload entries
pub fn preview(record: &ReceiptRecord) -> String {
    record
        .payload_entries()
        .take(PREVIEW_ENTRIES)
        .map(|(key, value)| match value {
            Value::Array(items) => format!("{}: [{} items]", key, items.len()),
            other => format!("{}: {}", key, cell_text(other)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Plain text for a JSON value: strings unquoted, null blank
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Table for a list of line items, columns taken from the first item's keys.
///
/// Returns `None` unless the list is non-empty and starts with an object.
pub fn items_table(items: &[Value]) -> Option<String> {
    let columns: Vec<String> = items.first()?.as_object()?.keys().cloned().collect();

    let mut builder = Builder::default();
    builder.push_record(columns.clone());
    for item in items {
        let Some(map) = item.as_object() else {
            continue;
        };
        builder.push_record(
            columns
                .iter()
                .map(|col| map.get(col).map(cell_text).unwrap_or_default()),
        );
    }

    Some(builder.build().with(Style::rounded()).to_string())
}
