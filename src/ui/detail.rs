//! Detail view for a single receipt

use crate::Result;
use crate::record::ReceiptRecord;
use crate::ui::table::{format_processed_date, items_table};

/// Text rendering of one receipt: an items table when the payload has a
/// list of item maps, then the raw JSON.
pub fn render_detail(record: &ReceiptRecord) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("Receipt Details: {}\n", record.filename));
    out.push_str(&format!(
        "ID {} | processed {}\n",
        record.id,
        format_processed_date(&record.processed_at)
    ));

    if let Some(table) = record
        .payload
        .get("items")
        .and_then(|v| v.as_array())
        .and_then(|items| items_table(items))
    {
        out.push_str("\nItems:\n");
        out.push_str(&table);
        out.push('\n');
    }

    out.push_str("\nRaw JSON Data:\n");
    out.push_str(&serde_json::to_string_pretty(&record.payload)?);
    out.push('\n');
    Ok(out)
}
