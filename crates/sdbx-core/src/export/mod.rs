//! Styled spreadsheet export of processed records.

mod schema;
pub mod tools;
mod workbook;

pub use schema::{Column, ExportSchema, RowHighlight};
pub use workbook::write_workbook;

use chrono::{DateTime, NaiveDate};

use crate::error::ExportError;
use crate::models::ProcessedRecord;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Optional date bounds applied to records before export.
///
/// An inactive filter (no bounds) passes everything. With at least one
/// bound set, records whose date field is missing or unreadable are
/// excluded rather than guessed at.
#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    /// Record field holding the date.
    pub field: String,

    /// Earliest date to keep, inclusive.
    pub from: Option<NaiveDate>,

    /// Latest date to keep, inclusive.
    pub to: Option<NaiveDate>,
}

impl DateFilter {
    /// Filter on the given field with optional bounds.
    pub fn new(field: impl Into<String>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            field: field.into(),
            from,
            to,
        }
    }

    /// Whether any bound is set.
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether a record passes the filter.
    pub fn matches(&self, record: &ProcessedRecord) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(date) = parse_record_date(&record.text(&self.field)) else {
            return false;
        };
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }
}

/// Records passing the filter, in their original order.
pub fn filter_records<'a>(
    records: &'a [ProcessedRecord],
    filter: &DateFilter,
) -> Vec<&'a ProcessedRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Parse the date spellings the backend emits.
fn parse_record_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    None
}

/// Timestamped workbook filename for a tool.
pub fn export_filename(tool: &str) -> String {
    format!("{}_{}.xlsx", tool, chrono::Local::now().format("%Y-%m-%d_%H%M%S"))
}
