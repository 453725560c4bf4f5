//! Column schemas and row classification.

use std::collections::HashMap;

use crate::models::ProcessedRecord;

/// One spreadsheet column: header text and the record field behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Text written into the header row.
    pub header: &'static str,

    /// Record field projected into this column.
    pub field: &'static str,
}

/// Why a row is tinted. Duplicate wins over MissingSections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    /// Plain row.
    None,
    /// The key-field value occurs on more than one row.
    Duplicate,
    /// The document arrived with SDS sections missing.
    MissingSections,
}

/// Fixed column layout for one tool's export.
///
/// Schemas are defined in source (`export::tools`) and never change at
/// runtime; records the backend returns are projected onto them.
#[derive(Debug, Clone)]
pub struct ExportSchema {
    /// Canonical tool slug, also used as the sheet name.
    pub tool: &'static str,

    /// Ordered columns.
    pub columns: Vec<Column>,

    /// Field whose repeated values mark duplicate rows.
    pub key_field: &'static str,

    /// Numeric field counting missing SDS sections.
    pub missing_field: Option<&'static str>,

    /// Write the legacy empty row under the header.
    pub filler_row: bool,

    /// Uniform column width in characters.
    pub column_width: f64,
}

impl ExportSchema {
    /// Header texts in column order.
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    /// Project a record onto the columns.
    ///
    /// Fields the record does not carry render as the empty string; a
    /// sparse record is never an error.
    pub fn project(&self, record: &ProcessedRecord) -> Vec<String> {
        self.columns.iter().map(|c| record.text(c.field)).collect()
    }

    /// Occurrences of each non-empty key-field value.
    pub fn key_counts<'a, I>(&self, records: I) -> HashMap<String, usize>
    where
        I: IntoIterator<Item = &'a ProcessedRecord>,
    {
        let mut counts = HashMap::new();
        for record in records {
            let key = record.text(self.key_field);
            if !key.is_empty() {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Highlight for one record, given the batch's key counts.
    ///
    /// Rows with no key value never count as duplicates of each other.
    pub fn highlight(
        &self,
        record: &ProcessedRecord,
        counts: &HashMap<String, usize>,
    ) -> RowHighlight {
        let key = record.text(self.key_field);
        if !key.is_empty() && counts.get(&key).is_some_and(|&n| n > 1) {
            return RowHighlight::Duplicate;
        }
        if let Some(field) = self.missing_field {
            if record.number(field).is_some_and(|n| n > 0.0) {
                return RowHighlight::MissingSections;
            }
        }
        RowHighlight::None
    }

    /// Highlights for a full record list.
    pub fn highlights(&self, records: &[ProcessedRecord]) -> Vec<RowHighlight> {
        let counts = self.key_counts(records);
        records.iter().map(|r| self.highlight(r, &counts)).collect()
    }
}
