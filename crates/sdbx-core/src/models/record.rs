//! Extracted records and the files they come from.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A file selected for upload, fully read into memory.
///
/// Files are ephemeral: a batch owns its files and drops them when the
/// batch report is dropped. Nothing is persisted client-side.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Original file name, as sent to the backend.
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    /// Raw file content.
    pub content: Vec<u8>,
}

impl SelectedFile {
    /// Read a file from disk. The backend receives the base name only.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            size: content.len() as u64,
            name,
            content,
        })
    }

    /// Build a file from in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            content,
        }
    }
}

/// One extracted document: backend field names mapped to their values.
///
/// The backend decides the field set per tool; the client never assumes a
/// fixed shape. Values arrive as arbitrary JSON (strings, numbers, null)
/// and are kept verbatim. A record is immutable once received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// Field name → value, in stable (sorted) field order.
    #[serde(flatten)]
    pub data: BTreeMap<String, Value>,
}

impl ProcessedRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON value for a field, if present.
    pub fn raw(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Display text for a field.
    ///
    /// Strings pass through, numbers and booleans are formatted, and
    /// null or absent fields become the empty string. An absent field is
    /// never an error.
    pub fn text(&self, field: &str) -> String {
        match self.raw(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Null) | None => String::new(),
            // Nested values are not expected but must not panic.
            Some(other) => other.to_string(),
        }
    }

    /// Numeric value for a field. Numeric strings ("2", "1.5") count.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.raw(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Insert a field value. Used when building records by hand.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(field.into(), value.into());
        self
    }
}
