//! Client configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SdbxError;

/// Main configuration for the sdbx client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SdbxConfig {
    /// Backend API settings.
    pub api: ApiConfig,

    /// Upload settings.
    pub upload: UploadConfig,

    /// Spreadsheet export settings.
    pub export: ExportConfig,
}

impl Default for SdbxConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            upload: UploadConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the extraction backend, without a trailing slash.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
        }
    }
}

/// Upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Accepted file extension (lowercase, without the dot).
    pub extension: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            extension: "pdf".to_string(),
        }
    }
}

/// Spreadsheet export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory where workbooks are written.
    pub output_dir: PathBuf,

    /// Record field holding the creation date, used by history filters.
    pub date_field: String,

    /// Default recipients for export-by-email.
    pub email_recipients: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            date_field: "created_at".to_string(),
            email_recipients: Vec::new(),
        }
    }
}

impl SdbxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SdbxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SdbxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
