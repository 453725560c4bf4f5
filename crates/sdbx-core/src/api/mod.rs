//! REST client for the extraction backend.

mod client;
mod types;

pub use client::ApiClient;
pub use types::{LoginResponse, LoginUser, UsageQuota};

use crate::error::ApiError;
use crate::models::{ProcessedRecord, SelectedFile};

/// Result type for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// The upload-facing slice of the backend API.
///
/// The upload queue and the quota gate run against this trait, so both
/// can be exercised with a scripted stub instead of a live backend.
#[allow(async_fn_in_trait)]
pub trait ExtractionApi {
    /// Current usage quota for a tool.
    async fn check_usage(&self, tool: &str) -> Result<UsageQuota>;

    /// Upload one document for extraction and return its records.
    async fn upload_document(
        &self,
        tool: &str,
        user_id: &str,
        file: &SelectedFile,
    ) -> Result<Vec<ProcessedRecord>>;
}
