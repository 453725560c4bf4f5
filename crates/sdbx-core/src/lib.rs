//! Core library for SDS batch processing against an extraction backend.
//!
//! This crate provides:
//! - REST client for the extraction backend (login, quota, upload, history)
//! - Fail-closed usage quota gating
//! - Strictly sequential upload queue with per-file status tracking
//! - Styled `.xlsx` export of the extracted records

pub mod error;
pub mod models;
pub mod api;
pub mod quota;
pub mod batch;
pub mod export;

pub use error::{ApiError, BatchError, ExportError, Result, SdbxError};
pub use models::{ProcessedRecord, SdbxConfig, SelectedFile, Session};
pub use api::{ApiClient, ExtractionApi, LoginResponse, UsageQuota};
pub use quota::QuotaGate;
pub use batch::{BatchEvent, BatchReport, FileState, FileStatus, UploadQueue};
pub use export::{DateFilter, ExportSchema, RowHighlight, export_filename, write_workbook};
