//! Error types for the sdbx-core library.

use thiserror::Error;

/// Main error type for the sdbx library.
#[derive(Error, Debug)]
pub enum SdbxError {
    /// Backend API error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Batch upload error.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// Spreadsheet export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or state file error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors returned by the extraction backend client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No session token is available for an authenticated endpoint.
    #[error("no session token available")]
    NotAuthenticated,

    /// The server rejected the session token.
    #[error("session rejected by the server")]
    Unauthorized,

    /// The usage quota for the tool is used up (HTTP 403 on the quota route).
    #[error("usage quota exhausted")]
    QuotaExhausted { remaining: Option<i64> },

    /// Any other non-success HTTP status, with the message from the body.
    #[error("server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response decoded but did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}

/// Errors raised by the upload queue before or during a batch.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The queue was started without any files.
    #[error("no files selected for upload")]
    NoFiles,

    /// The batch is larger than the remaining quota; nothing was uploaded.
    #[error("{requested} file(s) selected but only {available} upload(s) remaining")]
    QuotaDenied { requested: usize, available: i64 },

    /// The quota is used up entirely; nothing was uploaded.
    #[error("usage quota exhausted")]
    QuotaExhausted { remaining: Option<i64> },

    /// The quota could not be checked; uploads stay disabled (fail closed).
    #[error("quota check failed: {0}")]
    QuotaCheck(#[source] ApiError),
}

/// Errors from the spreadsheet exporter.
#[derive(Error, Debug)]
pub enum ExportError {
    /// No records passed the active filter; no file is produced.
    #[error("no records match the export filter")]
    NoRows,

    /// Workbook construction failed.
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for the sdbx library.
pub type Result<T> = std::result::Result<T, SdbxError>;
