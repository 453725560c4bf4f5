//! HTTP client for the extraction backend.

use reqwest::multipart;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ApiError;
use crate::models::{ProcessedRecord, SelectedFile};

use super::types::{self, LoginResponse, UsageQuota};
use super::{ExtractionApi, Result};

/// Client for the extraction backend.
///
/// One `reqwest::Client` shared across all requests, carrying the session
/// bearer token once one is attached. Requests have no timeout, no retry
/// and no backoff; a slow backend blocks the file being processed and a
/// failed request surfaces as-is.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sdbx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a session token for authenticated endpoints.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        match &self.token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(ApiError::NotAuthenticated),
        }
    }

    /// Map a non-success response to an error, reading the body for detail.
    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        if status == 401 || status == 419 {
            return ApiError::Unauthorized;
        }
        let body = response.text().await.unwrap_or_default();
        let message = types::error_message(&body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no detail provided".to_string()
            } else {
                trimmed.to_string()
            }
        });
        ApiError::Status { status, message }
    }

    async fn decode_body(response: reqwest::Response) -> Result<Value> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Log in with email and password. The only endpoint without a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .http
            .post(self.url("login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let body = Self::decode_body(response).await?;
                serde_json::from_value(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
            }
            status @ (401 | 403) => {
                let body = response.text().await.unwrap_or_default();
                let message = types::error_message(&body)
                    .unwrap_or_else(|| "invalid email or password".to_string());
                Err(ApiError::Status { status, message })
            }
            _ => Err(Self::error_from(response).await),
        }
    }

    /// Current usage quota for a tool.
    ///
    /// 403 means the quota is used up; the remaining count is taken from
    /// the error body when the backend includes one.
    pub async fn check_usage(&self, tool: &str) -> Result<UsageQuota> {
        let response = self
            .authed(self.http.get(self.url(&format!("check-usage-count/{tool}"))))?
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let body = Self::decode_body(response).await?;
                let quota = UsageQuota::from_value(&body);
                debug!(tool, available = ?quota.available_count, "usage checked");
                Ok(quota)
            }
            403 => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::QuotaExhausted {
                    remaining: types::remaining_from_error(&body),
                })
            }
            _ => Err(Self::error_from(response).await),
        }
    }

    /// Upload one document for extraction and return its records.
    pub async fn upload_document(
        &self,
        tool: &str,
        user_id: &str,
        file: &SelectedFile,
    ) -> Result<Vec<ProcessedRecord>> {
        debug!(tool, file = %file.name, size = file.size, "uploading document");

        let mime = if file.name.to_lowercase().ends_with(".pdf") {
            "application/pdf"
        } else {
            "application/octet-stream"
        };
        let part = multipart::Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(mime)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("user_id", user_id.to_string());

        let response = self
            .authed(self.http.post(self.url(&format!("process-data/{tool}"))))?
            .multipart(form)
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let body = Self::decode_body(response).await?;
                types::records_from_body(&body)
            }
            _ => Err(Self::error_from(response).await),
        }
    }

    /// Previously processed records for a tool and user.
    pub async fn processed_data(&self, tool: &str, user_id: &str) -> Result<Vec<ProcessedRecord>> {
        let response = self
            .authed(self.http.get(self.url(&format!("processed-data/{tool}"))))?
            .query(&[("user_id", user_id)])
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let body = Self::decode_body(response).await?;
                types::records_from_body(&body)
            }
            _ => Err(Self::error_from(response).await),
        }
    }

    /// Hand a finished workbook to the backend mailer.
    pub async fn send_processed_file(
        &self,
        tool: &str,
        filename: &str,
        workbook: Vec<u8>,
        recipients: &[String],
    ) -> Result<()> {
        let part = multipart::Part::bytes(workbook)
            .file_name(filename.to_string())
            .mime_str("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("recipients", recipients.join(","));

        let response = self
            .authed(self.http.post(self.url(&format!("send-processed-file/{tool}"))))?
            .multipart(form)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Record a download audit event. Callers treat failures as non-fatal.
    pub async fn log_download(&self, tool: &str, filename: &str, row_count: usize) -> Result<()> {
        let response = self
            .authed(self.http.post(self.url(&format!("log-download/{tool}"))))?
            .json(&json!({ "filename": filename, "row_count": row_count }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }
}

impl ExtractionApi for ApiClient {
    async fn check_usage(&self, tool: &str) -> Result<UsageQuota> {
        ApiClient::check_usage(self, tool).await
    }

    async fn upload_document(
        &self,
        tool: &str,
        user_id: &str,
        file: &SelectedFile,
    ) -> Result<Vec<ProcessedRecord>> {
        ApiClient::upload_document(self, tool, user_id, file).await
    }
}
