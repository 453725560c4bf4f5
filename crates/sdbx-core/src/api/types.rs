//! Wire types and body parsing for the extraction backend.
//!
//! The backend is not strict about its response shapes, so decoding here
//! is deliberately lenient: counts may arrive as numbers, numeric strings
//! or null, and error detail hides under different keys depending on the
//! route. Anything unrecognised degrades to "unknown" rather than failing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{ProcessedRecord, Session};

use super::Result;

/// Response of the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,

    /// The signed-in user.
    pub user: LoginUser,
}

/// User block inside the login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    /// User id; the backend sends a number or a string depending on version.
    pub id: Value,

    /// Account email.
    pub email: String,

    /// Account role, when the backend reports one.
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginResponse {
    /// Flatten into a persistable session.
    pub fn into_session(self) -> Session {
        let user_id = match self.user.id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Session {
            token: self.token,
            user_id,
            email: self.user.email,
            role: self.user.role,
        }
    }
}

/// Usage counters for a tool.
///
/// `None` means the backend did not state a usable number; an unknown
/// count never blocks an upload on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageQuota {
    /// Uploads remaining.
    pub available_count: Option<i64>,

    /// Total uploads allowed for the account.
    pub limit: Option<i64>,
}

impl UsageQuota {
    /// Extract the counters from a decoded response body.
    pub fn from_value(body: &Value) -> Self {
        Self {
            available_count: body.get("available_count").and_then(coerce_count),
            limit: body.get("limit").and_then(coerce_count),
        }
    }
}

/// Interpret a value as a count: numbers and numeric strings qualify.
fn coerce_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Pull the remaining count out of a quota error body, if it names one.
pub(super) fn remaining_from_error(body: &str) -> Option<i64> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("available_count").and_then(coerce_count)
}

/// Best human-readable message from an error body.
///
/// Checks `detail`, `message` and `error` in that order.
pub(super) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "message", "error"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }
    None
}

/// Extract the record list from an upload or history response body.
///
/// The payload lives under `data`; a missing or non-array `data` is a
/// malformed response, not an empty one.
pub(super) fn records_from_body(body: &Value) -> Result<Vec<ProcessedRecord>> {
    let data = body
        .get("data")
        .ok_or_else(|| ApiError::MalformedResponse("missing 'data' field".to_string()))?;
    serde_json::from_value(data.clone())
        .map_err(|e| ApiError::MalformedResponse(format!("'data' is not a record list: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_quota_coerces_loose_counts() {
        let quota = UsageQuota::from_value(&json!({
            "available_count": "7",
            "limit": 100,
        }));
        assert_eq!(quota.available_count, Some(7));
        assert_eq!(quota.limit, Some(100));
    }

    #[test]
    fn test_quota_unknown_on_null_or_absent() {
        let quota = UsageQuota::from_value(&json!({ "available_count": null }));
        assert_eq!(quota.available_count, None);
        assert_eq!(quota.limit, None);

        let quota = UsageQuota::from_value(&json!({ "available_count": "soon" }));
        assert_eq!(quota.available_count, None);
    }

    #[test]
    fn test_remaining_from_error_body() {
        assert_eq!(
            remaining_from_error(r#"{"detail":"quota used up","available_count":0}"#),
            Some(0)
        );
        assert_eq!(remaining_from_error(r#"{"detail":"quota used up"}"#), None);
        assert_eq!(remaining_from_error("not json"), None);
    }

    #[test]
    fn test_error_message_keys() {
        assert_eq!(
            error_message(r#"{"detail":"tool disabled"}"#).as_deref(),
            Some("tool disabled")
        );
        assert_eq!(
            error_message(r#"{"message":"oops"}"#).as_deref(),
            Some("oops")
        );
        assert_eq!(error_message(r#"{"code":500}"#), None);
        assert_eq!(error_message("<html>"), None);
    }

    #[test]
    fn test_records_from_body() {
        let records =
            records_from_body(&json!({ "data": [ { "Produktname": "Aceton" } ] })).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("Produktname"), "Aceton");

        let err = records_from_body(&json!({ "status": "ok" })).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));

        let err = records_from_body(&json!({ "data": "yes" })).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn test_login_response_into_session() {
        let response: LoginResponse = serde_json::from_value(json!({
            "token": "tok",
            "user": { "id": 42, "email": "lab@example.com", "role": "customer" },
        }))
        .unwrap();

        let session = response.into_session();
        assert_eq!(session.user_id, "42");
        assert_eq!(session.email, "lab@example.com");
    }
}
