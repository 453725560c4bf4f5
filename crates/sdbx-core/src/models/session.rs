//! Persisted login session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SdbxError;

/// A signed-in session, written to disk after `login`.
///
/// The token is sent as a bearer token on every authenticated request.
/// Sessions carry no expiry client-side; a rejected token surfaces as
/// `ApiError::Unauthorized` and the user logs in again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued by the login endpoint.
    pub token: String,

    /// Backend user id, sent with every upload.
    pub user_id: String,

    /// Account email.
    pub email: String,

    /// Account role as reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Session {
    /// Load a session from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SdbxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save the session to a JSON file, creating parent directories.
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session {
            token: "tok-123".to_string(),
            user_id: "42".to_string(),
            email: "lab@example.com".to_string(),
            role: Some("customer".to_string()),
        };
        session.save(&path).unwrap();

        let loaded = Session::from_file(&path).unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.user_id, "42");
        assert_eq!(loaded.role.as_deref(), Some("customer"));
    }

    #[test]
    fn test_role_is_optional() {
        let json = r#"{ "token": "t", "user_id": "1", "email": "a@b.c" }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.role, None);
    }
}
