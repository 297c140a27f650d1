use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key of the persisted account record. Written on login and removed
/// on logout.
pub const SESSION_KEY: &str = "account";

/// Authenticated user: the profile returned by the auth API plus the bearer
/// token it was fetched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub profile: Value,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(profile: Value, token: String) -> Self {
        Self {
            profile,
            token,
            logged_in_at: Utc::now(),
        }
    }

    /// Best-effort display name taken from the opaque profile.
    pub fn display_name(&self) -> String {
        let field = |key: &str| self.profile.get(key).and_then(Value::as_str);
        match (field("firstName"), field("lastName")) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            _ => field("username").unwrap_or("user").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

/// Response of `POST /auth/login`. Newer deployments name the field
/// `accessToken`; some send both.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "accessToken")]
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// `token` wins when both are present.
    pub fn into_token(self) -> Result<String, DomainError> {
        self.token
            .or(self.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Unauthorized("login response carried no token".to_string()))
    }
}
