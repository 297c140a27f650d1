use crate::domain::error::DomainError;
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RECIPE_API_URL: &str = "https://dummyjson.com";
pub const DEFAULT_AUTH_API_URL: &str = "https://dummyjson.com";
pub const DEFAULT_CART_API_URL: &str = "http://localhost:9999";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub recipe_api_url: String,
    pub auth_api_url: String,
    pub cart_api_url: String,
    pub session_dir: PathBuf,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let session_dir = match lookup("RECIPE_SESSION_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = lookup("HOME").ok_or_else(|| {
                    DomainError::Validation(
                        "HOME is not set; set RECIPE_SESSION_DIR instead".to_string(),
                    )
                })?;
                PathBuf::from(home).join(".config").join("recipe-catalog")
            }
        };

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                DomainError::Validation(format!("HTTP_TIMEOUT_SECS must be a number, got {:?}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            recipe_api_url: url("RECIPE_API_URL", DEFAULT_RECIPE_API_URL),
            auth_api_url: url("AUTH_API_URL", DEFAULT_AUTH_API_URL),
            cart_api_url: url("CART_API_URL", DEFAULT_CART_API_URL),
            session_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
