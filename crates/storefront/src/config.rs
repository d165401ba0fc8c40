//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPVERSE_API_URL` - Backend base URL (default: <http://localhost:8000>)
//! - `SHOPVERSE_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `SHOPVERSE_SESSION_DIR` - Directory holding the local session (default: .shopverse)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: &str = "30";
const DEFAULT_SESSION_DIR: &str = ".shopverse";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Directory of the on-disk session storage
    pub session_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Backend API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// API configuration for `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_api_url("SHOPVERSE_API_URL", base_url)?,
            timeout: parse_timeout("SHOPVERSE_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api = ApiConfig {
            base_url: parse_api_url(
                "SHOPVERSE_API_URL",
                &get_env_or_default("SHOPVERSE_API_URL", DEFAULT_API_URL),
            )?,
            timeout: parse_timeout(
                "SHOPVERSE_API_TIMEOUT_SECS",
                &get_env_or_default("SHOPVERSE_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            )?,
        };
        let session_dir =
            PathBuf::from(get_env_or_default("SHOPVERSE_SESSION_DIR", DEFAULT_SESSION_DIR));

        Ok(Self {
            api,
            session_dir,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse the backend base URL. Only absolute http(s) URLs are accepted.
fn parse_api_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected an http(s) URL, got {raw}"),
        ));
    }
    Ok(url)
}

/// Parse a timeout in whole seconds. Zero is rejected.
fn parse_timeout(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url() {
        let url = parse_api_url("TEST_URL", "http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");

        let url = parse_api_url("TEST_URL", " https://api.example.com/v1/ ").unwrap();
        assert_eq!(url.path(), "/v1/");
    }

    #[test]
    fn test_parse_api_url_rejects_non_http() {
        let err = parse_api_url("TEST_URL", "ftp://files.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TEST_URL"));

        assert!(parse_api_url("TEST_URL", "mailto:shop@example.com").is_err());
        assert!(parse_api_url("TEST_URL", "localhost:8000/api").is_err());
        assert!(parse_api_url("TEST_URL", "not a url").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("T", "30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout("T", " 5 ").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout("T", "0").is_err());
        assert!(parse_timeout("T", "-1").is_err());
        assert!(parse_timeout("T", "soon").is_err());
    }

    #[test]
    fn test_api_config_new_uses_default_timeout() {
        let config = ApiConfig::new("http://127.0.0.1:9000").unwrap();
        assert_eq!(config.base_url.port(), Some(9000));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("SHOPVERSE_API_URL".to_string(), "bad".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable SHOPVERSE_API_URL: bad"
        );
    }
}
