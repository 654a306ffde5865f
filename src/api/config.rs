//! API client configuration.

use std::time::Duration;

/// Default API endpoint when `TODO_API_URL` is not set at build time.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Fixed request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage key for the cached metrics snapshot.
pub const METRICS_CACHE_KEY: &str = "metrics_cache";

/// How long a cached metrics snapshot stays fresh.
pub const METRICS_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the base URL baked in at compile time (`TODO_API_URL`).
    pub fn from_env() -> Self {
        Self::new(option_env!("TODO_API_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    /// Absolute URL for a path relative to the base.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig::new("http://api.local:9000/");
        assert_eq!(config.base_url, "http://api.local:9000");
        assert_eq!(config.url("/tasks/"), "http://api.local:9000/tasks/");
        assert_eq!(config.url("metrics"), "http://api.local:9000/metrics");
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
