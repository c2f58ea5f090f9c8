//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL for the external key-value store
    pub store_url: String,
    /// Request timeout in seconds for page fetches
    pub fetch_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_URL` - Key-value store URL (default: redis://127.0.0.1/)
    /// - `FETCH_TIMEOUT` - HTTP request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1/".to_string()),
            fetch_timeout: env::var("FETCH_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: "redis://127.0.0.1/".to_string(),
            fetch_timeout: 10,
        }
    }
}
