//! Error types for the instrumented client
//!
//! Provides unified error handling using thiserror.
//!
//! This layer performs no validation and defines no failure modes of
//! its own: every variant wraps an error raised by the store client,
//! the HTTP client, or a decoder, and propagates it unchanged.

use thiserror::Error;

// == Trace Error Enum ==
/// Unified error type for the instrumented client.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The key-value store client failed
    #[error("store error: {0}")]
    Store(#[from] redis::RedisError),

    /// The HTTP fetch failed
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A stored value could not be decoded as UTF-8 text
    #[error("decode error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A stored value could not be parsed as an integer
    #[error("decode error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

// == Result Type Alias ==
/// Convenience Result type for the instrumented client.
pub type Result<T> = std::result::Result<T, TraceError>;
