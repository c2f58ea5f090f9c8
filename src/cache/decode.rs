//! Decode Module
//!
//! Canonical decoders applied to raw bytes read back from the store.
//! Decode failures propagate to the caller unchanged.

use crate::error::Result;

/// Decodes raw bytes as UTF-8 text.
pub fn as_text(raw: &[u8]) -> Result<String> {
    Ok(String::from_utf8(raw.to_vec())?)
}

/// Decodes raw bytes as a decimal integer.
pub fn as_int(raw: &[u8]) -> Result<i64> {
    Ok(as_text(raw)?.parse()?)
}
