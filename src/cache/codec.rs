//! Serialization Codec Module
//!
//! Converts structured values and raw deadlines to/from the opaque byte
//! representation used by the store. The codec makes no assumption about
//! value shape; shape validation belongs to callers.

use serde_json::Value;

use crate::error::{CacheError, Result};

// == Value Encoding ==
/// Encodes an arbitrary JSON-like value into storable bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| CacheError::Internal(format!("encode failed: {e}")))
}

/// Decodes bytes previously produced by [`encode`].
///
/// Fails with `CorruptValue` on anything else; never partially succeeds.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes)
        .map_err(|e| CacheError::CorruptValue(format!("undecodable value bytes: {e}")))
}

// == Deadline Encoding ==
/// Encodes an absolute deadline (seconds since epoch, or the never-expire
/// sentinel) through the same byte representation as values.
pub fn encode_deadline(deadline: u64) -> Vec<u8> {
    // A bare u64 always serializes to a JSON number
    deadline.to_string().into_bytes()
}

/// Decodes a stored deadline.
pub fn decode_deadline(bytes: &[u8]) -> Result<u64> {
    serde_json::from_slice(bytes)
        .map_err(|e| CacheError::CorruptValue(format!("undecodable expiry bytes: {e}")))
}
