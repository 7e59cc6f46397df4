//! Canonical JSON encoder for state fingerprints and audit lines.
//!
//! Canonical rules:
//! - object keys sorted by UTF-8 byte order, recursively
//! - no insignificant whitespace
//! - integers in plain decimal, strings with serde_json's standard escaping
//! - floats rejected outright: the pricing path is integer-only

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanonJsonError {
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("float values are not allowed in canonical payloads")]
    Float,
}

/// Serialize a value to its unique canonical byte form.
pub fn to_canon_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CanonJsonError> {
    let value = serde_json::to_value(value)?;
    let canon = canon_value(value)?;
    Ok(serde_json::to_vec(&canon)?)
}

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Fingerprint of a value's canonical byte form.
pub fn canon_sha256_hex<T: Serialize>(value: &T) -> Result<String, CanonJsonError> {
    Ok(sha256_hex(&to_canon_json_bytes(value)?))
}

fn canon_value(value: Value) -> Result<Value, CanonJsonError> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut canon = Map::new();
            for (key, value) in entries {
                canon.insert(key, canon_value(value)?);
            }
            Ok(Value::Object(canon))
        }
        Value::Array(values) => Ok(Value::Array(
            values
                .into_iter()
                .map(canon_value)
                .collect::<Result<_, _>>()?,
        )),
        Value::Number(n) if n.is_f64() => Err(CanonJsonError::Float),
        other => Ok(other),
    }
}
