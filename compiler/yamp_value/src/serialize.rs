//! Binary encoding of values.
//!
//! Every variant round-trips: `Value::from_bytes(&v.to_bytes()?)? == v`.
//! Composite values (a lambda's captured scope, the function behind a
//! plot series) are encoded through their own `Serialize` impls. Decoding
//! goes through the same checks as construction: matrices, ranges, sorted
//! sets and lambda bodies are validated wherever they are nested.

use crate::errors::{serialization_failed, EvalError};
use crate::value::Value;

impl Value {
    /// Encode this value.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EvalError> {
        bincode::serialize(self).map_err(|e| serialization_failed(&e.to_string()))
    }

    /// Decode a value produced by [`Value::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Value, EvalError> {
        bincode::deserialize(bytes).map_err(|e| serialization_failed(&e.to_string()))
    }
}

#[cfg(test)]
mod tests;
