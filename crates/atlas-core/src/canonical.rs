//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes used in
//! digest computation across the Boundary Atlas Stack.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct one is `CanonicalBytes::new()`, which normalizes the value
//! (float rejection, key stringification) before RFC 8785 (JCS)
//! serialization. Any function computing a leaf or node digest must accept
//! `&CanonicalBytes`, so a non-canonical byte sequence can never reach a
//! hash. Two exporters serializing the same leaf payload differently would
//! otherwise produce two different roots for the same boundary set — the
//! exact defect this type exists to rule out.
//!
//! ## Normalization Rules
//!
//! 1. **Reject floats.** Leaf payloads carry identifiers, enum tags, years,
//!    and hex digests; confidence scores never enter a digest. A float here
//!    is an upstream bug and fails loudly.
//! 2. **Object keys are strings, values recursed.**
//! 3. **Arrays recursed.**
//! 4. **Output is JCS**: sorted keys, compact separators, UTF-8.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with the Atlas
/// normalization rules applied.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - No float appears anywhere in the serialized value.
/// - All object keys are strings; serialization uses sorted keys with
///   compact separators (RFC 8785).
///
/// Enforced by the constructor; the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All digest
    /// computation in the workspace flows through here.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// a float, or `CanonicalizationError::SerializationFailed` if JCS
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let normalized = normalize_value(value)?;
        let s = serde_jcs::to_string(&normalized)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively normalize a JSON value for canonical serialization.
///
/// `null`, `bool`, `string`, and integer numbers pass through unchanged;
/// non-integer numbers are rejected; objects and arrays are recursed.
fn normalize_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut normalized = serde_json::Map::new();
            for (k, v) in map {
                normalized.insert(k, normalize_value(v)?);
            }
            Ok(Value::Object(normalized))
        }
        Value::Array(arr) => {
            let normalized: Result<Vec<_>, _> = arr.into_iter().map(normalize_value).collect();
            Ok(Value::Array(normalized?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_keys_compact_separators() {
        let data = serde_json::json!({
            "record_id": "5501",
            "boundary_type": "congressional",
            "authority_tier": "state_redistricting_commission"
        });
        let cb = CanonicalBytes::new(&data).expect("should canonicalize");
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(
            s,
            r#"{"authority_tier":"state_redistricting_commission","boundary_type":"congressional","record_id":"5501"}"#
        );
    }

    #[test]
    fn test_nested_objects_sorted() {
        let data = serde_json::json!({
            "outer": {"b": 2, "a": 1},
            "list": [3, 2, 1]
        });
        let cb = CanonicalBytes::new(&data).expect("should canonicalize");
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(s, r#"{"list":[3,2,1],"outer":{"a":1,"b":2}}"#);
    }

    #[test]
    fn test_float_rejected() {
        let data = serde_json::json!({"confidence": 0.85});
        match CanonicalBytes::new(&data) {
            Err(CanonicalizationError::FloatRejected(f)) => assert_eq!(f, 0.85),
            other => panic!("expected FloatRejected, got: {other:?}"),
        }
    }

    #[test]
    fn test_deeply_nested_float_rejected() {
        let data = serde_json::json!({"a": {"b": [{"c": 3.14}]}});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn test_integers_and_years_accepted() {
        let data = serde_json::json!({"vintage": 2022, "leaf_count": 8});
        let cb = CanonicalBytes::new(&data).expect("integers should be accepted");
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(s, r#"{"leaf_count":8,"vintage":2022}"#);
    }

    #[test]
    fn test_null_and_bool_passthrough() {
        let data = serde_json::json!({"label": null, "inferred": true});
        let cb = CanonicalBytes::new(&data).expect("null/bool should pass through");
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(s, r#"{"inferred":true,"label":null}"#);
    }

    #[test]
    fn test_empty_object() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), 2);
    }

    #[test]
    fn test_unicode_passthrough() {
        // District names carry non-ASCII characters (e.g. "Do\u{00f1}a Ana").
        let data = serde_json::json!({"name": "Do\u{00f1}a Ana"});
        let cb = CanonicalBytes::new(&data).unwrap();
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert!(s.contains('\u{00f1}'));
    }
}
