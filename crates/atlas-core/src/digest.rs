//! # Content Digest — Fixed-Width Hash Values
//!
//! Defines `ContentDigest`, the 32-byte SHA-256 value that every tree node
//! and attestation root in the Boundary Atlas Stack is expressed in.
//!
//! ## Security Invariant
//!
//! A `ContentDigest` can only be computed from `CanonicalBytes`, ensuring
//! that all digests in the system are produced through the canonicalization
//! pipeline. This is enforced by the signature of [`sha256_digest()`].
//!
//! The digest width is fixed at 32 bytes (64 lowercase hex characters) and
//! must never change: every previously published root and attestation is
//! expressed in it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::HashError;

/// Width of every digest in the stack, in bytes.
pub const DIGEST_WIDTH: usize = 32;

/// A 32-byte SHA-256 digest.
///
/// Produced from `CanonicalBytes` via [`sha256_digest()`], or decoded from
/// a 64-character lowercase hex string via [`ContentDigest::from_hex()`].
/// The derived `Ord` is bytewise and agrees with lexical order of the hex
/// rendering, so digest-keyed sorts need no hex round-trip.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ContentDigest(pub [u8; DIGEST_WIDTH]);

impl ContentDigest {
    /// Render the digest as a lowercase hex string (64 characters).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a digest from a 64-character hex string.
    ///
    /// Accepts upper or lower case and surrounding whitespace; the decoded
    /// value is case-normalized by construction.
    ///
    /// # Errors
    ///
    /// Returns `HashError::MalformedHex` if the input is not exactly 64 hex
    /// characters.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 2 * DIGEST_WIDTH {
            return Err(HashError::MalformedHex(format!(
                "expected {} hex chars, got {}",
                2 * DIGEST_WIDTH,
                hex.len()
            )));
        }
        let mut out = [0u8; DIGEST_WIDTH];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk)
                .map_err(|e| HashError::MalformedHex(format!("invalid hex: {e}")))?;
            out[i] = u8::from_str_radix(s, 16)
                .map_err(|e| HashError::MalformedHex(format!("invalid hex at {i}: {e}")))?;
        }
        Ok(Self(out))
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_WIDTH] {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// Accepts only `&CanonicalBytes`, not raw `&[u8]`. This compile-time
/// constraint prevents any code path from computing a digest over
/// non-canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; DIGEST_WIDTH];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}

/// Compute a SHA-256 hex string from canonical bytes.
///
/// Convenience wrapper around [`sha256_digest()`] for contexts holding
/// digests as hex strings (tree leaves and roots).
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    sha256_digest(data).to_hex()
}
