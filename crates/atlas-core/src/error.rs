//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the Boundary Atlas Stack. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Canonicalization and digest errors fail loudly with full context —
//!   a silently wrong root is worse than no root.
//! - Record validation errors name the offending field and value.
//! - Region inference never errors: an unrecognized region degrades to
//!   `"UNKNOWN"` so one malformed record cannot abort a batch. Only shape
//!   violations (empty id, absurd vintage) are hard failures.

use thiserror::Error;

/// Top-level error type for the Boundary Atlas Stack core.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Canonical serialization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A raw record was malformed beyond repair (rejected pre-canonicalization).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Leaf payloads carry identifiers, enum tags, and hex digests only;
    /// a float reaching this path is a programming error upstream.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in digest decoding and hash-tree plumbing.
#[derive(Error, Debug)]
pub enum HashError {
    /// A digest string was not 64 lowercase hex characters.
    #[error("malformed digest hex: {0}")]
    MalformedHex(String),
}
