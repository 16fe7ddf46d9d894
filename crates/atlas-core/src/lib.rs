//! # atlas-core — Foundational Types for the Boundary Atlas Stack
//!
//! This crate is the bedrock of the Boundary Atlas Stack. It defines the
//! type-system primitives every other crate in the workspace builds on;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `CountryCode`, `SourceId`,
//!    `GeometryPayload` — validated constructors, no bare strings crossing
//!    crate boundaries.
//!
//! 2. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for digests.
//!    Ever. Two byte sequences for the same leaf payload would split the
//!    tree roots, so the wrong-serialization path is impossible by
//!    construction.
//!
//! 3. **Exhaustive geographic enums.** One `BoundaryType` definition, one
//!    `Continent` definition, exhaustive `match` everywhere. Unknown country
//!    codes degrade to `Continent::Unknown` instead of aborting a batch.
//!
//! 4. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision, so two ingestions of the same record
//!    never disagree on its retrieval instant.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `atlas-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod boundary;
pub mod canonical;
pub mod canonicalize;
pub mod digest;
pub mod error;
pub mod geo;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use boundary::{
    AuthorityTier, BoundaryRecord, BoundaryType, CountryCode, GeometryPayload, JurisdictionPath,
    RawBoundaryRecord, SourceId,
};
pub use canonical::CanonicalBytes;
pub use canonicalize::canonicalize;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DIGEST_WIDTH};
pub use error::AtlasError;
pub use geo::{continent_for_country, us_state_for_fips, Continent, UNKNOWN_REGION};
pub use temporal::Timestamp;
