//! # atlas-tree — Multi-Layer Integrity Trees
//!
//! Commits a resolved boundary set into a tamper-evident hash structure:
//!
//! - **Layer trees**: one hash subtree per boundary type, leaves sorted by
//!   record id so the root is independent of input order.
//! - **Global tree**: continent → country → region → layer hierarchy with
//!   per-country and per-continent verification anchors.
//! - **Flat tree**: single-country optimization that puts boundary-type
//!   layers directly under one root.
//! - **Snapshot adapter**: the public entry point owning the
//!   flat-vs-hierarchical decision and root extraction.
//!
//! All structures are immutable value snapshots of one input batch; a
//! changed source set produces an entirely new generation. The canonical
//! leaf layout and the 32-byte digest width are fixed — changing either
//! invalidates every previously published root and attestation, which is
//! why [`SCHEMA_VERSION`] exists.
//!
//! ## Crate Policy
//!
//! - Pure functions over in-memory snapshots; no I/O, no interior
//!   mutability.
//! - Per-layer build failures are flagged and skipped, never silently
//!   folded into a wrong root.
//! - No `unsafe`, no `panic!()`/`.unwrap()` outside tests.

pub mod adapter;
pub mod flat;
pub mod global;
pub mod hash;
pub mod layer;

use thiserror::Error;

use atlas_core::error::{CanonicalizationError, HashError};
use atlas_core::BoundaryType;

pub use adapter::{
    build_snapshot, extract_continental_roots, extract_country_roots, SnapshotBuild,
    SnapshotConfig, SnapshotTree,
};
pub use flat::{build_flat, FlatBuild, FlatTree};
pub use global::{
    assemble_global, ContinentTree, CountryTree, GlobalBuild, GlobalMerkleTree, RegionTree,
    SkippedLayer,
};
pub use layer::{build_layer, LayerLeaf, LayerTree};

/// Version of the canonical leaf layout and tree composition rules.
///
/// Bumped only when the leaf serialization, domain separation, or fold
/// rule changes — any such change invalidates all prior roots.
pub const SCHEMA_VERSION: u32 = 1;

/// Tree construction failures.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The batch (or its in-scope subset) contained no records.
    #[error("empty batch: no boundaries to commit")]
    EmptyBatch,

    /// A layer build received no records.
    #[error("empty layer: {0}")]
    EmptyLayer(BoundaryType),

    /// A record of the wrong boundary type reached a layer build.
    #[error("layer mismatch: building {expected}, record {record_id:?} is {found}")]
    LayerMismatch {
        /// The layer being built.
        expected: BoundaryType,
        /// The stray record's boundary type.
        found: BoundaryType,
        /// The stray record's id.
        record_id: String,
    },

    /// Canonical serialization of a leaf payload failed.
    #[error("leaf canonicalization failed: {0}")]
    Canonical(#[from] CanonicalizationError),

    /// Digest decoding failed.
    #[error("digest error: {0}")]
    Hash(#[from] HashError),
}
