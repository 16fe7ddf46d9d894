//! # Layer Tree Builder
//!
//! Builds one hash subtree per boundary type from resolved records.
//!
//! ## Canonical Leaf Layout
//!
//! Each leaf covers exactly four fields, serialized as JCS canonical bytes
//! and hashed with the leaf domain tag:
//!
//! ```json
//! {"authority_tier":…,"boundary_type":…,"geometry_sha256":…,"record_id":…}
//! ```
//!
//! Free-form `properties`, names, sources, and timestamps are excluded by
//! construction: a metadata-only edit never moves a root, a geometry or
//! authority change always does. This layout is fixed; changing it bumps
//! [`crate::SCHEMA_VERSION`] and invalidates every prior root.
//!
//! Leaves are sorted by record id (then leaf hash, for the id collisions
//! the identity invariant allows) before folding, so the subtree root is
//! independent of input order.

use serde::{Deserialize, Serialize};

use atlas_core::{BoundaryRecord, BoundaryType, CanonicalBytes, ContentDigest};
use atlas_resolve::ResolvedBoundary;

use crate::hash::{fold_root, leaf_hash};
use crate::TreeError;

/// The canonical leaf payload. Field names are part of the attestation
/// format; JCS sorts them, so declaration order here is cosmetic.
#[derive(Serialize)]
struct LeafPayload<'a> {
    authority_tier: &'a str,
    boundary_type: &'a str,
    geometry_sha256: String,
    record_id: &'a str,
}

/// One leaf of a layer tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerLeaf {
    /// The record id this leaf commits.
    pub record_id: String,
    /// Leaf hash, 64 lowercase hex chars.
    pub leaf_hash: String,
}

/// A per-boundary-type hash subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerTree {
    /// The layer this subtree commits.
    pub boundary_type: BoundaryType,
    /// Leaves in (record id, leaf hash) order.
    pub leaves: Vec<LayerLeaf>,
    /// Root of the subtree, 64 lowercase hex chars.
    pub subtree_root: String,
    /// Number of leaves.
    pub leaf_count: usize,
}

/// Compute the canonical leaf hash for one resolved record.
pub fn record_leaf_hash(record: &BoundaryRecord) -> Result<ContentDigest, TreeError> {
    let payload = LeafPayload {
        authority_tier: record.authority_tier.as_str(),
        boundary_type: record.boundary_type.as_str(),
        geometry_sha256: record.geometry.digest().to_hex(),
        record_id: &record.id,
    };
    let cb = CanonicalBytes::new(&payload)?;
    Ok(leaf_hash(&cb))
}

/// Build the hash subtree for one layer.
///
/// # Errors
///
/// [`TreeError::EmptyLayer`] for an empty input slice;
/// [`TreeError::LayerMismatch`] if a record of another boundary type is
/// present.
pub fn build_layer(
    boundary_type: BoundaryType,
    resolved: &[ResolvedBoundary],
) -> Result<LayerTree, TreeError> {
    if resolved.is_empty() {
        return Err(TreeError::EmptyLayer(boundary_type));
    }

    let mut leaves: Vec<(String, ContentDigest)> = Vec::with_capacity(resolved.len());
    for entry in resolved {
        let record = &entry.record;
        if record.boundary_type != boundary_type {
            return Err(TreeError::LayerMismatch {
                expected: boundary_type,
                found: record.boundary_type,
                record_id: record.id.clone(),
            });
        }
        leaves.push((record.id.clone(), record_leaf_hash(record)?));
    }

    // Bytewise digest order agrees with hex order; no per-comparison
    // rendering.
    leaves.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let digests: Vec<ContentDigest> = leaves.iter().map(|(_, d)| *d).collect();
    let root = fold_root(&digests).ok_or(TreeError::EmptyLayer(boundary_type))?;

    Ok(LayerTree {
        boundary_type,
        leaf_count: leaves.len(),
        leaves: leaves
            .into_iter()
            .map(|(record_id, digest)| LayerLeaf {
                record_id,
                leaf_hash: digest.to_hex(),
            })
            .collect(),
        subtree_root: root.to_hex(),
    })
}
