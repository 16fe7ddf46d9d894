//! # Flat Tree — Single-Country Optimization
//!
//! Puts boundary-type layers directly under one root, skipping the
//! continent/country/region levels a single-country deployment does not
//! need. Leaf layout and fold rule are identical to the hierarchical
//! tree; only the composition above the layers differs, so a flat root is
//! not comparable to the matching slice of a global tree and is not meant
//! to be.

use serde::{Deserialize, Serialize};
use tracing::warn;

use atlas_core::{BoundaryType, Timestamp};
use atlas_resolve::ResolvedBoundary;

use crate::global::{decode_roots, SkippedLayer};
use crate::hash::fold_root;
use crate::layer::{build_layer, LayerTree};
use crate::{TreeError, SCHEMA_VERSION};

use std::collections::BTreeMap;

/// A single-country integrity tree: layer subtrees under one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTree {
    /// Fold of the layer roots in canonical boundary-type order, 64
    /// lowercase hex chars.
    pub root: String,
    /// Layer subtrees in canonical boundary-type order.
    pub layers: Vec<LayerTree>,
    /// Districts committed across all layers.
    pub total_district_count: usize,
    /// When this snapshot generation was built.
    pub built_at: Timestamp,
    /// Leaf layout and composition rule version.
    pub schema_version: u32,
}

/// Build outcome: the tree plus any flagged layer skips.
#[derive(Debug, Clone)]
pub struct FlatBuild {
    /// The assembled tree.
    pub tree: FlatTree,
    /// Layers excluded from the tree.
    pub skipped: Vec<SkippedLayer>,
}

/// Build a flat tree over a resolved batch.
///
/// # Errors
///
/// [`TreeError::EmptyBatch`] if the batch is empty or every layer was
/// skipped.
pub fn build_flat(
    boundaries: &[ResolvedBoundary],
    built_at: Timestamp,
) -> Result<FlatBuild, TreeError> {
    if boundaries.is_empty() {
        return Err(TreeError::EmptyBatch);
    }

    let mut groups: BTreeMap<BoundaryType, Vec<ResolvedBoundary>> = BTreeMap::new();
    for entry in boundaries {
        groups
            .entry(entry.record.boundary_type)
            .or_default()
            .push(entry.clone());
    }

    let mut skipped = Vec::new();
    let mut layers = Vec::new();
    for (boundary_type, entries) in groups {
        match build_layer(boundary_type, &entries) {
            Ok(tree) => layers.push(tree),
            Err(error) => {
                warn!(layer = %boundary_type, %error, "layer build failed, flagged and skipped");
                skipped.push(SkippedLayer {
                    scope: "flat".to_string(),
                    boundary_type,
                    reason: error.to_string(),
                });
            }
        }
    }

    if layers.is_empty() {
        return Err(TreeError::EmptyBatch);
    }
    let roots = decode_roots(layers.iter().map(|l| l.subtree_root.as_str()))?;
    let root = fold_root(&roots).ok_or(TreeError::EmptyBatch)?;

    Ok(FlatBuild {
        tree: FlatTree {
            root: root.to_hex(),
            total_district_count: layers.iter().map(|l| l.leaf_count).sum(),
            layers,
            built_at,
            schema_version: SCHEMA_VERSION,
        },
        skipped,
    })
}
