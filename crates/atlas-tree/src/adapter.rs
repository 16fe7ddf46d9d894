//! # Snapshot Adapter
//!
//! The entry point callers build trees through. Owns two decisions:
//!
//! - **Scope**: only records whose country is in
//!   [`SnapshotConfig::countries`] are committed.
//! - **Shape**: exactly one in-scope country with the optimization enabled
//!   gets a [`FlatTree`]; everything else gets a [`GlobalMerkleTree`].
//!
//! Root extraction walks an already-built global tree and never rehashes;
//! the returned maps are read-only views of roots the build already
//! committed to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use atlas_core::{CountryCode, Timestamp};
use atlas_resolve::ResolvedBoundary;

use crate::flat::{build_flat, FlatTree};
use crate::global::{assemble_global, GlobalMerkleTree, SkippedLayer};
use crate::TreeError;

/// What to commit and which tree shape to prefer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Countries in scope; records outside them are filtered out.
    pub countries: Vec<CountryCode>,
    /// Use the flat shape when exactly one country is in scope.
    pub use_single_country_optimization: bool,
    /// Build timestamp override; `None` stamps the snapshot with now.
    pub as_of: Option<Timestamp>,
}

/// The built tree, tagged by shape.
///
/// Internally tagged so a persisted snapshot names its own shape; match
/// exhaustively, never by probing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SnapshotTree {
    /// Single-country layer-under-root tree.
    Flat(FlatTree),
    /// Full continent/country/region hierarchy.
    Global(GlobalMerkleTree),
}

/// Snapshot outcome: the tree plus any flagged layer skips.
#[derive(Debug, Clone)]
pub struct SnapshotBuild {
    /// The built tree.
    pub tree: SnapshotTree,
    /// Layers excluded from the tree.
    pub skipped: Vec<SkippedLayer>,
}

/// Build an integrity tree over a resolved batch.
///
/// # Errors
///
/// [`TreeError::EmptyBatch`] if no record is in scope, plus anything the
/// underlying shape build reports.
pub fn build_snapshot(
    boundaries: &[ResolvedBoundary],
    config: &SnapshotConfig,
) -> Result<SnapshotBuild, TreeError> {
    let in_scope: Vec<ResolvedBoundary> = boundaries
        .iter()
        .filter(|b| {
            config
                .countries
                .iter()
                .any(|c| c.as_str() == b.record.jurisdiction.country.as_str())
        })
        .cloned()
        .collect();
    if in_scope.is_empty() {
        return Err(TreeError::EmptyBatch);
    }

    let built_at = match config.as_of {
        Some(ts) => ts,
        None => Timestamp::now(),
    };
    let flat = config.countries.len() == 1 && config.use_single_country_optimization;
    debug!(
        in_scope = in_scope.len(),
        countries = config.countries.len(),
        shape = if flat { "flat" } else { "global" },
        "building snapshot tree"
    );

    if flat {
        let build = build_flat(&in_scope, built_at)?;
        Ok(SnapshotBuild {
            tree: SnapshotTree::Flat(build.tree),
            skipped: build.skipped,
        })
    } else {
        let build = assemble_global(&in_scope, built_at)?;
        Ok(SnapshotBuild {
            tree: SnapshotTree::Global(build.tree),
            skipped: build.skipped,
        })
    }
}

/// Collect country code → country root from a built global tree.
pub fn extract_country_roots(tree: &GlobalMerkleTree) -> BTreeMap<String, String> {
    tree.continents
        .iter()
        .flat_map(|continent| {
            continent
                .countries
                .iter()
                .map(|c| (c.code.clone(), c.root.clone()))
        })
        .collect()
}

/// Collect continent name → continent root from a built global tree.
pub fn extract_continental_roots(tree: &GlobalMerkleTree) -> BTreeMap<String, String> {
    tree.continents
        .iter()
        .map(|c| (c.continent.as_str().to_string(), c.root.clone()))
        .collect()
}
