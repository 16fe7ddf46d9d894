//! # Global Tree Assembler
//!
//! Composes layer trees into the continent → country → region hierarchy
//! and folds the levels into one global root.
//!
//! ## Composition Rule
//!
//! - Region root: fold of its layer roots, in canonical boundary-type
//!   order.
//! - Country root: fold of its region roots, regions sorted by code.
//! - Continent root: fold of its country roots, countries sorted by code.
//! - Global root: fold of the continent roots, continents sorted by name.
//!
//! Every grouping is a `BTreeMap`, so the fold order — and therefore every
//! root — is fully determined by the input set, never by input order.
//!
//! ## Partial Failure
//!
//! A layer that fails to build is flagged in [`GlobalBuild::skipped`] and
//! logged; its siblings proceed. One bad layer never blocks a continent,
//! but it is never silently folded into a root either.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use atlas_core::{BoundaryType, Continent, ContentDigest, Timestamp};
use atlas_resolve::ResolvedBoundary;

use crate::hash::fold_root;
use crate::layer::{build_layer, LayerTree};
use crate::{TreeError, SCHEMA_VERSION};

/// All layers of one region, folded under one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTree {
    /// Region code (US state postal code, provider label, or `"UNKNOWN"`).
    pub code: String,
    /// Fold of the layer roots, 64 lowercase hex chars.
    pub root: String,
    /// Layer subtrees in canonical boundary-type order.
    pub layers: Vec<LayerTree>,
}

/// All regions of one country, folded under one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTree {
    /// ISO country code.
    pub code: String,
    /// Fold of the region roots, 64 lowercase hex chars.
    pub root: String,
    /// Region subtrees sorted by code.
    pub regions: Vec<RegionTree>,
    /// Districts committed beneath this country.
    pub district_count: usize,
}

/// All countries of one continent, folded under one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinentTree {
    /// The continent.
    pub continent: Continent,
    /// Fold of the country roots, 64 lowercase hex chars.
    pub root: String,
    /// Country subtrees sorted by code.
    pub countries: Vec<CountryTree>,
}

/// The fully-assembled hierarchical integrity tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalMerkleTree {
    /// Fold of the continent roots, 64 lowercase hex chars.
    pub global_root: String,
    /// Continent subtrees sorted by continent name.
    pub continents: Vec<ContinentTree>,
    /// Districts committed across the whole tree.
    pub total_district_count: usize,
    /// When this snapshot generation was built.
    pub built_at: Timestamp,
    /// Leaf layout and composition rule version.
    pub schema_version: u32,
}

/// A layer that failed to build and was excluded from the tree.
#[derive(Debug, Clone)]
pub struct SkippedLayer {
    /// Where the layer sits (`"continent/country/region"`, or `"flat"`).
    pub scope: String,
    /// The layer that failed.
    pub boundary_type: BoundaryType,
    /// Rendered build error.
    pub reason: String,
}

/// Assembly outcome: the tree plus any flagged layer skips.
#[derive(Debug, Clone)]
pub struct GlobalBuild {
    /// The assembled tree.
    pub tree: GlobalMerkleTree,
    /// Layers excluded from the tree, in grouping order.
    pub skipped: Vec<SkippedLayer>,
}

type LayerGroups = BTreeMap<BoundaryType, Vec<ResolvedBoundary>>;
type RegionGroups = BTreeMap<String, LayerGroups>;
type CountryGroups = BTreeMap<String, RegionGroups>;

/// Assemble the hierarchical tree from a resolved batch.
///
/// # Errors
///
/// [`TreeError::EmptyBatch`] if the batch is empty or every layer was
/// skipped.
pub fn assemble_global(
    boundaries: &[ResolvedBoundary],
    built_at: Timestamp,
) -> Result<GlobalBuild, TreeError> {
    if boundaries.is_empty() {
        return Err(TreeError::EmptyBatch);
    }

    let mut groups: BTreeMap<Continent, CountryGroups> = BTreeMap::new();
    for entry in boundaries {
        let j = &entry.record.jurisdiction;
        groups
            .entry(j.continent)
            .or_default()
            .entry(j.country.as_str().to_string())
            .or_default()
            .entry(j.region.clone())
            .or_default()
            .entry(entry.record.boundary_type)
            .or_default()
            .push(entry.clone());
    }

    let mut skipped = Vec::new();
    let mut continents = Vec::new();
    let mut total = 0usize;

    for (continent, countries) in groups {
        let mut country_trees = Vec::new();
        for (country_code, regions) in countries {
            let mut region_trees = Vec::new();
            let mut district_count = 0usize;
            for (region_code, layers) in regions {
                let scope = format!("{continent}/{country_code}/{region_code}");
                if let Some(region) = build_region(region_code, layers, &scope, &mut skipped)? {
                    district_count += region.layers.iter().map(|l| l.leaf_count).sum::<usize>();
                    region_trees.push(region);
                }
            }
            if region_trees.is_empty() {
                continue;
            }
            let roots = decode_roots(region_trees.iter().map(|r| r.root.as_str()))?;
            // Non-empty region list, so the fold cannot come back empty.
            let root = fold_root(&roots).ok_or(TreeError::EmptyBatch)?;
            total += district_count;
            country_trees.push(CountryTree {
                code: country_code,
                root: root.to_hex(),
                regions: region_trees,
                district_count,
            });
        }
        if country_trees.is_empty() {
            continue;
        }
        let roots = decode_roots(country_trees.iter().map(|c| c.root.as_str()))?;
        let root = fold_root(&roots).ok_or(TreeError::EmptyBatch)?;
        continents.push(ContinentTree {
            continent,
            root: root.to_hex(),
            countries: country_trees,
        });
    }

    if continents.is_empty() {
        return Err(TreeError::EmptyBatch);
    }
    let roots = decode_roots(continents.iter().map(|c| c.root.as_str()))?;
    let global_root = fold_root(&roots).ok_or(TreeError::EmptyBatch)?;

    Ok(GlobalBuild {
        tree: GlobalMerkleTree {
            global_root: global_root.to_hex(),
            continents,
            total_district_count: total,
            built_at,
            schema_version: SCHEMA_VERSION,
        },
        skipped,
    })
}

/// Build one region's layer trees, flagging failed layers.
///
/// Returns `None` when every layer of the region was skipped.
fn build_region(
    code: String,
    layers: LayerGroups,
    scope: &str,
    skipped: &mut Vec<SkippedLayer>,
) -> Result<Option<RegionTree>, TreeError> {
    let mut layer_trees = Vec::new();
    for (boundary_type, entries) in layers {
        match build_layer(boundary_type, &entries) {
            Ok(tree) => layer_trees.push(tree),
            Err(error) => {
                warn!(%scope, layer = %boundary_type, %error, "layer build failed, flagged and skipped");
                skipped.push(SkippedLayer {
                    scope: scope.to_string(),
                    boundary_type,
                    reason: error.to_string(),
                });
            }
        }
    }
    if layer_trees.is_empty() {
        return Ok(None);
    }
    let roots = decode_roots(layer_trees.iter().map(|l| l.subtree_root.as_str()))?;
    let root = fold_root(&roots).ok_or(TreeError::EmptyBatch)?;
    Ok(Some(RegionTree {
        code,
        root: root.to_hex(),
        layers: layer_trees,
    }))
}

/// Decode a sequence of hex roots back to digests for folding.
pub(crate) fn decode_roots<'a>(
    roots: impl Iterator<Item = &'a str>,
) -> Result<Vec<ContentDigest>, TreeError> {
    roots
        .map(|r| ContentDigest::from_hex(r).map_err(TreeError::from))
        .collect()
}
