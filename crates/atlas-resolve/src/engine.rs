//! # Resolution Engine
//!
//! Selects one winning record from a set of competing candidates for the
//! same jurisdiction and boundary type, attaching a confidence score and a
//! human-readable justification, and applies the same procedure per layer
//! across a whole batch with per-district failure isolation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use atlas_core::{AuthorityTier, BoundaryRecord, BoundaryType, SourceId, Timestamp};

use crate::preference::{in_redistricting_gap, preference_score, vintage_is_current};

/// Resolution-time contract violations. Fatal for the offending
/// jurisdiction or layer only; batch resolution isolates them.
#[derive(Debug)]
pub enum ResolveError {
    /// Resolution was invoked with no candidates.
    EmptyCandidateSet,

    /// Candidates mixed boundary types or jurisdictions.
    BoundaryMismatch {
        /// Scope of the first candidate (`type country/region`).
        expected: String,
        /// Scope of the first disagreeing candidate.
        found: String,
    },

    /// A reference comparison was handed a record from the wrong source tier.
    UnexpectedReferenceSource {
        /// Tier of the record actually supplied.
        found: AuthorityTier,
        /// Source of the record actually supplied.
        source: String,
    },
}

// Hand-written rather than derived via `thiserror`: the derive treats any
// field named `source` as the `Error::source` cause, but here `source` is a
// plain source identifier, not a nested error.
impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCandidateSet => write!(f, "empty candidate set"),
            Self::BoundaryMismatch { expected, found } => {
                write!(f, "boundary mismatch: expected {expected}, found {found}")
            }
            Self::UnexpectedReferenceSource { found, source } => write!(
                f,
                "unexpected reference source: expected national_aggregator, found {found} ({source})"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A losing candidate, recorded for audit alongside the winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateCandidate {
    /// Publishing source of the alternate.
    pub source: SourceId,
    /// Its authority tier.
    pub authority_tier: AuthorityTier,
    /// Its vintage.
    pub vintage: u16,
    /// Its preference score for this layer.
    pub preference: u8,
}

/// The outcome of resolving one district: winner, confidence, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedBoundary {
    /// The winning record.
    pub record: BoundaryRecord,
    /// Confidence in the selection, 0.0–1.0. Single-source resolution is
    /// always exactly 1.0.
    pub confidence: f64,
    /// Justification for the selection.
    pub reasoning: String,
    /// The candidates that lost, in ranking order.
    pub alternates_considered: Vec<AlternateCandidate>,
}

/// One district that could not be resolved within a layer.
#[derive(Debug)]
pub struct DistrictFailure {
    /// Country of the failed group.
    pub country: String,
    /// District identifier of the failed group.
    pub district_id: String,
    /// Why resolution failed.
    pub error: ResolveError,
}

/// Per-layer batch resolution outcome: winners plus flagged failures.
#[derive(Debug)]
pub struct LayerResolution {
    /// The layer this entry covers.
    pub boundary_type: BoundaryType,
    /// Successfully resolved districts, in (country, id) order.
    pub resolved: Vec<ResolvedBoundary>,
    /// Districts that failed, flagged and skipped.
    pub failures: Vec<DistrictFailure>,
}

/// Resolve competing candidates for one district.
///
/// Precondition: all candidates share boundary type and jurisdiction
/// (country and region); violations fail with
/// [`ResolveError::BoundaryMismatch`].
///
/// Ranking: boundary-type-specific preference, then later vintage, then
/// later retrieval, then lexical source id — fully deterministic for any
/// input order.
///
/// # Errors
///
/// [`ResolveError::EmptyCandidateSet`] for empty input,
/// [`ResolveError::BoundaryMismatch`] for heterogeneous candidates.
pub fn resolve(
    candidates: &[BoundaryRecord],
    as_of: Timestamp,
) -> Result<ResolvedBoundary, ResolveError> {
    let first = candidates.first().ok_or(ResolveError::EmptyCandidateSet)?;
    for candidate in &candidates[1..] {
        if candidate.boundary_type != first.boundary_type
            || candidate.jurisdiction.country != first.jurisdiction.country
            || candidate.jurisdiction.region != first.jurisdiction.region
        {
            return Err(ResolveError::BoundaryMismatch {
                expected: district_scope(first),
                found: district_scope(candidate),
            });
        }
    }

    if candidates.len() == 1 {
        return Ok(ResolvedBoundary {
            record: first.clone(),
            confidence: 1.0,
            reasoning: "single source".to_string(),
            alternates_considered: Vec::new(),
        });
    }

    let mut ranked: Vec<&BoundaryRecord> = candidates.iter().collect();
    ranked.sort_by(|a, b| {
        let pa = preference_score(a.boundary_type, a.authority_tier);
        let pb = preference_score(b.boundary_type, b.authority_tier);
        pb.cmp(&pa)
            .then(b.vintage.cmp(&a.vintage))
            .then(b.retrieved_at.cmp(&a.retrieved_at))
            .then(a.source.cmp(&b.source))
    });
    let winner = ranked[0];
    let runner_up = ranked[1];

    let winner_pref = preference_score(winner.boundary_type, winner.authority_tier);
    let runner_pref = preference_score(runner_up.boundary_type, runner_up.authority_tier);
    let margin = winner_pref - runner_pref;

    let mut reasoning;
    let mut confidence;
    if margin > 0 {
        reasoning = format!(
            "higher preference ({} over {} for {})",
            winner.authority_tier, runner_up.authority_tier, winner.boundary_type
        );
        confidence = (0.7 + f64::from(margin) / 200.0).min(0.95);
        if !vintage_is_current(winner.boundary_type, winner.vintage, &as_of) {
            confidence = (confidence - 0.2).max(0.05);
            reasoning.push_str("; winning vintage is not current");
        }
    } else if winner.vintage != runner_up.vintage {
        reasoning = format!(
            "fresher vintage at equal preference ({} over {})",
            winner.vintage, runner_up.vintage
        );
        confidence = 0.6;
    } else if winner.retrieved_at != runner_up.retrieved_at {
        reasoning = "later retrieval at equal preference and vintage".to_string();
        confidence = 0.55;
    } else {
        reasoning = "lexical source order at full tie".to_string();
        confidence = 0.5;
    }

    // Redistricting-gap policy: a commission win during the gap window is
    // the correct choice with uncertain freshness, so confidence is held
    // in the moderate band.
    if winner.boundary_type.is_legislative()
        && winner.authority_tier == AuthorityTier::StateRedistrictingCommission
        && in_redistricting_gap(&as_of)
    {
        confidence = confidence.clamp(0.35, 0.65);
        reasoning.push_str("; redistricting gap window active, rival freshness discounted");
        if let Some(aggregator) = ranked
            .iter()
            .find(|r| r.authority_tier == AuthorityTier::NationalAggregator)
        {
            if aggregator_lag(winner, aggregator)? {
                reasoning.push_str("; national aggregator vintage lags the adopted map");
            }
        }
    }

    debug!(
        district = %winner.id,
        layer = %winner.boundary_type,
        winner = %winner.source,
        candidates = candidates.len(),
        confidence,
        "resolved contested district"
    );

    Ok(ResolvedBoundary {
        record: winner.clone(),
        confidence,
        reasoning,
        alternates_considered: ranked[1..]
            .iter()
            .map(|r| AlternateCandidate {
                source: r.source.clone(),
                authority_tier: r.authority_tier,
                vintage: r.vintage,
                preference: preference_score(r.boundary_type, r.authority_tier),
            })
            .collect(),
    })
}

/// Whether the national-aggregator reference lags a winner's vintage.
///
/// # Errors
///
/// [`ResolveError::UnexpectedReferenceSource`] if `reference` is not
/// actually a national-aggregator record — comparing freshness against the
/// wrong source would silently mis-state the gap assessment.
pub fn aggregator_lag(
    winner: &BoundaryRecord,
    reference: &BoundaryRecord,
) -> Result<bool, ResolveError> {
    if reference.authority_tier != AuthorityTier::NationalAggregator {
        return Err(ResolveError::UnexpectedReferenceSource {
            found: reference.authority_tier,
            source: reference.source.as_str().to_string(),
        });
    }
    Ok(reference.vintage < winner.vintage)
}

/// Resolve every district in every non-empty layer of a batch.
///
/// Empty layers are skipped; the result has one entry per non-empty layer.
/// Within a layer, candidates are grouped by (country, district id) and
/// resolved independently; failures are flagged per district and the rest
/// of the layer proceeds.
pub fn batch_resolve(
    layers: &BTreeMap<BoundaryType, Vec<BoundaryRecord>>,
    as_of: Timestamp,
) -> Vec<LayerResolution> {
    let mut out = Vec::new();
    for (&boundary_type, records) in layers {
        if records.is_empty() {
            continue;
        }

        let mut groups: BTreeMap<(String, String), Vec<BoundaryRecord>> = BTreeMap::new();
        for record in records {
            let key = (
                record.jurisdiction.country.as_str().to_string(),
                record.id.clone(),
            );
            groups.entry(key).or_default().push(record.clone());
        }

        let mut resolved = Vec::new();
        let mut failures = Vec::new();
        for ((country, district_id), candidates) in groups {
            // A record filed under the wrong layer is a mismatch even if
            // its group is internally consistent.
            let result = if let Some(stray) = candidates
                .iter()
                .find(|c| c.boundary_type != boundary_type)
            {
                Err(ResolveError::BoundaryMismatch {
                    expected: format!("{boundary_type} {country}"),
                    found: district_scope(stray),
                })
            } else {
                resolve(&candidates, as_of)
            };
            match result {
                Ok(r) => resolved.push(r),
                Err(error) => {
                    warn!(
                        layer = %boundary_type,
                        %country,
                        district = %district_id,
                        %error,
                        "district resolution failed, flagged and skipped"
                    );
                    failures.push(DistrictFailure {
                        country,
                        district_id,
                        error,
                    });
                }
            }
        }

        out.push(LayerResolution {
            boundary_type,
            resolved,
            failures,
        });
    }
    out
}

/// Render a record's resolution scope for mismatch reporting.
fn district_scope(record: &BoundaryRecord) -> String {
    format!(
        "{} {}/{}",
        record.boundary_type,
        record.jurisdiction.country.as_str(),
        record.jurisdiction.region
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{canonicalize, GeometryPayload, RawBoundaryRecord};
    use std::collections::BTreeMap;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn record(
        id: &str,
        boundary_type: BoundaryType,
        tier: AuthorityTier,
        source: &str,
        vintage: u16,
        retrieved: &str,
    ) -> BoundaryRecord {
        canonicalize(RawBoundaryRecord {
            id: id.to_string(),
            name: format!("District {id}"),
            boundary_type,
            geometry: GeometryPayload(format!("POLYGON(({source} {vintage}))")),
            country: "US".to_string(),
            region: None,
            jurisdiction_label: None,
            authority_tier: tier,
            source: SourceId::new(source).unwrap(),
            vintage,
            retrieved_at: ts(retrieved),
            properties: BTreeMap::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_empty_candidate_set() {
        let err = resolve(&[], ts("2024-06-01T00:00:00Z")).unwrap_err();
        assert!(matches!(err, ResolveError::EmptyCandidateSet));
    }

    #[test]
    fn test_single_source_confidence_exactly_one() {
        let candidates = vec![record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::NationalAggregator,
            "tiger-2024",
            2022,
            "2024-06-01T00:00:00Z",
        )];
        let resolved = resolve(&candidates, ts("2024-06-15T00:00:00Z")).unwrap();
        assert_eq!(resolved.confidence, 1.0);
        assert_eq!(resolved.reasoning, "single source");
        assert!(resolved.alternates_considered.is_empty());
    }

    #[test]
    fn test_commission_beats_state_gis_regardless_of_vintage() {
        let candidates = vec![
            record(
                "5501",
                BoundaryType::StateUpper,
                AuthorityTier::StateGis,
                "wi-gis",
                2024,
                "2024-07-01T00:00:00Z",
            ),
            record(
                "5501",
                BoundaryType::StateUpper,
                AuthorityTier::StateRedistrictingCommission,
                "wi-ltsb",
                2012,
                "2023-01-01T00:00:00Z",
            ),
        ];
        let resolved = resolve(&candidates, ts("2024-08-01T00:00:00Z")).unwrap();
        assert_eq!(
            resolved.record.authority_tier,
            AuthorityTier::StateRedistrictingCommission
        );
        assert!(resolved.reasoning.contains("higher preference"));
        // The 2012 map is stale, so the preference win is discounted.
        assert!(resolved.reasoning.contains("not current"));
    }

    #[test]
    fn test_county_aggregator_beats_state_gis() {
        let candidates = vec![
            record(
                "55025",
                BoundaryType::County,
                AuthorityTier::StateGis,
                "wi-gis",
                2024,
                "2024-07-01T00:00:00Z",
            ),
            record(
                "55025",
                BoundaryType::County,
                AuthorityTier::NationalAggregator,
                "tiger-2024",
                2020,
                "2024-06-01T00:00:00Z",
            ),
        ];
        let resolved = resolve(&candidates, ts("2024-08-01T00:00:00Z")).unwrap();
        assert_eq!(
            resolved.record.authority_tier,
            AuthorityTier::NationalAggregator
        );
        assert!(resolved.confidence > 0.7);
    }

    #[test]
    fn test_freshness_tie_break_at_equal_preference() {
        let candidates = vec![
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateGis,
                "wi-gis-old",
                2012,
                "2024-01-01T00:00:00Z",
            ),
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateGis,
                "wi-gis-new",
                2022,
                "2023-01-01T00:00:00Z",
            ),
        ];
        let resolved = resolve(&candidates, ts("2024-08-01T00:00:00Z")).unwrap();
        assert_eq!(resolved.record.vintage, 2022);
        assert!(resolved.reasoning.contains("fresher vintage"));
        assert_eq!(resolved.confidence, 0.6);
    }

    #[test]
    fn test_retrieval_tie_break_at_equal_vintage() {
        let candidates = vec![
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateGis,
                "portal-a",
                2022,
                "2024-01-01T00:00:00Z",
            ),
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateGis,
                "portal-b",
                2022,
                "2024-05-01T00:00:00Z",
            ),
        ];
        let resolved = resolve(&candidates, ts("2024-08-01T00:00:00Z")).unwrap();
        assert_eq!(resolved.record.source.as_str(), "portal-b");
        assert!(resolved.reasoning.contains("later retrieval"));
    }

    #[test]
    fn test_resolution_independent_of_candidate_order() {
        let a = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::StateRedistrictingCommission,
            "wi-ltsb",
            2022,
            "2022-01-20T00:00:00Z",
        );
        let b = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::StateGis,
            "wi-gis",
            2024,
            "2024-05-01T00:00:00Z",
        );
        let c = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::Community,
            "osm",
            2023,
            "2024-04-01T00:00:00Z",
        );
        let as_of = ts("2024-08-01T00:00:00Z");
        let forward = resolve(&[a.clone(), b.clone(), c.clone()], as_of).unwrap();
        let shuffled = resolve(&[c, b, a], as_of).unwrap();
        assert_eq!(forward.record.source, shuffled.record.source);
        assert_eq!(forward.confidence, shuffled.confidence);
        assert_eq!(forward.reasoning, shuffled.reasoning);
    }

    #[test]
    fn test_wisconsin_gap_window_scenario() {
        // Wisconsin CD-1: commission 2022 map vs state GIS 2024, resolved
        // as of 2022-02-15 — commission wins, moderate confidence, and the
        // reasoning cites both the preference win and the gap window.
        let candidates = vec![
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateRedistrictingCommission,
                "wi-ltsb",
                2022,
                "2022-02-01T00:00:00Z",
            ),
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateGis,
                "wi-gis",
                2024,
                "2022-02-10T00:00:00Z",
            ),
        ];
        let resolved = resolve(&candidates, ts("2022-02-15T00:00:00Z")).unwrap();
        assert_eq!(
            resolved.record.authority_tier,
            AuthorityTier::StateRedistrictingCommission
        );
        assert!(resolved.confidence > 0.3 && resolved.confidence < 0.7);
        assert!(resolved.reasoning.contains("higher preference"));
        assert!(resolved.reasoning.contains("gap window"));
    }

    #[test]
    fn test_gap_window_with_lagging_aggregator() {
        let candidates = vec![
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateRedistrictingCommission,
                "wi-ltsb",
                2022,
                "2022-02-01T00:00:00Z",
            ),
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::NationalAggregator,
                "tiger-2021",
                2012,
                "2022-02-10T00:00:00Z",
            ),
        ];
        let resolved = resolve(&candidates, ts("2022-03-01T00:00:00Z")).unwrap();
        assert_eq!(
            resolved.record.authority_tier,
            AuthorityTier::StateRedistrictingCommission
        );
        assert!(resolved.confidence > 0.3 && resolved.confidence < 0.7);
        assert!(resolved.reasoning.contains("aggregator vintage lags"));
    }

    #[test]
    fn test_outside_gap_window_confidence_not_clamped() {
        let candidates = vec![
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateRedistrictingCommission,
                "wi-ltsb",
                2022,
                "2022-08-01T00:00:00Z",
            ),
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateGis,
                "wi-gis",
                2022,
                "2022-08-10T00:00:00Z",
            ),
        ];
        let resolved = resolve(&candidates, ts("2022-09-01T00:00:00Z")).unwrap();
        assert!(resolved.confidence > 0.7);
        assert!(!resolved.reasoning.contains("gap window"));
    }

    #[test]
    fn test_boundary_mismatch_across_types() {
        let candidates = vec![
            record(
                "5501",
                BoundaryType::Congressional,
                AuthorityTier::StateGis,
                "wi-gis",
                2022,
                "2024-01-01T00:00:00Z",
            ),
            record(
                "5501",
                BoundaryType::StateUpper,
                AuthorityTier::StateGis,
                "wi-gis",
                2022,
                "2024-01-01T00:00:00Z",
            ),
        ];
        let err = resolve(&candidates, ts("2024-06-01T00:00:00Z")).unwrap_err();
        match err {
            ResolveError::BoundaryMismatch { expected, found } => {
                assert!(expected.contains("congressional"));
                assert!(found.contains("state_upper"));
            }
            other => panic!("expected BoundaryMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_reference_source() {
        let winner = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::StateRedistrictingCommission,
            "wi-ltsb",
            2022,
            "2022-02-01T00:00:00Z",
        );
        let not_aggregator = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::StateGis,
            "wi-gis",
            2020,
            "2022-02-01T00:00:00Z",
        );
        let err = aggregator_lag(&winner, &not_aggregator).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnexpectedReferenceSource { .. }
        ));
    }

    #[test]
    fn test_aggregator_lag_detected() {
        let winner = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::StateRedistrictingCommission,
            "wi-ltsb",
            2022,
            "2022-02-01T00:00:00Z",
        );
        let stale = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::NationalAggregator,
            "tiger-2021",
            2012,
            "2022-02-01T00:00:00Z",
        );
        let fresh = record(
            "5501",
            BoundaryType::Congressional,
            AuthorityTier::NationalAggregator,
            "tiger-2023",
            2022,
            "2023-06-01T00:00:00Z",
        );
        assert!(aggregator_lag(&winner, &stale).unwrap());
        assert!(!aggregator_lag(&winner, &fresh).unwrap());
    }

    #[test]
    fn test_batch_skips_empty_layers() {
        let mut layers: BTreeMap<BoundaryType, Vec<BoundaryRecord>> = BTreeMap::new();
        layers.insert(BoundaryType::Congressional, Vec::new());
        layers.insert(
            BoundaryType::County,
            vec![record(
                "55025",
                BoundaryType::County,
                AuthorityTier::NationalAggregator,
                "tiger-2024",
                2020,
                "2024-06-01T00:00:00Z",
            )],
        );
        let out = batch_resolve(&layers, ts("2024-08-01T00:00:00Z"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].boundary_type, BoundaryType::County);
        assert_eq!(out[0].resolved.len(), 1);
    }

    #[test]
    fn test_batch_isolates_district_failures() {
        // "55025" is internally consistent; "5501" is filed under the
        // county layer with a congressional record mixed in, so it fails
        // without blocking its neighbor.
        let mut layers: BTreeMap<BoundaryType, Vec<BoundaryRecord>> = BTreeMap::new();
        layers.insert(
            BoundaryType::County,
            vec![
                record(
                    "55025",
                    BoundaryType::County,
                    AuthorityTier::NationalAggregator,
                    "tiger-2024",
                    2020,
                    "2024-06-01T00:00:00Z",
                ),
                record(
                    "5501",
                    BoundaryType::Congressional,
                    AuthorityTier::StateGis,
                    "wi-gis",
                    2022,
                    "2024-06-01T00:00:00Z",
                ),
            ],
        );
        let out = batch_resolve(&layers, ts("2024-08-01T00:00:00Z"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].resolved.len(), 1);
        assert_eq!(out[0].resolved[0].record.id, "55025");
        assert_eq!(out[0].failures.len(), 1);
        assert_eq!(out[0].failures[0].district_id, "5501");
        assert!(matches!(
            out[0].failures[0].error,
            ResolveError::BoundaryMismatch { .. }
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn candidate_strategy() -> impl Strategy<Value = BoundaryRecord> {
            (
                prop::sample::select(AuthorityTier::all().to_vec()),
                2000u16..=2024,
                1u32..=12,
                "[a-z]{3,10}",
            )
                .prop_map(|(tier, vintage, month, source)| {
                    record(
                        "5501",
                        BoundaryType::Congressional,
                        tier,
                        &source,
                        vintage,
                        &format!("2024-{month:02}-01T00:00:00Z"),
                    )
                })
        }

        proptest! {
            /// The winner, confidence, and reasoning never depend on
            /// candidate order.
            #[test]
            fn resolution_order_independent(
                mut candidates in prop::collection::vec(candidate_strategy(), 2..6)
            ) {
                let as_of = ts("2024-08-01T00:00:00Z");
                let forward = resolve(&candidates, as_of).unwrap();
                candidates.reverse();
                let backward = resolve(&candidates, as_of).unwrap();
                prop_assert_eq!(&forward.record.source, &backward.record.source);
                prop_assert_eq!(forward.confidence, backward.confidence);
                prop_assert_eq!(forward.reasoning, backward.reasoning);
            }

            /// Contested confidence stays inside (0, 1); only single-source
            /// resolution reaches exactly 1.0.
            #[test]
            fn contested_confidence_bounded(
                candidates in prop::collection::vec(candidate_strategy(), 2..6),
                as_of_month in 1u32..=12,
            ) {
                let as_of = ts(&format!("2022-{as_of_month:02}-01T00:00:00Z"));
                let resolved = resolve(&candidates, as_of).unwrap();
                prop_assert!(resolved.confidence > 0.0);
                prop_assert!(resolved.confidence < 1.0);
            }
        }
    }

    #[test]
    fn test_batch_groups_competing_sources_per_district() {
        let mut layers: BTreeMap<BoundaryType, Vec<BoundaryRecord>> = BTreeMap::new();
        layers.insert(
            BoundaryType::Congressional,
            vec![
                record(
                    "5501",
                    BoundaryType::Congressional,
                    AuthorityTier::StateRedistrictingCommission,
                    "wi-ltsb",
                    2022,
                    "2022-02-01T00:00:00Z",
                ),
                record(
                    "5501",
                    BoundaryType::Congressional,
                    AuthorityTier::StateGis,
                    "wi-gis",
                    2024,
                    "2024-05-01T00:00:00Z",
                ),
                record(
                    "5502",
                    BoundaryType::Congressional,
                    AuthorityTier::NationalAggregator,
                    "tiger-2024",
                    2022,
                    "2024-06-01T00:00:00Z",
                ),
            ],
        );
        let out = batch_resolve(&layers, ts("2024-08-01T00:00:00Z"));
        assert_eq!(out[0].resolved.len(), 2);
        assert!(out[0].failures.is_empty());
        // 5501 was contested, 5502 single-source.
        let contested = &out[0].resolved[0];
        assert_eq!(contested.record.id, "5501");
        assert_eq!(contested.alternates_considered.len(), 1);
        let single = &out[0].resolved[1];
        assert_eq!(single.record.id, "5502");
        assert_eq!(single.confidence, 1.0);
    }
}
