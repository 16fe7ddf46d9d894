//! # Source Preference Tables
//!
//! Fixed, boundary-type-specific preference scores for candidate ranking.
//!
//! Raw authority tier is deliberately NOT the ranking key. Two inversions
//! are encoded:
//!
//! - **Legislative layers** (congressional, state upper/lower): the state
//!   redistricting commission outranks even a federal mandate source. The
//!   commission publishes the legally adopted map first; federal and
//!   aggregator copies are downstream republications.
//! - **County layer**: the national aggregator outranks state GIS. County
//!   boundaries change rarely and the aggregator's nationwide conflation
//!   is more consistent than fifty independently-maintained portals.
//!
//! Changing any score changes resolution outcomes everywhere; the tables
//! are exhaustively matched so a new tier or layer forces a decision here.

use atlas_core::{AuthorityTier, BoundaryType, Timestamp};

/// Preference score for a source tier when resolving a given layer.
///
/// Higher wins. Scores are ordinal weights, not probabilities; only their
/// order and margins matter.
pub fn preference_score(boundary_type: BoundaryType, tier: AuthorityTier) -> u8 {
    use AuthorityTier::*;
    match boundary_type {
        BoundaryType::Congressional | BoundaryType::StateUpper | BoundaryType::StateLower => {
            match tier {
                StateRedistrictingCommission => 100,
                FederalMandate => 90,
                StateGis => 70,
                NationalAggregator => 60,
                Community => 10,
            }
        }
        BoundaryType::County => match tier {
            NationalAggregator => 100,
            FederalMandate => 90,
            StateGis => 60,
            StateRedistrictingCommission => 50,
            Community => 10,
        },
        BoundaryType::SchoolUnified
        | BoundaryType::SchoolElementary
        | BoundaryType::SchoolSecondary
        | BoundaryType::CityCouncil => match tier {
            FederalMandate => 100,
            StateRedistrictingCommission => 80,
            StateGis => 70,
            NationalAggregator => 60,
            Community => 10,
        },
    }
}

/// Whether `as_of` falls inside the redistricting gap window.
///
/// Historically the first half of years ending in 2: commissions have
/// adopted the new decennial maps, national aggregators are still
/// publishing the previous cycle.
pub fn in_redistricting_gap(as_of: &Timestamp) -> bool {
    as_of.year().rem_euclid(10) == 2 && as_of.month() <= 6
}

/// The most recent decennial redistricting vintage at `as_of`.
///
/// Maps take legal effect in years ending in 2; before that point in a
/// decade the previous cycle's vintage is still current.
pub fn current_cycle_vintage(as_of: &Timestamp) -> i32 {
    let y = as_of.year();
    y - (y - 2).rem_euclid(10)
}

/// Whether a winning vintage is "current" relative to `as_of`.
///
/// Legislative layers: current iff drawn in the latest decennial cycle.
/// Other layers roll continuously; a map under ten years old is current.
pub fn vintage_is_current(boundary_type: BoundaryType, vintage: u16, as_of: &Timestamp) -> bool {
    if boundary_type.is_legislative() {
        i32::from(vintage) >= current_cycle_vintage(as_of)
    } else {
        as_of.year() - i32::from(vintage) <= 10
    }
}
