//! # atlas-resolve — Provenance Resolution Engine
//!
//! Given competing candidate records for the same jurisdiction and
//! boundary type, selects a winner deterministically and justifies it:
//!
//! - **Boundary-type-specific preference.** Not raw authority tier:
//!   legislative layers prefer the state redistricting commission (the body
//!   that legally draws the map) over nominally higher-tiered but less
//!   specific sources, and counties prefer the national aggregator over
//!   state GIS portals.
//! - **Freshness tie-breaks.** Equal preference falls to the later
//!   vintage, then the later retrieval instant, then lexical source order.
//! - **Redistricting-gap policy.** In the first half of a year ending
//!   in 2, a freshly adopted commission map beats a lagging aggregator by
//!   preference but carries moderate confidence: correct choice, uncertain
//!   freshness.
//!
//! ## Crate Policy
//!
//! - Stateless pure functions; resolving many jurisdictions is an
//!   embarrassingly parallel map for the caller.
//! - Per-district failures are isolated in batch resolution — one bad
//!   source never blocks a layer, one bad layer never blocks a batch.
//! - No `unsafe`, no `panic!()`/`.unwrap()` outside tests.

pub mod engine;
pub mod preference;

pub use engine::{
    aggregator_lag, batch_resolve, resolve, AlternateCandidate, DistrictFailure,
    LayerResolution, ResolveError, ResolvedBoundary,
};
pub use preference::{in_redistricting_gap, preference_score};
