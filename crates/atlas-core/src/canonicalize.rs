//! # Record Canonicalizer
//!
//! Normalizes a [`RawBoundaryRecord`] into the canonical
//! [`BoundaryRecord`] shape: validated identity, upper-cased country code,
//! inferred region and continent.
//!
//! ## Inference Rules
//!
//! - Country `US`, region absent: the 2-digit state FIPS prefix of the
//!   record id is mapped through the FIPS table. Unrecognized or too-short
//!   prefixes degrade to [`UNKNOWN_REGION`] — one malformed GEOID must not
//!   abort a batch.
//! - Other countries: the free-text `jurisdiction_label` when present,
//!   else the country code itself.
//! - Continent: the static country table; unrecognized codes map to
//!   [`Continent::Unknown`](crate::geo::Continent::Unknown).
//!
//! Pure function, no side effects.

use crate::boundary::{BoundaryRecord, CountryCode, JurisdictionPath, RawBoundaryRecord};
use crate::error::AtlasError;
use crate::geo::{continent_for_country, us_state_for_fips, UNKNOWN_REGION};

/// Earliest vintage accepted; the first US congressional maps.
const MIN_VINTAGE: u16 = 1789;
/// Latest vintage accepted; anything later is a feed defect.
const MAX_VINTAGE: u16 = 2100;

/// Normalize a raw record into canonical shape.
///
/// # Errors
///
/// Returns `AtlasError::Validation` for shape defects that cannot be
/// repaired: an empty id or name, a malformed country code, or a vintage
/// outside the plausible range. Region inference never fails.
pub fn canonicalize(raw: RawBoundaryRecord) -> Result<BoundaryRecord, AtlasError> {
    if raw.id.trim().is_empty() {
        return Err(AtlasError::Validation(format!(
            "record id must not be empty (source {})",
            raw.source.as_str()
        )));
    }
    if raw.name.trim().is_empty() {
        return Err(AtlasError::Validation(format!(
            "record name must not be empty (id {:?}, source {})",
            raw.id,
            raw.source.as_str()
        )));
    }
    if !(MIN_VINTAGE..=MAX_VINTAGE).contains(&raw.vintage) {
        return Err(AtlasError::Validation(format!(
            "vintage {} outside plausible range for record {:?}",
            raw.vintage, raw.id
        )));
    }

    let country = CountryCode::new(raw.country)?;
    let region = infer_region(
        &country,
        raw.region.as_deref(),
        raw.jurisdiction_label.as_deref(),
        &raw.id,
    );
    let continent = continent_for_country(country.as_str());

    Ok(BoundaryRecord {
        id: raw.id,
        name: raw.name,
        boundary_type: raw.boundary_type,
        geometry: raw.geometry,
        jurisdiction: JurisdictionPath {
            continent,
            country,
            region,
        },
        authority_tier: raw.authority_tier,
        source: raw.source,
        vintage: raw.vintage,
        retrieved_at: raw.retrieved_at,
        properties: raw.properties,
    })
}

/// Infer the region code for a record.
fn infer_region(
    country: &CountryCode,
    region: Option<&str>,
    jurisdiction_label: Option<&str>,
    id: &str,
) -> String {
    if let Some(r) = region {
        let r = r.trim();
        if !r.is_empty() {
            return r.to_uppercase();
        }
    }
    if country.as_str() == "US" {
        return infer_us_region(id);
    }
    match jurisdiction_label {
        Some(label) if !label.trim().is_empty() => label.trim().to_string(),
        _ => country.as_str().to_string(),
    }
}

/// Infer a US state postal code from the FIPS prefix of a GEOID.
fn infer_us_region(id: &str) -> String {
    // get() rather than slicing: a non-ASCII id must degrade, not panic.
    match id.get(..2).and_then(us_state_for_fips) {
        Some(state) => state.to_string(),
        None => UNKNOWN_REGION.to_string(),
    }
}
