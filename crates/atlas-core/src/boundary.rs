//! # Boundary Record Model
//!
//! The canonical shape of one candidate district as published by one
//! source, plus the enums and newtypes it is built from.
//!
//! ## Identity Invariant
//!
//! A record's `id` (typically a GEOID) is unique only within
//! (`boundary_type`, `source`) — it is NOT a global key. Two sources may
//! reuse an id for mutually exclusive boundary realities; that collision is
//! exactly the conflict the resolution engine exists to settle.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::digest::{ContentDigest, DIGEST_WIDTH};
use crate::error::AtlasError;
use crate::geo::Continent;
use crate::temporal::Timestamp;

/// All boundary layers the stack ingests.
///
/// The derived `Ord` follows declaration order, which is the canonical
/// layer order used when folding layer roots into flat and region roots.
/// Adding a variant forces every `match` in the workspace to handle it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryType {
    /// US House (and equivalent national-legislature) districts.
    Congressional,
    /// Upper state legislative chamber (senate) districts.
    StateUpper,
    /// Lower state legislative chamber (house/assembly) districts.
    StateLower,
    /// County (or county-equivalent) boundaries.
    County,
    /// Unified school districts.
    SchoolUnified,
    /// Elementary school districts.
    SchoolElementary,
    /// Secondary school districts.
    SchoolSecondary,
    /// Municipal city-council wards.
    CityCouncil,
}

impl BoundaryType {
    /// All boundary types in canonical order.
    pub fn all() -> &'static [BoundaryType] {
        &[
            Self::Congressional,
            Self::StateUpper,
            Self::StateLower,
            Self::County,
            Self::SchoolUnified,
            Self::SchoolElementary,
            Self::SchoolSecondary,
            Self::CityCouncil,
        ]
    }

    /// Returns the snake_case string identifier for this boundary type.
    ///
    /// Must match the serde serialization format — leaf payloads embed it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Congressional => "congressional",
            Self::StateUpper => "state_upper",
            Self::StateLower => "state_lower",
            Self::County => "county",
            Self::SchoolUnified => "school_unified",
            Self::SchoolElementary => "school_elementary",
            Self::SchoolSecondary => "school_secondary",
            Self::CityCouncil => "city_council",
        }
    }

    /// Whether this layer is drawn by a redistricting process.
    ///
    /// Legislative layers are the ones subject to the decennial
    /// redistricting-gap policy and the commission-first preference table.
    pub fn is_legislative(&self) -> bool {
        matches!(self, Self::Congressional | Self::StateUpper | Self::StateLower)
    }
}

impl std::fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryType {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "congressional" => Ok(Self::Congressional),
            "state_upper" => Ok(Self::StateUpper),
            "state_lower" => Ok(Self::StateLower),
            "county" => Ok(Self::County),
            "school_unified" => Ok(Self::SchoolUnified),
            "school_elementary" => Ok(Self::SchoolElementary),
            "school_secondary" => Ok(Self::SchoolSecondary),
            "city_council" => Ok(Self::CityCouncil),
            other => Err(AtlasError::Validation(format!(
                "unknown boundary type: {other:?}"
            ))),
        }
    }
}

/// Ordinal ranking of how legally binding a data source is.
///
/// Declared in ascending authority so the derived `Ord` matches the
/// ordinal: `Community < NationalAggregator < StateGis <
/// StateRedistrictingCommission < FederalMandate`. Raw tier order is NOT
/// the resolution preference order — preference is boundary-type-specific.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityTier {
    /// Community-maintained or volunteer-digitized boundaries.
    Community,
    /// National aggregator (e.g. the federal TIGER/Line program).
    NationalAggregator,
    /// State GIS portal.
    StateGis,
    /// State redistricting commission — the body that legally draws the map.
    StateRedistrictingCommission,
    /// Federal statutory mandate.
    FederalMandate,
}

impl AuthorityTier {
    /// All tiers in ascending authority order.
    pub fn all() -> &'static [AuthorityTier] {
        &[
            Self::Community,
            Self::NationalAggregator,
            Self::StateGis,
            Self::StateRedistrictingCommission,
            Self::FederalMandate,
        ]
    }

    /// The ordinal rank, 1 (community) through 5 (federal mandate).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Community => 1,
            Self::NationalAggregator => 2,
            Self::StateGis => 3,
            Self::StateRedistrictingCommission => 4,
            Self::FederalMandate => 5,
        }
    }

    /// Returns the snake_case string identifier for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::NationalAggregator => "national_aggregator",
            Self::StateGis => "state_gis",
            Self::StateRedistrictingCommission => "state_redistricting_commission",
            Self::FederalMandate => "federal_mandate",
        }
    }
}

impl std::fmt::Display for AuthorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of the publishing source (e.g. `"tiger-2024"`, `"wi-ltsb"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId(pub String);

impl SourceId {
    /// Construct a source identifier; rejects empty input.
    pub fn new(s: impl Into<String>) -> Result<Self, AtlasError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(AtlasError::Validation(
                "source id must not be empty".to_string(),
            ));
        }
        Ok(Self(s))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source:{}", self.0)
    }
}

/// An ISO 3166-1 alpha-2 country code, upper-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryCode(String);

impl CountryCode {
    /// Construct a country code: trims, upper-cases, and rejects anything
    /// that is not 2–3 ASCII letters.
    pub fn new(s: impl Into<String>) -> Result<Self, AtlasError> {
        let s = s.into().trim().to_uppercase();
        if !(2..=3).contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(AtlasError::Validation(format!(
                "country code must be 2-3 ASCII letters, got: {s:?}"
            )));
        }
        Ok(Self(s))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The opaque geometry payload of a boundary record.
///
/// Never interpreted here — ring closure and coordinate validation belong
/// to the fetch collaborators. The only operation this crate performs on a
/// geometry is hashing it into a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeometryPayload(pub String);

impl GeometryPayload {
    /// SHA-256 digest of the raw payload bytes.
    ///
    /// This digest, not the payload itself, is embedded in the canonical
    /// leaf layout — the leaf stays fixed-width no matter how large the
    /// polygon set is, while still covering every payload byte.
    pub fn digest(&self) -> ContentDigest {
        let hash = Sha256::digest(self.0.as_bytes());
        let mut bytes = [0u8; DIGEST_WIDTH];
        bytes.copy_from_slice(&hash);
        ContentDigest(bytes)
    }
}

/// Where a record sits in the continent → country → region hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JurisdictionPath {
    /// Continent, inferred from the country code.
    pub continent: Continent,
    /// ISO country code, upper-cased on ingestion.
    pub country: CountryCode,
    /// Region code (US state postal code, or a provider label), possibly
    /// the `"UNKNOWN"` sentinel.
    pub region: String,
}

/// One candidate district as published by one source, pre-canonicalization.
///
/// Region and continent may be absent; [`crate::canonicalize()`] infers
/// them. This is the shape fetch collaborators hand over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBoundaryRecord {
    /// Source-local identifier (e.g. GEOID).
    pub id: String,
    /// Human-readable district name.
    pub name: String,
    /// Which boundary layer this record belongs to.
    pub boundary_type: BoundaryType,
    /// Opaque geometry payload.
    pub geometry: GeometryPayload,
    /// Country code as published (any case).
    pub country: String,
    /// Region code if the source published one.
    pub region: Option<String>,
    /// Free-text jurisdiction label, used for region inference outside the US.
    pub jurisdiction_label: Option<String>,
    /// Authority tier of the publishing source.
    pub authority_tier: AuthorityTier,
    /// Publishing source.
    pub source: SourceId,
    /// Year the map took legal effect.
    pub vintage: u16,
    /// When the fetch collaborator retrieved this record.
    pub retrieved_at: Timestamp,
    /// Free-form source properties; never hashed.
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

/// One candidate district in canonical shape.
///
/// Produced only by [`crate::canonicalize()`]; downstream crates treat it
/// as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRecord {
    /// Source-local identifier (e.g. GEOID). Unique only within
    /// (`boundary_type`, `source`).
    pub id: String,
    /// Human-readable district name.
    pub name: String,
    /// Which boundary layer this record belongs to.
    pub boundary_type: BoundaryType,
    /// Opaque geometry payload.
    pub geometry: GeometryPayload,
    /// Resolved continent/country/region path.
    pub jurisdiction: JurisdictionPath,
    /// Authority tier of the publishing source.
    pub authority_tier: AuthorityTier,
    /// Publishing source.
    pub source: SourceId,
    /// Year the map took legal effect.
    pub vintage: u16,
    /// When the fetch collaborator retrieved this record.
    pub retrieved_at: Timestamp,
    /// Free-form source properties; excluded from every digest.
    pub properties: BTreeMap<String, serde_json::Value>,
}
