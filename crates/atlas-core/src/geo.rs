//! # Geographic Lookup Tables
//!
//! Static country → continent and US state FIPS → postal code tables used
//! by region and continent inference.
//!
//! ## Design
//!
//! Both lookups have an explicit default branch and never fail: boundary
//! feeds routinely carry records for jurisdictions the tables have not
//! caught up with, and "unknown but present" must degrade gracefully
//! instead of aborting a batch. Unknown country codes map to
//! [`Continent::Unknown`]; unrecognized FIPS prefixes leave region
//! inference to fall back to [`UNKNOWN_REGION`].

use serde::{Deserialize, Serialize};

/// Region code recorded when inference cannot identify a real region.
///
/// A deliberate sentinel, not an error: one malformed record must not
/// abort a batch, and the record still participates in its country's tree
/// under this region.
pub const UNKNOWN_REGION: &str = "UNKNOWN";

/// The seven continents, plus an explicit `Unknown` default.
///
/// `Unknown` is the documented default for country codes absent from the
/// lookup table. Records grouped under it still hash into the global tree;
/// they are never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continent {
    /// Africa.
    Africa,
    /// Antarctica (research-station districts do exist in some feeds).
    Antarctica,
    /// Asia.
    Asia,
    /// Europe.
    Europe,
    /// North and Central America, including the Caribbean.
    NorthAmerica,
    /// Oceania.
    Oceania,
    /// South America.
    SouthAmerica,
    /// Default for country codes absent from the lookup table.
    Unknown,
}

impl Continent {
    /// Returns the snake_case string identifier for this continent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Africa => "africa",
            Self::Antarctica => "antarctica",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::NorthAmerica => "north_america",
            Self::Oceania => "oceania",
            Self::SouthAmerica => "south_america",
            Self::Unknown => "unknown",
        }
    }

    /// All continents in canonical (alphabetical) order, `Unknown` last.
    pub fn all() -> &'static [Continent] {
        &[
            Self::Africa,
            Self::Antarctica,
            Self::Asia,
            Self::Europe,
            Self::NorthAmerica,
            Self::Oceania,
            Self::SouthAmerica,
            Self::Unknown,
        ]
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an upper-case ISO 3166-1 alpha-2 country code to its continent.
///
/// Unrecognized codes return [`Continent::Unknown`] — never an error.
pub fn continent_for_country(code: &str) -> Continent {
    match code {
        // North and Central America, Caribbean
        "US" | "CA" | "MX" | "GT" | "BZ" | "SV" | "HN" | "NI" | "CR" | "PA" | "CU" | "DO"
        | "HT" | "JM" | "BS" | "TT" | "BB" => Continent::NorthAmerica,
        // South America
        "BR" | "AR" | "CL" | "CO" | "PE" | "VE" | "EC" | "BO" | "PY" | "UY" | "GY" | "SR" => {
            Continent::SouthAmerica
        }
        // Europe
        "GB" | "FR" | "DE" | "IT" | "ES" | "PT" | "NL" | "BE" | "LU" | "IE" | "DK" | "SE"
        | "NO" | "FI" | "IS" | "CH" | "AT" | "PL" | "CZ" | "SK" | "HU" | "RO" | "BG" | "GR"
        | "HR" | "SI" | "RS" | "BA" | "ME" | "MK" | "AL" | "EE" | "LV" | "LT" | "UA" | "MD"
        | "BY" => Continent::Europe,
        // Asia and the Middle East
        "CN" | "JP" | "KR" | "IN" | "PK" | "BD" | "LK" | "NP" | "ID" | "MY" | "SG" | "TH"
        | "VN" | "PH" | "MM" | "KH" | "LA" | "MN" | "KZ" | "UZ" | "TR" | "IL" | "SA" | "AE"
        | "QA" | "KW" | "BH" | "OM" | "JO" | "LB" | "IQ" | "IR" | "AF" | "TW" => Continent::Asia,
        // Africa
        "NG" | "ZA" | "EG" | "KE" | "ET" | "GH" | "TZ" | "UG" | "DZ" | "MA" | "TN" | "LY"
        | "SN" | "CI" | "CM" | "ZM" | "ZW" | "BW" | "NA" | "MZ" | "AO" | "RW" => {
            Continent::Africa
        }
        // Oceania
        "AU" | "NZ" | "FJ" | "PG" | "WS" | "TO" | "SB" | "VU" => Continent::Oceania,
        "AQ" => Continent::Antarctica,
        _ => Continent::Unknown,
    }
}

/// Map a 2-digit US state FIPS prefix to its postal abbreviation.
///
/// Covers the 50 states, DC, and the territories that publish electoral
/// boundaries. Returns `None` for unassigned prefixes (e.g. `"03"`, `"07"`).
pub fn us_state_for_fips(prefix: &str) -> Option<&'static str> {
    let code = match prefix {
        "01" => "AL",
        "02" => "AK",
        "04" => "AZ",
        "05" => "AR",
        "06" => "CA",
        "08" => "CO",
        "09" => "CT",
        "10" => "DE",
        "11" => "DC",
        "12" => "FL",
        "13" => "GA",
        "15" => "HI",
        "16" => "ID",
        "17" => "IL",
        "18" => "IN",
        "19" => "IA",
        "20" => "KS",
        "21" => "KY",
        "22" => "LA",
        "23" => "ME",
        "24" => "MD",
        "25" => "MA",
        "26" => "MI",
        "27" => "MN",
        "28" => "MS",
        "29" => "MO",
        "30" => "MT",
        "31" => "NE",
        "32" => "NV",
        "33" => "NH",
        "34" => "NJ",
        "35" => "NM",
        "36" => "NY",
        "37" => "NC",
        "38" => "ND",
        "39" => "OH",
        "40" => "OK",
        "41" => "OR",
        "42" => "PA",
        "44" => "RI",
        "45" => "SC",
        "46" => "SD",
        "47" => "TN",
        "48" => "TX",
        "49" => "UT",
        "50" => "VT",
        "51" => "VA",
        "53" => "WA",
        "54" => "WV",
        "55" => "WI",
        "56" => "WY",
        "60" => "AS",
        "66" => "GU",
        "69" => "MP",
        "72" => "PR",
        "78" => "VI",
        _ => return None,
    };
    Some(code)
}
