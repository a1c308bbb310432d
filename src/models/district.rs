//! District boundary types and the composite join key.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Composite key matching a registry region label to a boundary row.
///
/// Both sides of the join normalize identically: surrounding whitespace is
/// trimmed, nothing else. Comparison stays exact and case-sensitive, the way
/// the registry spells its labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictKey(String);

impl DistrictKey {
    /// Key for a boundary row: county name concatenated with town name, no
    /// separator (the registry writes e.g. "臺南市東區").
    pub fn from_parts(county: &str, town: &str) -> Self {
        Self(format!("{}{}", county.trim(), town.trim()))
    }

    /// Key for a single registry region token.
    pub fn from_label(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty key can only come from a blank registry region field; it
    /// never matches a boundary row.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for DistrictKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One town-level administrative polygon, in geographic coordinates.
#[derive(Debug, Clone)]
pub struct District {
    pub key: DistrictKey,
    pub county: String,
    pub town: String,
    pub geometry: MultiPolygon<f64>,
}

/// District enriched with the joined site count and planar metrics.
///
/// Geometry here has been reprojected to planar meters.
#[derive(Debug, Clone)]
pub struct EnrichedDistrict {
    pub key: DistrictKey,
    pub county: String,
    pub town: String,
    pub geometry: MultiPolygon<f64>,
    pub count: u64,
    pub area_km2: f64,

    /// Sites per km². `None` when the polygon area is degenerate.
    pub density: Option<f64>,
}
