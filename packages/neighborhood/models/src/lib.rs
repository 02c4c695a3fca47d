#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood join key, boundary, and field mapping types.
//!
//! Sample records and boundary polygons name neighborhoods independently,
//! with inconsistent casing and stray whitespace. Both sides go through
//! [`NeighborhoodKey`] so that `"centro"` and `"CENTRO "` join.

use std::fmt;

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Canonical neighborhood name used as the join key between sample data
/// and boundary polygons.
///
/// Always trimmed and uppercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NeighborhoodKey(String);

impl NeighborhoodKey {
    /// Normalizes a raw neighborhood name into a join key.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the source name was missing or blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NeighborhoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NeighborhoodKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

/// Which feature property holds the neighborhood name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryFieldMapping {
    /// Property name (e.g., `"nome_bairr"`).
    pub name_field: String,
}

/// A neighborhood polygon, ready to be joined with sample attributes.
#[derive(Debug, Clone)]
pub struct NeighborhoodBoundary {
    /// Normalized neighborhood name.
    pub name: NeighborhoodKey,
    /// Boundary geometry. Single polygons are promoted to multipolygons.
    pub geometry: MultiPolygon<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_uppercases() {
        assert_eq!(NeighborhoodKey::new("  centro ").as_str(), "CENTRO");
    }

    #[test]
    fn keeps_accented_letters() {
        assert_eq!(NeighborhoodKey::new("São Caetano").as_str(), "SÃO CAETANO");
    }

    #[test]
    fn differently_formatted_names_are_equal() {
        assert_eq!(NeighborhoodKey::new("centro"), NeighborhoodKey::new("CENTRO "));
    }

    #[test]
    fn blank_name_is_empty() {
        assert!(NeighborhoodKey::new("   ").is_empty());
    }
}
