#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood boundary loading and normalization.
//!
//! Reads a `GeoJSON` `FeatureCollection` of neighborhood polygons, extracts
//! each feature's name through the configured [`BoundaryFieldMapping`] and
//! normalizes it into the shared join key.
//!
//! [`BoundaryFieldMapping`]: sisagua_map_neighborhood_models::BoundaryFieldMapping

pub mod load;
pub mod normalize;

use thiserror::Error;

/// Errors that can occur while loading neighborhood boundaries.
#[derive(Debug, Error)]
pub enum NeighborhoodError {
    /// The boundary file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The top-level `GeoJSON` object is not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection, found {found}")]
    NotFeatureCollection {
        /// The kind of object that was found instead.
        found: &'static str,
    },

    /// No feature carries the configured name property.
    #[error("No feature has the neighborhood name property '{field}'")]
    MissingNameField {
        /// The configured property name.
        field: String,
    },
}
