//! Reads neighborhood boundaries from a `GeoJSON` file.

use std::path::Path;

use geojson::GeoJson;
use sisagua_map_neighborhood_models::{BoundaryFieldMapping, NeighborhoodBoundary};

use crate::NeighborhoodError;

/// Reads and normalizes all neighborhood boundaries from a `GeoJSON` file.
///
/// # Errors
///
/// Returns [`NeighborhoodError`] if the file cannot be read, is not a
/// `GeoJSON` `FeatureCollection`, or no feature has the name property.
pub fn read_boundaries(
    path: &Path,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<NeighborhoodBoundary>, NeighborhoodError> {
    log::info!("Reading neighborhood boundaries from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_boundaries(&contents, fields)
}

/// Parses and normalizes boundaries from `GeoJSON` text.
///
/// # Errors
///
/// Returns [`NeighborhoodError`] if the text is not a `GeoJSON`
/// `FeatureCollection` or no feature has the name property.
pub fn parse_boundaries(
    contents: &str,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<NeighborhoodBoundary>, NeighborhoodError> {
    let collection = match contents.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(_) => {
            return Err(NeighborhoodError::NotFeatureCollection { found: "Feature" });
        }
        GeoJson::Geometry(_) => {
            return Err(NeighborhoodError::NotFeatureCollection { found: "Geometry" });
        }
    };

    if !collection.features.is_empty()
        && !collection
            .features
            .iter()
            .any(|f| f.contains_property(&fields.name_field))
    {
        return Err(NeighborhoodError::MissingNameField {
            field: fields.name_field.clone(),
        });
    }

    let boundaries = crate::normalize::normalize_features(&collection.features, fields);
    log::info!(
        "Normalized {} boundaries from {} features",
        boundaries.len(),
        collection.features.len()
    );

    Ok(boundaries)
}
