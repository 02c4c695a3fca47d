//! Normalizes `GeoJSON` features into [`NeighborhoodBoundary`] values.
//!
//! Uses the [`BoundaryFieldMapping`] to find the neighborhood name in each
//! feature's properties, regardless of the layer's field naming.

use geo::MultiPolygon;
use geojson::Feature;
use sisagua_map_neighborhood_models::{
    BoundaryFieldMapping, NeighborhoodBoundary, NeighborhoodKey,
};

/// Normalizes a list of features into boundaries.
///
/// Skips features whose geometry is missing or not polygonal. Features
/// without a usable name are kept with an empty key.
#[must_use]
pub fn normalize_features(
    features: &[Feature],
    fields: &BoundaryFieldMapping,
) -> Vec<NeighborhoodBoundary> {
    features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let boundary = normalize_feature(feature, fields);
            if boundary.is_none() {
                log::warn!("Skipping feature {index}: geometry is missing or not a polygon");
            }
            boundary
        })
        .collect()
}

/// Normalizes a single feature.
fn normalize_feature(
    feature: &Feature,
    fields: &BoundaryFieldMapping,
) -> Option<NeighborhoodBoundary> {
    let geometry = to_multipolygon(feature.geometry.as_ref()?)?;

    let raw_name = feature
        .property(&fields.name_field)
        .and_then(property_text)
        .unwrap_or_default();
    let name = NeighborhoodKey::new(&raw_name);

    if name.is_empty() {
        log::warn!(
            "Boundary feature has no '{}' value; it will not match any samples",
            fields.name_field
        );
    }

    Some(NeighborhoodBoundary { name, geometry })
}

/// Reads a property value as text. Numeric names (e.g., district codes)
/// are rendered with their JSON representation.
fn property_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Converts a `GeoJSON` geometry to a [`MultiPolygon`], promoting single
/// polygons.
fn to_multipolygon(geometry: &geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}
