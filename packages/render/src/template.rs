//! HTML template and the JSON payload it embeds.
//!
//! The page script reads a single JSON object describing the view, the
//! basemap, the markers, and each polygon layer as a `GeoJSON`
//! `FeatureCollection`. Each feature's style travels in a reserved
//! `_style` property.

use askama::Template;
use geojson::{Feature, FeatureCollection};
use serde_json::{Value, json};
use sisagua_map_compliance_models::PolygonStyle;

use crate::document::{MapDocument, Marker, PolygonLayer};

/// Property key holding a feature's Leaflet path options.
pub const STYLE_PROPERTY: &str = "_style";

#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate<'a> {
    pub title: &'a str,
    pub data_json: &'a str,
}

/// Serializes JSON for inclusion in an inline `<script>`.
///
/// `<`, `>` and `&` are emitted as unicode escapes so no string value can
/// close the script element or open a comment.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn script_json(value: &Value) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Builds the payload read by the page script.
///
/// # Errors
///
/// Returns an error if a feature collection cannot be serialized.
pub fn payload(document: &MapDocument) -> Result<Value, serde_json::Error> {
    let bounds = if document.view.fit_bounds {
        document.bounds().map(|rect| {
            json!([[rect.min().y, rect.min().x], [rect.max().y, rect.max().x]])
        })
    } else {
        None
    };

    let layers = document
        .layers
        .iter()
        .map(layer_payload)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "view": {
            "center": document.view.center,
            "zoom": document.view.zoom,
            "bounds": bounds,
        },
        "tiles": {
            "name": document.tiles.name,
            "url": document.tiles.url,
            "attribution": document.tiles.attribution,
            "subdomains": document.tiles.subdomains,
            "maxZoom": document.tiles.max_zoom,
        },
        "markers": document.markers.iter().map(marker_payload).collect::<Vec<_>>(),
        "layers": layers,
        "layerControl": document.layer_control,
    }))
}

fn marker_payload(marker: &Marker) -> Value {
    json!({
        "name": marker.name,
        "location": marker.location,
        "icon": {
            "color": marker.icon.color,
            "icon": marker.icon.icon,
        },
        "popup": marker.popup.as_ref().map(|popup| json!({
            "html": popup.html,
            "width": popup.width,
            "height": popup.height,
            "maxWidth": popup.max_width,
        })),
    })
}

fn layer_payload(layer: &PolygonLayer) -> Result<Value, serde_json::Error> {
    let features = layer
        .features
        .iter()
        .map(|feature| {
            let mut properties = feature.properties.clone();
            properties.insert(STYLE_PROPERTY.to_string(), leaflet_style(&feature.style));

            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &feature.geometry,
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let fields: Vec<Value> = layer
        .tooltip
        .fields
        .iter()
        .map(|field| json!({ "key": field.key, "alias": field.alias }))
        .collect();

    Ok(json!({
        "name": layer.name,
        "tooltip": {
            "fields": fields,
            "localize": layer.tooltip.localize,
        },
        "data": serde_json::to_value(&collection)?,
    }))
}

/// Converts a style to Leaflet path options.
fn leaflet_style(style: &PolygonStyle) -> Value {
    json!({
        "fillColor": style.fill_color,
        "color": style.color,
        "weight": style.weight,
        "fillOpacity": style.fill_opacity,
    })
}
