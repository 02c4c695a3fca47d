//! Builds the map document from classified neighborhoods.

use serde_json::Value;
use sisagua_map_render::{MapDocument, Marker, PolygonLayer, StyledFeature, Tooltip, TooltipField};
use sisagua_map_sample_models::Parameter;

use crate::{ClassifiedNeighborhood, GenerateError, config::Config};

/// Feature property holding the neighborhood name.
pub const NEIGHBORHOOD_PROPERTY: &str = "neighborhood";
/// Feature property holding the supply type.
pub const SUPPLY_TYPE_PROPERTY: &str = "supply_type";
/// Feature property holding the category name.
pub const CATEGORY_PROPERTY: &str = "category";

/// Builds the map: basemap, report form marker and one polygon layer.
///
/// # Errors
///
/// Returns [`GenerateError::Render`] if the report form popup fails to
/// render.
pub fn build_document(
    neighborhoods: &[ClassifiedNeighborhood],
    config: &Config,
) -> Result<MapDocument, GenerateError> {
    let features = neighborhoods
        .iter()
        .map(|neighborhood| styled_feature(neighborhood, config))
        .collect();

    let layer = PolygonLayer {
        name: config.map.layer_name.clone(),
        features,
        tooltip: tooltip(config),
    };

    Ok(MapDocument::new(&config.map)
        .with_marker(Marker::report_form(&config.report_form)?)
        .with_layer(layer))
}

fn tooltip(config: &Config) -> Tooltip {
    let mut fields = vec![
        TooltipField {
            key: NEIGHBORHOOD_PROPERTY.to_string(),
            alias: config.tooltip.neighborhood.clone(),
        },
        TooltipField {
            key: SUPPLY_TYPE_PROPERTY.to_string(),
            alias: config.tooltip.supply_type.clone(),
        },
    ];

    fields.extend(Parameter::ALL.iter().map(|parameter| TooltipField {
        key: parameter.label().to_string(),
        alias: format!("{}:", parameter.label()),
    }));

    Tooltip {
        fields,
        localize: config.tooltip.localize,
    }
}

fn styled_feature(neighborhood: &ClassifiedNeighborhood, config: &Config) -> StyledFeature {
    let attributes = neighborhood.attributes.as_ref();
    let category = neighborhood.classification.category;

    let mut properties = serde_json::Map::new();
    properties.insert(
        NEIGHBORHOOD_PROPERTY.to_string(),
        Value::from(neighborhood.boundary.name.as_str()),
    );
    properties.insert(
        SUPPLY_TYPE_PROPERTY.to_string(),
        attributes
            .and_then(|a| a.supply_type.as_deref())
            .map_or(Value::Null, Value::from),
    );
    for parameter in Parameter::ALL {
        properties.insert(
            parameter.label().to_string(),
            attributes
                .and_then(|a| a.result(parameter))
                .map_or(Value::Null, Value::from),
        );
    }
    properties.insert(CATEGORY_PROPERTY.to_string(), Value::from(category.to_string()));

    StyledFeature {
        geometry: neighborhood.boundary.geometry.clone(),
        style: config.styles.style_for(category).clone(),
        properties,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use geo::{MultiPolygon, polygon};
    use sisagua_map_compliance_models::{Classification, ComplianceCategory};
    use sisagua_map_neighborhood_models::{NeighborhoodBoundary, NeighborhoodKey};
    use sisagua_map_sample_models::NeighborhoodAttributes;

    use super::*;

    fn neighborhood(
        name: &str,
        category: ComplianceCategory,
        attributes: Option<NeighborhoodAttributes>,
    ) -> ClassifiedNeighborhood {
        ClassifiedNeighborhood {
            boundary: NeighborhoodBoundary {
                name: NeighborhoodKey::new(name),
                geometry: MultiPolygon(vec![polygon![
                    (x: -38.51, y: -12.97),
                    (x: -38.50, y: -12.97),
                    (x: -38.50, y: -12.96),
                    (x: -38.51, y: -12.97),
                ]]),
            },
            attributes,
            classification: Classification {
                category,
                rules: None,
            },
        }
    }

    fn sampled(name: &str) -> NeighborhoodAttributes {
        NeighborhoodAttributes {
            name: NeighborhoodKey::new(name),
            results: BTreeMap::from([
                (Parameter::FreeChlorine, "0,5".to_string()),
                (Parameter::EscherichiaColi, "Ausente".to_string()),
            ]),
            supply_type: Some("SAA".to_string()),
        }
    }

    #[test]
    fn tooltip_lists_name_supply_then_parameters() {
        let config = Config::defaults().unwrap();
        let doc = build_document(&[], &config).unwrap();

        let aliases: Vec<&str> = doc.layers[0]
            .tooltip
            .fields
            .iter()
            .map(|f| f.alias.as_str())
            .collect();
        assert_eq!(
            aliases,
            [
                "Bairro:",
                "Forma de abastecimento:",
                "Escherichia coli:",
                "Turbidez (uT):",
                "Cloro residual livre (mg/L):",
                "Coliformes totais:",
            ]
        );
    }

    #[test]
    fn features_follow_category_styles() {
        let config = Config::defaults().unwrap();
        let doc = build_document(
            &[
                neighborhood("Barra", ComplianceCategory::Compliant, Some(sampled("Barra"))),
                neighborhood("Pituba", ComplianceCategory::NoData, None),
                neighborhood("Ondina", ComplianceCategory::NonCompliant, Some(sampled("Ondina"))),
            ],
            &config,
        )
        .unwrap();

        let fills: Vec<&str> = doc.layers[0]
            .features
            .iter()
            .map(|f| f.style.fill_color.as_str())
            .collect();
        assert_eq!(fills, ["green", "gray", "#e57373"]);
    }

    #[test]
    fn properties_carry_latest_values_and_nulls() {
        let config = Config::defaults().unwrap();
        let doc = build_document(
            &[neighborhood(
                "Barra",
                ComplianceCategory::NonCompliant,
                Some(sampled("Barra")),
            )],
            &config,
        )
        .unwrap();

        let properties = &doc.layers[0].features[0].properties;
        assert_eq!(properties["neighborhood"], "BARRA");
        assert_eq!(properties["supply_type"], "SAA");
        assert_eq!(properties["Cloro residual livre (mg/L)"], "0,5");
        assert_eq!(properties["Turbidez (uT)"], Value::Null);
        assert_eq!(properties["category"], "non_compliant");
    }

    #[test]
    fn unsampled_neighborhood_has_null_values() {
        let config = Config::defaults().unwrap();
        let doc = build_document(
            &[neighborhood("Pituba", ComplianceCategory::NoData, None)],
            &config,
        )
        .unwrap();

        let properties = &doc.layers[0].features[0].properties;
        assert_eq!(properties["supply_type"], Value::Null);
        assert_eq!(properties["Escherichia coli"], Value::Null);
    }

    #[test]
    fn includes_report_form_marker() {
        let config = Config::defaults().unwrap();
        let doc = build_document(&[], &config).unwrap();

        assert_eq!(doc.markers.len(), 1);
        assert_eq!(doc.markers[0].icon.icon, "info-sign");
        assert_eq!(doc.layers[0].name, "Dados por bairro");
    }
}
