#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generates the water-quality compliance map.
//!
//! Reads Sisagua sample records and neighborhood boundaries, keeps the
//! latest result per neighborhood and parameter, joins them onto the
//! polygons, classifies each polygon and writes a single HTML map with a
//! citizen report form marker.

pub mod config;
pub mod join;
pub mod map;

use std::path::PathBuf;

use sisagua_map_compliance::classify;
use sisagua_map_compliance_models::{CategoryCounts, Classification, ComplianceThresholds};
use sisagua_map_neighborhood::NeighborhoodError;
use sisagua_map_neighborhood_models::NeighborhoodBoundary;
use sisagua_map_render::RenderError;
use sisagua_map_sample::SampleError;
use sisagua_map_sample_models::NeighborhoodAttributes;
use thiserror::Error;

use crate::config::Config;
use crate::join::JoinedNeighborhood;

pub use map::build_document;

/// Errors that can occur while generating the map.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configuration is not valid TOML or does not match the schema.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The merged configuration could not be re-serialized.
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sample file could not be loaded.
    #[error("Sample error: {0}")]
    Sample(#[from] SampleError),

    /// The boundary file could not be loaded.
    #[error("Neighborhood error: {0}")]
    Neighborhood(#[from] NeighborhoodError),

    /// The map could not be rendered or written.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// A polygon with its attributes and compliance classification.
#[derive(Debug, Clone)]
pub struct ClassifiedNeighborhood {
    /// Polygon and its join key.
    pub boundary: NeighborhoodBoundary,
    /// Aggregated attributes, `None` when no sample matched.
    pub attributes: Option<NeighborhoodAttributes>,
    /// Category and per-rule outcomes.
    pub classification: Classification,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Path of the written map.
    pub output_path: PathBuf,
    /// Sample records read.
    pub samples: usize,
    /// Polygons read.
    pub boundaries: usize,
    /// Polygons that matched a sampled neighborhood.
    pub matched: usize,
    /// Polygons per category.
    pub counts: CategoryCounts,
}

/// Classifies every joined polygon.
#[must_use]
pub fn classify_all(
    joined: Vec<JoinedNeighborhood>,
    thresholds: &ComplianceThresholds,
) -> Vec<ClassifiedNeighborhood> {
    joined
        .into_iter()
        .map(|neighborhood| {
            let classification = classify(neighborhood.attributes.as_ref(), thresholds);
            ClassifiedNeighborhood {
                boundary: neighborhood.boundary,
                attributes: neighborhood.attributes,
                classification,
            }
        })
        .collect()
}

/// Runs the whole pipeline and writes the map to `config.output.path`.
///
/// # Errors
///
/// Returns [`GenerateError`] if an input cannot be loaded or the map
/// cannot be written.
pub fn run(config: &Config) -> Result<RunSummary, GenerateError> {
    let records = sisagua_map_sample::load::read_samples(&config.input.samples, &config.samples)?;
    let boundaries = sisagua_map_neighborhood::load::read_boundaries(
        &config.input.boundaries,
        &config.boundaries,
    )?;

    let samples = records.len();
    let boundary_count = boundaries.len();

    let attributes = sisagua_map_sample::aggregate::aggregate(&records);
    let joined = join::join(boundaries, &attributes);
    let matched = joined.iter().filter(|j| j.attributes.is_some()).count();

    let classified = classify_all(joined, &config.thresholds);
    let counts = CategoryCounts::tally(classified.iter().map(|n| n.classification.category));
    log::info!(
        "Classified {} polygons: {} compliant, {} non-compliant, {} without data",
        counts.total(),
        counts.compliant,
        counts.non_compliant,
        counts.no_data
    );

    let document = build_document(&classified, config)?;
    sisagua_map_render::write_map(&document, &config.output.path)?;

    Ok(RunSummary {
        output_path: config.output.path.clone(),
        samples,
        boundaries: boundary_count,
        matched,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use sisagua_map_compliance_models::ComplianceCategory;

    use super::*;

    const SAMPLES: &str = "\
area,parametro,data_da_coleta,resultado,tipo_da_forma_de_abastecimento
Barra,Cloro residual livre (mg/L),2024-01-10,\"0,5\",SAA
Barra,Turbidez (uT),2024-01-10,2.0,SAA
Barra,Escherichia coli,2024-01-10,Ausente,SAA
Barra,Coliformes totais,2024-01-10,AUSENTE,SAA
centro,Cloro residual livre (mg/L),2024-01-10,0.5,SAC
centro,Cloro residual livre (mg/L),2024-02-10,6.0,SAC
Ondina,Fluoreto,2024-02-10,0.7,SAA
";

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "nome_bairr": "Barra" },
                "geometry": { "type": "Polygon", "coordinates": [[[-38.53, -13.01], [-38.52, -13.01], [-38.52, -13.00], [-38.53, -13.01]]] }
            },
            {
                "type": "Feature",
                "properties": { "nome_bairr": "CENTRO " },
                "geometry": { "type": "Polygon", "coordinates": [[[-38.51, -12.98], [-38.50, -12.98], [-38.50, -12.97], [-38.51, -12.98]]] }
            },
            {
                "type": "Feature",
                "properties": { "nome_bairr": "Pituba" },
                "geometry": { "type": "Polygon", "coordinates": [[[-38.46, -13.00], [-38.45, -13.00], [-38.45, -12.99], [-38.46, -13.00]]] }
            }
        ]
    }"#;

    fn config_in(dir: &std::path::Path) -> Config {
        let samples = dir.join("amostras.csv");
        let boundaries = dir.join("bairros.geojson");
        std::fs::write(&samples, SAMPLES.as_bytes()).unwrap();
        std::fs::write(&boundaries, BOUNDARIES).unwrap();

        let mut config = Config::defaults().unwrap();
        config.input.samples = samples;
        config.input.boundaries = boundaries;
        config.output.path = dir.join("out/mapa.html");
        config
    }

    #[test]
    fn run_writes_map_and_counts_categories() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let summary = run(&config).unwrap();

        assert_eq!(summary.samples, 7);
        assert_eq!(summary.boundaries, 3);
        assert_eq!(summary.matched, 2);
        assert_eq!(
            summary.counts,
            CategoryCounts {
                no_data: 1,
                compliant: 1,
                non_compliant: 1,
            }
        );

        let html = std::fs::read_to_string(&summary.output_path).unwrap();
        assert!(html.contains("\"BARRA\""));
        assert!(html.contains("\"PITUBA\""));
        assert!(html.contains("Forma de abastecimento:"));
        assert!(html.contains("\"fillColor\":\"#e57373\""));
    }

    #[test]
    fn run_fails_on_missing_samples() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.input.samples = dir.path().join("missing.csv");

        assert!(matches!(
            run(&config),
            Err(GenerateError::Sample(SampleError::Io(_)))
        ));
        assert!(!config.output.path.exists());
    }

    #[test]
    fn run_fails_on_missing_join_column() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.samples.columns.neighborhood = "bairro".to_string();

        assert!(matches!(
            run(&config),
            Err(GenerateError::Sample(SampleError::MissingColumn { .. }))
        ));
    }

    #[test]
    fn classify_all_keeps_order_and_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let records =
            sisagua_map_sample::load::read_samples(&config.input.samples, &config.samples).unwrap();
        let boundaries = sisagua_map_neighborhood::load::read_boundaries(
            &config.input.boundaries,
            &config.boundaries,
        )
        .unwrap();
        let attributes = sisagua_map_sample::aggregate::aggregate(&records);

        let classified = classify_all(join::join(boundaries, &attributes), &config.thresholds);
        let categories: Vec<ComplianceCategory> = classified
            .iter()
            .map(|n| n.classification.category)
            .collect();

        assert_eq!(
            categories,
            [
                ComplianceCategory::Compliant,
                ComplianceCategory::NonCompliant,
                ComplianceCategory::NoData,
            ]
        );
        assert_eq!(
            classified[1]
                .attributes
                .as_ref()
                .and_then(|a| a.supply_type.as_deref()),
            Some("SAC")
        );
    }
}
