//! Generator configuration.
//!
//! Defaults are embedded from `config/default.toml`. A user file is merged
//! over them table by table, so it only has to name the values it changes.
//! Unknown tables and keys are rejected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sisagua_map_compliance_models::{CategoryStyles, ComplianceThresholds};
use sisagua_map_neighborhood_models::BoundaryFieldMapping;
use sisagua_map_render::config::{MapConfig, ReportFormConfig};
use sisagua_map_sample_models::SampleFileConfig;

use crate::GenerateError;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Complete generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Input file locations.
    pub input: InputConfig,
    /// Output file location.
    pub output: OutputConfig,
    /// Sample file layout.
    pub samples: SampleFileConfig,
    /// Boundary property mapping.
    pub boundaries: BoundaryFieldMapping,
    /// Compliance rule limits.
    pub thresholds: ComplianceThresholds,
    /// Polygon style per category.
    pub styles: CategoryStyles,
    /// Tooltip labels.
    pub tooltip: TooltipConfig,
    /// Map view and basemap.
    pub map: MapConfig,
    /// Citizen report form marker.
    pub report_form: ReportFormConfig,
}

/// Input file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Sample CSV file.
    pub samples: PathBuf,
    /// Neighborhood `GeoJSON` file.
    pub boundaries: PathBuf,
}

/// Output file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// HTML file to write. Overwritten if it exists.
    pub path: PathBuf,
}

/// Tooltip labels for the non-parameter rows.
///
/// Parameter rows are labeled `"<parameter label>:"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TooltipConfig {
    /// Label for the neighborhood name.
    pub neighborhood: String,
    /// Label for the supply type.
    pub supply_type: String,
    /// Format numeric values with the viewer's locale.
    pub localize: bool,
}

impl Config {
    /// Returns the embedded default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] if the embedded file does not
    /// parse.
    pub fn defaults() -> Result<Self, GenerateError> {
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }

    /// Loads the defaults, merged with the file at `path` if given.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the file cannot be read or the merged
    /// configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, GenerateError> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                let overrides = std::fs::read_to_string(path)?;
                Self::with_overrides(&overrides)
            }
            None => Self::defaults(),
        }
    }

    /// Merges TOML `overrides` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if `overrides` is not valid TOML or the
    /// merged configuration does not match the schema.
    pub fn with_overrides(overrides: &str) -> Result<Self, GenerateError> {
        let mut merged: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
        let overrides: toml::Table = toml::from_str(overrides)?;
        merge_tables(&mut merged, overrides);

        Ok(toml::from_str(&toml::to_string(&merged)?)?)
    }
}

/// Recursively merges `overlay` into `base`. Nested tables are merged;
/// any other value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => match base.get_mut(&key) {
                Some(toml::Value::Table(base_table)) => merge_tables(base_table, overlay_table),
                _ => {
                    base.insert(key, toml::Value::Table(overlay_table));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
