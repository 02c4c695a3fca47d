#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Water-quality sample types.
//!
//! Defines the monitored [`Parameter`] set, the normalized [`SampleRecord`]
//! read from a Sisagua export, the per-neighborhood
//! [`NeighborhoodAttributes`] produced by aggregation, and the TOML schema
//! describing the sample file layout.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sisagua_map_neighborhood_models::NeighborhoodKey;
use strum_macros::{AsRefStr, Display, EnumString};

/// A monitored water-quality parameter.
///
/// The string form is the label used in Sisagua exports. Parsing is
/// case-insensitive. Variant order is the display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum Parameter {
    /// Presence/absence of Escherichia coli.
    #[strum(serialize = "Escherichia coli")]
    EscherichiaColi,
    /// Turbidity in nephelometric units.
    #[strum(serialize = "Turbidez (uT)")]
    Turbidity,
    /// Free residual chlorine in mg/L.
    #[strum(serialize = "Cloro residual livre (mg/L)")]
    FreeChlorine,
    /// Presence/absence of total coliforms.
    #[strum(serialize = "Coliformes totais")]
    TotalColiforms,
}

impl Parameter {
    /// All monitored parameters in display order.
    pub const ALL: [Self; 4] = [
        Self::EscherichiaColi,
        Self::Turbidity,
        Self::FreeChlorine,
        Self::TotalColiforms,
    ];

    /// Matches a source label against the monitored parameters.
    ///
    /// Returns `None` for any other parameter.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }

    /// Returns the Sisagua label for this parameter.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EscherichiaColi => "Escherichia coli",
            Self::Turbidity => "Turbidez (uT)",
            Self::FreeChlorine => "Cloro residual livre (mg/L)",
            Self::TotalColiforms => "Coliformes totais",
        }
    }
}

/// A single sample row after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    /// Neighborhood join key (from the `area` column).
    pub neighborhood: NeighborhoodKey,
    /// Trimmed parameter label as it appears in the file.
    pub parameter: String,
    /// Collection timestamp, `None` if missing or unparseable.
    pub collection_date: Option<NaiveDateTime>,
    /// Trimmed result text, `None` if blank.
    pub result: Option<String>,
    /// Trimmed supply type description, `None` if blank.
    pub supply_type: Option<String>,
}

impl SampleRecord {
    /// Returns the monitored parameter this record measures, if any.
    #[must_use]
    pub fn target_parameter(&self) -> Option<Parameter> {
        Parameter::from_label(&self.parameter)
    }
}

/// Latest known values for one neighborhood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborhoodAttributes {
    /// Neighborhood join key.
    pub name: NeighborhoodKey,
    /// Most recent result per parameter. Absent parameters are null.
    pub results: BTreeMap<Parameter, String>,
    /// Supply type from the most recent sample of any parameter.
    pub supply_type: Option<String>,
}

impl NeighborhoodAttributes {
    /// Returns the latest result for a parameter.
    #[must_use]
    pub fn result(&self, parameter: Parameter) -> Option<&str> {
        self.results.get(&parameter).map(String::as_str)
    }
}

/// Character encoding of the sample file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// Windows-1252, as written by Sisagua's export tool. A superset of
    /// ISO-8859-1 for every printable character.
    #[default]
    #[serde(rename = "windows_1252", alias = "latin1", alias = "cp1252")]
    Windows1252,
    /// UTF-8.
    Utf8,
}

/// Header names of the required sample columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleColumns {
    /// Neighborhood name column.
    pub neighborhood: String,
    /// Parameter label column.
    pub parameter: String,
    /// Collection date column.
    pub collection_date: String,
    /// Result column.
    pub result: String,
    /// Supply type description column.
    pub supply_type: String,
}

/// Layout of the sample file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleFileConfig {
    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: char,
    /// Character encoding.
    #[serde(default)]
    pub encoding: TextEncoding,
    /// `chrono` formats tried in order when parsing collection dates.
    pub date_formats: Vec<String>,
    /// Required column names.
    pub columns: SampleColumns,
}
