#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Compliance classification types.
//!
//! A neighborhood falls into one [`ComplianceCategory`] based on four
//! water-quality rules. Each category maps to a [`PolygonStyle`] through the
//! configured [`CategoryStyles`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Overall water-quality status of a neighborhood.
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
#[strum(serialize_all = "snake_case")]
pub enum ComplianceCategory {
    /// No result for any monitored parameter.
    NoData,
    /// All four rules hold for the latest results.
    Compliant,
    /// At least one rule does not hold.
    NonCompliant,
}

/// Outcome of evaluating one rule against one latest result.
///
/// Only [`RuleStatus::Satisfied`] counts toward compliance. The other
/// variants are kept apart so reports can tell a measured violation from
/// missing or malformed data, even though all three render the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleStatus {
    /// Value present and within limits.
    Satisfied,
    /// Value present and outside limits.
    Violated,
    /// No result for this parameter.
    Missing,
    /// Result present but not a number.
    Unparseable,
}

impl RuleStatus {
    /// Returns `true` only for [`RuleStatus::Satisfied`].
    #[must_use]
    pub const fn is_satisfied(self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

/// Status of each of the four rules for one neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcomes {
    /// Free chlorine within the allowed range.
    pub free_chlorine: RuleStatus,
    /// Turbidity at or below the maximum.
    pub turbidity: RuleStatus,
    /// E. coli absent.
    pub escherichia_coli: RuleStatus,
    /// Total coliforms absent.
    pub total_coliforms: RuleStatus,
}

impl RuleOutcomes {
    /// Returns `true` if every rule is satisfied.
    #[must_use]
    pub const fn all_satisfied(&self) -> bool {
        self.free_chlorine.is_satisfied()
            && self.turbidity.is_satisfied()
            && self.escherichia_coli.is_satisfied()
            && self.total_coliforms.is_satisfied()
    }
}

/// Result of classifying one neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Overall category.
    pub category: ComplianceCategory,
    /// Per-rule outcomes. `None` when there is no data to evaluate.
    pub rules: Option<RuleOutcomes>,
}

/// Limits applied by the compliance rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceThresholds {
    /// Minimum free chlorine in mg/L (inclusive).
    pub chlorine_min: f64,
    /// Maximum free chlorine in mg/L (inclusive).
    pub chlorine_max: f64,
    /// Maximum turbidity in uT (inclusive).
    pub turbidity_max: f64,
    /// Result text meaning "absent" for presence/absence parameters.
    pub absent_literal: String,
}

/// Visual style of a polygon on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolygonStyle {
    /// Fill color (any CSS color).
    pub fill_color: String,
    /// Outline color.
    pub color: String,
    /// Outline width in pixels.
    pub weight: f64,
    /// Fill opacity between 0 and 1.
    pub fill_opacity: f64,
}

/// Polygon style for each category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryStyles {
    /// Style for [`ComplianceCategory::NoData`].
    pub no_data: PolygonStyle,
    /// Style for [`ComplianceCategory::Compliant`].
    pub compliant: PolygonStyle,
    /// Style for [`ComplianceCategory::NonCompliant`].
    pub non_compliant: PolygonStyle,
}

impl CategoryStyles {
    /// Returns the style for a category.
    #[must_use]
    pub const fn style_for(&self, category: ComplianceCategory) -> &PolygonStyle {
        match category {
            ComplianceCategory::NoData => &self.no_data,
            ComplianceCategory::Compliant => &self.compliant,
            ComplianceCategory::NonCompliant => &self.non_compliant,
        }
    }
}

/// Number of neighborhoods in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Neighborhoods without data.
    pub no_data: usize,
    /// Compliant neighborhoods.
    pub compliant: usize,
    /// Non-compliant neighborhoods.
    pub non_compliant: usize,
}

impl CategoryCounts {
    /// Counts one classified neighborhood.
    pub const fn record(&mut self, category: ComplianceCategory) {
        match category {
            ComplianceCategory::NoData => self.no_data += 1,
            ComplianceCategory::Compliant => self.compliant += 1,
            ComplianceCategory::NonCompliant => self.non_compliant += 1,
        }
    }

    /// Counts a sequence of categories.
    #[must_use]
    pub fn tally(categories: impl IntoIterator<Item = ComplianceCategory>) -> Self {
        let mut counts = Self::default();
        for category in categories {
            counts.record(category);
        }
        counts
    }

    /// Total number of neighborhoods counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.no_data + self.compliant + self.non_compliant
    }
}
