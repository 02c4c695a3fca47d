#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Water-quality compliance classification.
//!
//! Evaluates the latest results of a neighborhood against four rules:
//!
//! | Parameter | Rule |
//! |-----------|------|
//! | Free chlorine (mg/L) | `chlorine_min <= value <= chlorine_max` |
//! | Turbidity (uT) | `value <= turbidity_max` |
//! | Escherichia coli | text equals `absent_literal` |
//! | Total coliforms | text equals `absent_literal` |
//!
//! Every rule fails closed: a missing or malformed result is not
//! satisfied. Classification never returns an error.

use sisagua_map_compliance_models::{
    Classification, ComplianceCategory, ComplianceThresholds, RuleOutcomes, RuleStatus,
};
use sisagua_map_sample_models::{NeighborhoodAttributes, Parameter};

/// Parses a decimal number, accepting `,` as the decimal separator.
///
/// Returns `None` for text that is not a number.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

/// Classifies a neighborhood from its aggregated attributes.
///
/// A neighborhood without attributes, or without any monitored result, is
/// [`ComplianceCategory::NoData`].
#[must_use]
pub fn classify(
    attributes: Option<&NeighborhoodAttributes>,
    thresholds: &ComplianceThresholds,
) -> Classification {
    let Some(attributes) = attributes.filter(|a| has_any_result(a)) else {
        return Classification {
            category: ComplianceCategory::NoData,
            rules: None,
        };
    };

    let rules = evaluate_rules(attributes, thresholds);
    let category = if rules.all_satisfied() {
        ComplianceCategory::Compliant
    } else {
        ComplianceCategory::NonCompliant
    };

    Classification {
        category,
        rules: Some(rules),
    }
}

/// Evaluates the four rules against a neighborhood's latest results.
#[must_use]
pub fn evaluate_rules(
    attributes: &NeighborhoodAttributes,
    thresholds: &ComplianceThresholds,
) -> RuleOutcomes {
    let result = |parameter| attributes.result(parameter);

    RuleOutcomes {
        free_chlorine: numeric_rule(result(Parameter::FreeChlorine), |v| {
            (thresholds.chlorine_min..=thresholds.chlorine_max).contains(&v)
        }),
        turbidity: numeric_rule(result(Parameter::Turbidity), |v| {
            v <= thresholds.turbidity_max
        }),
        escherichia_coli: absence_rule(result(Parameter::EscherichiaColi), thresholds),
        total_coliforms: absence_rule(result(Parameter::TotalColiforms), thresholds),
    }
}

fn has_any_result(attributes: &NeighborhoodAttributes) -> bool {
    Parameter::ALL
        .iter()
        .any(|&p| attributes.result(p).is_some())
}

/// Applies `within_limits` to a parsed numeric result.
fn numeric_rule(value: Option<&str>, within_limits: impl Fn(f64) -> bool) -> RuleStatus {
    let Some(raw) = value else {
        return RuleStatus::Missing;
    };

    match parse_decimal(raw) {
        Some(v) if within_limits(v) => RuleStatus::Satisfied,
        Some(_) => RuleStatus::Violated,
        None => RuleStatus::Unparseable,
    }
}

/// Checks a presence/absence result against the "absent" literal.
fn absence_rule(value: Option<&str>, thresholds: &ComplianceThresholds) -> RuleStatus {
    match value {
        None => RuleStatus::Missing,
        Some(raw) if raw.trim().to_uppercase() == thresholds.absent_literal.trim().to_uppercase() => {
            RuleStatus::Satisfied
        }
        Some(_) => RuleStatus::Violated,
    }
}
