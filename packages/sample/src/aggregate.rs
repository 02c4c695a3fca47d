//! Reduces sample records to the latest values per neighborhood.
//!
//! Two passes over the date-sorted records: one builds the latest result
//! per (neighborhood, parameter) from monitored parameters only, the other
//! takes the supply type of the latest record of any parameter. The second
//! is left-merged onto the first.

use std::collections::BTreeMap;

use sisagua_map_neighborhood_models::NeighborhoodKey;
use sisagua_map_sample_models::{NeighborhoodAttributes, Parameter, SampleRecord};

/// Aggregates sample records into one attributes row per neighborhood.
///
/// Only neighborhoods with at least one monitored-parameter record appear
/// in the output. Records are stably sorted by collection date, with
/// undated records first, so the last record in input order wins among
/// records sharing a date.
#[must_use]
pub fn aggregate(records: &[SampleRecord]) -> BTreeMap<NeighborhoodKey, NeighborhoodAttributes> {
    let mut sorted: Vec<&SampleRecord> = records
        .iter()
        .filter(|r| !r.neighborhood.is_empty())
        .collect();
    sorted.sort_by_key(|r| r.collection_date);

    let results = latest_results(&sorted);
    let supply_types = latest_supply_types(&sorted);

    let attributes: BTreeMap<NeighborhoodKey, NeighborhoodAttributes> = results
        .into_iter()
        .map(|(name, results)| {
            let supply_type = supply_types.get(name).cloned().flatten();
            (
                name.clone(),
                NeighborhoodAttributes {
                    name: name.clone(),
                    results,
                    supply_type,
                },
            )
        })
        .collect();

    log::info!(
        "Aggregated {} neighborhoods from {} sample records",
        attributes.len(),
        records.len()
    );

    attributes
}

/// Latest result per monitored parameter, keyed by neighborhood.
///
/// A blank latest result clears any earlier value for that parameter.
fn latest_results<'a>(
    sorted: &[&'a SampleRecord],
) -> BTreeMap<&'a NeighborhoodKey, BTreeMap<Parameter, String>> {
    let mut latest: BTreeMap<&NeighborhoodKey, BTreeMap<Parameter, String>> = BTreeMap::new();
    let mut ignored = 0_usize;

    for record in sorted {
        let Some(parameter) = record.target_parameter() else {
            ignored += 1;
            continue;
        };

        let results = latest.entry(&record.neighborhood).or_default();
        match &record.result {
            Some(result) => {
                results.insert(parameter, result.clone());
            }
            None => {
                results.remove(&parameter);
            }
        }
    }

    log::debug!("Ignored {ignored} records for unmonitored parameters");

    latest
}

/// Supply type of the latest record of any parameter, keyed by
/// neighborhood.
fn latest_supply_types<'a>(
    sorted: &[&'a SampleRecord],
) -> BTreeMap<&'a NeighborhoodKey, Option<String>> {
    sorted
        .iter()
        .map(|record| (&record.neighborhood, record.supply_type.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn date(day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2023, 1, day).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn record(
        neighborhood: &str,
        parameter: &str,
        day: Option<u32>,
        result: Option<&str>,
        supply_type: Option<&str>,
    ) -> SampleRecord {
        SampleRecord {
            neighborhood: NeighborhoodKey::new(neighborhood),
            parameter: parameter.to_string(),
            collection_date: day.and_then(date),
            result: result.map(ToString::to_string),
            supply_type: supply_type.map(ToString::to_string),
        }
    }

    fn key(name: &str) -> NeighborhoodKey {
        NeighborhoodKey::new(name)
    }

    #[test]
    fn keeps_latest_result_per_parameter() {
        let records = vec![
            record("Centro", "Turbidez (uT)", Some(9), Some("7,0"), Some("SAA")),
            record("Centro", "Turbidez (uT)", Some(3), Some("1,0"), Some("SAA")),
            record("Centro", "Escherichia coli", Some(5), Some("Ausente"), Some("SAA")),
        ];

        let attrs = aggregate(&records);
        let centro = &attrs[&key("CENTRO")];
        assert_eq!(centro.result(Parameter::Turbidity), Some("7,0"));
        assert_eq!(centro.result(Parameter::EscherichiaColi), Some("Ausente"));
        assert_eq!(centro.result(Parameter::FreeChlorine), None);
    }

    #[test]
    fn ties_resolve_to_last_input_row() {
        let records = vec![
            record("Centro", "Turbidez (uT)", Some(4), Some("1,0"), Some("SAA")),
            record("Centro", "Turbidez (uT)", Some(4), Some("2,0"), Some("SAC")),
        ];

        let attrs = aggregate(&records);
        let centro = &attrs[&key("CENTRO")];
        assert_eq!(centro.result(Parameter::Turbidity), Some("2,0"));
        assert_eq!(centro.supply_type.as_deref(), Some("SAC"));
    }

    #[test]
    fn undated_records_lose_to_dated_ones() {
        let records = vec![
            record("Centro", "Turbidez (uT)", Some(1), Some("1,0"), None),
            record("Centro", "Turbidez (uT)", None, Some("9,0"), None),
        ];

        let attrs = aggregate(&records);
        assert_eq!(attrs[&key("CENTRO")].result(Parameter::Turbidity), Some("1,0"));
    }

    #[test]
    fn drops_unmonitored_parameters() {
        let records = vec![
            record("Barra", "Fluoreto (mg/L)", Some(1), Some("0,7"), Some("SAA")),
            record("Centro", "Coliformes totais", Some(1), Some("Ausente"), Some("SAA")),
        ];

        let attrs = aggregate(&records);
        assert!(!attrs.contains_key(&key("BARRA")));
        assert!(attrs.contains_key(&key("CENTRO")));
    }

    #[test]
    fn supply_type_comes_from_latest_record_of_any_parameter() {
        let records = vec![
            record("Centro", "Turbidez (uT)", Some(2), Some("1,0"), Some("SAA")),
            record("Centro", "Fluoreto (mg/L)", Some(8), Some("0,7"), Some("SAI")),
        ];

        let attrs = aggregate(&records);
        let centro = &attrs[&key("CENTRO")];
        assert_eq!(centro.supply_type.as_deref(), Some("SAI"));
        assert_eq!(centro.results.len(), 1);
    }

    #[test]
    fn blank_latest_result_is_null() {
        let records = vec![
            record("Centro", "Turbidez (uT)", Some(1), Some("1,0"), None),
            record("Centro", "Turbidez (uT)", Some(2), None, None),
        ];

        let attrs = aggregate(&records);
        let centro = &attrs[&key("CENTRO")];
        assert_eq!(centro.result(Parameter::Turbidity), None);
        assert_eq!(centro.supply_type, None);
    }

    #[test]
    fn merges_differently_formatted_names() {
        let records = vec![
            record("centro", "Turbidez (uT)", Some(1), Some("1,0"), None),
            record(" CENTRO ", "Escherichia coli", Some(2), Some("Ausente"), None),
        ];

        let attrs = aggregate(&records);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[&key("CENTRO")].results.len(), 2);
    }

    #[test]
    fn drops_records_without_neighborhood() {
        let records = vec![record("  ", "Turbidez (uT)", Some(1), Some("1,0"), None)];
        assert!(aggregate(&records).is_empty());
    }

    #[test]
    fn aggregation_is_deterministic() {
        let records = vec![
            record("Centro", "Turbidez (uT)", Some(3), Some("1,0"), Some("SAA")),
            record("Barra", "Escherichia coli", Some(3), Some("Presente"), Some("SAC")),
            record("Centro", "Turbidez (uT)", Some(3), Some("4,0"), Some("SAI")),
        ];

        assert_eq!(aggregate(&records), aggregate(&records));
    }
}
