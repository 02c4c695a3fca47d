//! Normalizes raw sample rows into [`SampleRecord`] values.

use chrono::NaiveDateTime;
use sisagua_map_neighborhood_models::NeighborhoodKey;
use sisagua_map_sample_models::SampleRecord;

/// Borrowed view of the required fields of one CSV row.
#[derive(Debug, Clone, Copy)]
pub struct RawSample<'a> {
    /// Neighborhood name.
    pub neighborhood: &'a str,
    /// Parameter label.
    pub parameter: &'a str,
    /// Collection date text.
    pub collection_date: &'a str,
    /// Result text.
    pub result: &'a str,
    /// Supply type description.
    pub supply_type: &'a str,
}

/// Trims a text field, mapping blank values to `None`.
#[must_use]
pub fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Normalizes one row. The collection date must already be parsed.
#[must_use]
pub fn normalize_sample(raw: RawSample<'_>, collection_date: Option<NaiveDateTime>) -> SampleRecord {
    SampleRecord {
        neighborhood: NeighborhoodKey::new(raw.neighborhood),
        parameter: raw.parameter.trim().to_owned(),
        collection_date,
        result: clean_text(raw.result),
        supply_type: clean_text(raw.supply_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_every_field() {
        let record = normalize_sample(
            RawSample {
                neighborhood: " centro",
                parameter: " Turbidez (uT) ",
                collection_date: "2023-01-01",
                result: " 0,8 ",
                supply_type: " SAA ",
            },
            None,
        );

        assert_eq!(record.neighborhood.as_str(), "CENTRO");
        assert_eq!(record.parameter, "Turbidez (uT)");
        assert_eq!(record.result.as_deref(), Some("0,8"));
        assert_eq!(record.supply_type.as_deref(), Some("SAA"));
    }

    #[test]
    fn blank_fields_become_none() {
        assert_eq!(clean_text("   "), None);
        assert_eq!(clean_text(""), None);
    }
}
