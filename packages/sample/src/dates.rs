//! Collection date parsing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a collection date using the first matching format.
///
/// Formats may describe a full timestamp or a date only; date-only values
/// are placed at midnight. Returns `None` for blank or unrecognized input.
#[must_use]
pub fn parse_collection_date(raw: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    formats.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, format)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    })
}
