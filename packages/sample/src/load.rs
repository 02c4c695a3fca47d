//! Reads sample records from a delimited text file.
//!
//! Sisagua exports are Windows-1252 encoded, so the file is decoded before
//! it reaches the CSV parser. Columns are located by header name; their
//! position in the file does not matter.

use std::path::Path;

use sisagua_map_sample_models::{SampleColumns, SampleFileConfig, SampleRecord, TextEncoding};

use crate::SampleError;
use crate::dates::parse_collection_date;
use crate::normalize::{RawSample, normalize_sample};

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    neighborhood: usize,
    parameter: usize,
    collection_date: usize,
    result: usize,
    supply_type: usize,
}

impl ColumnIndexes {
    fn locate(headers: &[String], columns: &SampleColumns) -> Result<Self, SampleError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name.trim())
                .ok_or_else(|| SampleError::MissingColumn {
                    column: name.to_owned(),
                })
        };

        Ok(Self {
            neighborhood: find(&columns.neighborhood)?,
            parameter: find(&columns.parameter)?,
            collection_date: find(&columns.collection_date)?,
            result: find(&columns.result)?,
            supply_type: find(&columns.supply_type)?,
        })
    }
}

/// Reads and normalizes every sample record in a file.
///
/// # Errors
///
/// Returns [`SampleError`] if the file cannot be read or decoded, is not
/// valid CSV, or lacks a required column.
pub fn read_samples(
    path: &Path,
    config: &SampleFileConfig,
) -> Result<Vec<SampleRecord>, SampleError> {
    log::info!("Reading sample records from {}", path.display());
    let bytes = std::fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let text = decode(bytes, config.encoding)?;
    parse_samples(&text, config)
}

/// Decodes raw file bytes into text.
///
/// In Windows-1252 mode a leading byte order mark overrides the
/// configured encoding and is removed. In UTF-8 mode the mark is kept and
/// dropped from the header row by the parser.
///
/// # Errors
///
/// Returns [`SampleError::Utf8`] if UTF-8 was requested and the bytes are
/// not valid UTF-8. Windows-1252 decoding cannot fail.
pub fn decode(bytes: Vec<u8>, encoding: TextEncoding) -> Result<String, SampleError> {
    match encoding {
        TextEncoding::Windows1252 => {
            let (text, used, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            if used != encoding_rs::WINDOWS_1252 {
                log::debug!("Byte order mark found; decoding as {}", used.name());
            }
            Ok(text.into_owned())
        }
        TextEncoding::Utf8 => Ok(String::from_utf8(bytes)?),
    }
}

/// Parses and normalizes sample records from decoded text.
///
/// Rows with fewer fields than the header are accepted; missing fields are
/// treated as blank.
///
/// # Errors
///
/// Returns [`SampleError`] if the delimiter is not ASCII, the text is not
/// valid CSV, or a required column is missing.
pub fn parse_samples(
    text: &str,
    config: &SampleFileConfig,
) -> Result<Vec<SampleRecord>, SampleError> {
    let delimiter = u8::try_from(config.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(SampleError::InvalidDelimiter {
            delimiter: config.delimiter,
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_owned())
        .collect();

    let columns = ColumnIndexes::locate(&headers, &config.columns)?;

    let mut records = Vec::new();
    let mut undated = 0_usize;

    for result in reader.records() {
        let row = result?;
        let field = |index: usize| row.get(index).unwrap_or("");

        let raw = RawSample {
            neighborhood: field(columns.neighborhood),
            parameter: field(columns.parameter),
            collection_date: field(columns.collection_date),
            result: field(columns.result),
            supply_type: field(columns.supply_type),
        };

        let collection_date = parse_collection_date(raw.collection_date, &config.date_formats);
        if collection_date.is_none() {
            undated += 1;
            log::debug!(
                "Unrecognized collection date {:?} for {}",
                raw.collection_date,
                raw.neighborhood.trim()
            );
        }

        records.push(normalize_sample(raw, collection_date));
    }

    if undated > 0 {
        log::warn!("{undated} sample records have no recognizable collection date");
    }
    log::info!("Parsed {} sample records", records.len());

    Ok(records)
}
