#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sample file loading, normalization, and aggregation.
//!
//! Reads a Sisagua sample export, normalizes the join key and text fields
//! of every row, and reduces the rows to the latest result per
//! neighborhood and monitored parameter.

pub mod aggregate;
pub mod dates;
pub mod load;
pub mod normalize;

use thiserror::Error;

/// Errors that can occur while loading sample records.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The sample file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file was configured as UTF-8 but is not.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A required column is absent from the header row.
    #[error("Required column '{column}' not found in sample file")]
    MissingColumn {
        /// The configured column name.
        column: String,
    },

    /// The configured delimiter is not a single ASCII character.
    #[error("Invalid delimiter {delimiter:?}: must be a single ASCII character")]
    InvalidDelimiter {
        /// The configured delimiter.
        delimiter: char,
    },
}
