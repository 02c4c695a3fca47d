#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Renders a [`MapDocument`] to a single self-contained HTML file.
//!
//! The page loads Leaflet and the awesome-markers plugin from public CDNs
//! when viewed; everything else (polygons, styles, tooltips, popups) is
//! embedded in the file.

pub mod config;
pub mod document;
pub mod template;

use std::path::Path;

use askama::Template as _;
use thiserror::Error;

pub use document::{
    IconStyle, MapDocument, MapView, Marker, PolygonLayer, Popup, StyledFeature, Tooltip,
    TooltipField,
};

/// Errors that can occur while rendering or writing a map.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Payload serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a map document to HTML.
///
/// # Errors
///
/// Returns [`RenderError`] if the payload cannot be serialized or the
/// template fails to render.
pub fn render_html(document: &MapDocument) -> Result<String, RenderError> {
    let payload = template::payload(document)?;
    let data_json = template::script_json(&payload)?;

    let html = template::MapTemplate {
        title: &document.title,
        data_json: &data_json,
    }
    .render()?;

    Ok(html)
}

/// Renders a map document and writes it to `path`, replacing any existing
/// file. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`RenderError`] if rendering fails or the file cannot be
/// written.
pub fn write_map(document: &MapDocument, path: &Path) -> Result<(), RenderError> {
    let html = render_html(document)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, &html)?;
    log::info!("Wrote {} bytes to {}", html.len(), path.display());

    Ok(())
}
