//! TOML schema for the map view and the report form marker.

use serde::{Deserialize, Serialize};

/// Initial view and base layer of the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    /// Document title.
    pub title: String,
    /// Initial center as `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Fit the view to the polygons instead of using `center` and `zoom`.
    #[serde(default)]
    pub fit_bounds: bool,
    /// Whether to add a layer visibility control.
    pub layer_control: bool,
    /// Name of the polygon layer in the layer control.
    pub layer_name: String,
    /// Basemap tiles.
    pub tiles: TileLayer,
}

/// A raster basemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileLayer {
    /// Name in the layer control.
    pub name: String,
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` and optional `{r}`.
    pub url: String,
    /// Attribution HTML.
    pub attribution: String,
    /// Subdomain letters substituted for `{s}`.
    pub subdomains: String,
    /// Maximum zoom level.
    pub max_zoom: u8,
}

/// The citizen report form shown in a marker popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportFormConfig {
    /// Name of the marker in the layer control.
    pub name: String,
    /// URL of the embedded form.
    pub url: String,
    /// Marker position as `[latitude, longitude]`.
    pub location: [f64; 2],
    /// Inner form frame width in pixels.
    pub form_width: u32,
    /// Inner form frame height in pixels.
    pub form_height: u32,
    /// Scrollable popup frame width in pixels.
    pub frame_width: u32,
    /// Scrollable popup frame height in pixels.
    pub frame_height: u32,
    /// Maximum popup width in pixels.
    pub max_width: u32,
    /// Text shown while the form loads.
    pub loading_text: String,
    /// Marker icon color.
    pub icon_color: String,
    /// Marker glyph name.
    pub icon: String,
}
