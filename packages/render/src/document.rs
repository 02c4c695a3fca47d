//! In-memory description of a map before it is rendered.
//!
//! A [`MapDocument`] holds a basemap, markers with popups, and polygon
//! layers whose features carry their own style and tooltip properties.

use askama::Template;
use geo::{BoundingRect, Coord, MultiPolygon, Rect};
use sisagua_map_compliance_models::PolygonStyle;

use crate::RenderError;
use crate::config::{MapConfig, ReportFormConfig, TileLayer};

/// Everything needed to render one map.
#[derive(Debug, Clone)]
pub struct MapDocument {
    /// Document title.
    pub title: String,
    /// Initial view.
    pub view: MapView,
    /// Basemap.
    pub tiles: TileLayer,
    /// Point markers.
    pub markers: Vec<Marker>,
    /// Polygon layers, drawn in order.
    pub layers: Vec<PolygonLayer>,
    /// Whether to add a layer visibility control.
    pub layer_control: bool,
}

/// Initial view of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    /// `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Zoom level.
    pub zoom: u8,
    /// Fit the view to all polygons after loading.
    pub fit_bounds: bool,
}

/// A point marker.
#[derive(Debug, Clone)]
pub struct Marker {
    /// Name in the layer control.
    pub name: String,
    /// `[latitude, longitude]`.
    pub location: [f64; 2],
    /// Icon appearance.
    pub icon: IconStyle,
    /// Popup opened on click.
    pub popup: Option<Popup>,
}

/// Marker icon appearance.
#[derive(Debug, Clone)]
pub struct IconStyle {
    /// Marker color (e.g., `"blue"`).
    pub color: String,
    /// Glyph name (e.g., `"info-sign"`).
    pub icon: String,
}

/// Popup content shown in a fixed-size scrollable frame.
#[derive(Debug, Clone)]
pub struct Popup {
    /// HTML document shown inside the frame.
    pub html: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Maximum popup width in pixels.
    pub max_width: u32,
}

#[derive(Template)]
#[template(
    source = r#"<iframe src="{{ url }}" width="{{ width }}" height="{{ height }}" frameborder="0" marginheight="0" marginwidth="0">{{ loading_text }}</iframe>"#,
    ext = "html"
)]
struct FormFrame<'a> {
    url: &'a str,
    width: u32,
    height: u32,
    loading_text: &'a str,
}

impl Popup {
    /// Builds a popup embedding an external form.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the frame markup fails to
    /// render.
    pub fn embedded_form(config: &ReportFormConfig) -> Result<Self, RenderError> {
        let html = FormFrame {
            url: &config.url,
            width: config.form_width,
            height: config.form_height,
            loading_text: &config.loading_text,
        }
        .render()?;

        Ok(Self {
            html,
            width: config.frame_width,
            height: config.frame_height,
            max_width: config.max_width,
        })
    }
}

impl Marker {
    /// Builds the report form marker.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the popup markup fails to
    /// render.
    pub fn report_form(config: &ReportFormConfig) -> Result<Self, RenderError> {
        Ok(Self {
            name: config.name.clone(),
            location: config.location,
            icon: IconStyle {
                color: config.icon_color.clone(),
                icon: config.icon.clone(),
            },
            popup: Some(Popup::embedded_form(config)?),
        })
    }
}

/// A named layer of styled polygons sharing one tooltip layout.
#[derive(Debug, Clone)]
pub struct PolygonLayer {
    /// Name in the layer control.
    pub name: String,
    /// Polygons.
    pub features: Vec<StyledFeature>,
    /// Hover tooltip layout.
    pub tooltip: Tooltip,
}

/// One polygon with its style and display properties.
#[derive(Debug, Clone)]
pub struct StyledFeature {
    /// Geometry.
    pub geometry: MultiPolygon<f64>,
    /// Fill and outline.
    pub style: PolygonStyle,
    /// Values looked up by the tooltip fields. Nulls render as blanks.
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Which properties a tooltip shows and how they are labeled.
#[derive(Debug, Clone)]
pub struct Tooltip {
    /// Rows in display order.
    pub fields: Vec<TooltipField>,
    /// Format numeric values with the viewer's locale.
    pub localize: bool,
}

/// One tooltip row.
#[derive(Debug, Clone)]
pub struct TooltipField {
    /// Property key.
    pub key: String,
    /// Label shown next to the value.
    pub alias: String,
}

impl MapDocument {
    /// Creates an empty map from the view configuration.
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        Self {
            title: config.title.clone(),
            view: MapView {
                center: config.center,
                zoom: config.zoom,
                fit_bounds: config.fit_bounds,
            },
            tiles: config.tiles.clone(),
            markers: Vec::new(),
            layers: Vec::new(),
            layer_control: config.layer_control,
        }
    }

    /// Adds a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Adds a polygon layer.
    #[must_use]
    pub fn with_layer(mut self, layer: PolygonLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Bounding rectangle of every polygon in every layer.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.layers
            .iter()
            .flat_map(|layer| &layer.features)
            .filter_map(|feature| feature.geometry.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    Coord {
                        x: a.min().x.min(b.min().x),
                        y: a.min().y.min(b.min().y),
                    },
                    Coord {
                        x: a.max().x.max(b.max().x),
                        y: a.max().y.max(b.max().y),
                    },
                )
            })
    }
}
