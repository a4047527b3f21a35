#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Presentation of a [`ComparisonResult`].
//!
//! Turns the pipeline's plain data into map layers, a summary sentence, and
//! a standalone Leaflet HTML document that can be saved or served.

pub mod html;
pub mod summary;

use city_compare_comparison_models::{ComparisonResult, LayerRole, LayerStyle, StyleConfig};
use geo::MultiPolygon;
use serde_json::json;

pub use summary::{SizeDirection, Summary, format_area, summary_sentence};

/// File name offered when the map document is downloaded.
pub const DOWNLOAD_FILENAME: &str = "city_size_comparison.html";

/// Zoom level used when a city is available to center on.
pub const CITY_ZOOM: u8 = 10;

const WORLD_CENTER: [f64; 2] = [20.0, 0.0];
const WORLD_ZOOM: u8 = 2;

const LEAFLET_VERSION: &str = "1.9.4";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// One overlay on the comparison map.
#[derive(Debug, Clone)]
pub struct MapLayer<'a> {
    /// Which boundary this is.
    pub role: LayerRole,
    /// Label shown in the layer control.
    pub name: String,
    /// Hover text, `"<layer name>: <area> km²"`. Both city B layers carry
    /// city B's area.
    pub tooltip: String,
    /// Geometry in WGS84.
    pub boundary: &'a MultiPolygon<f64>,
    /// Drawing style.
    pub style: &'a LayerStyle,
}

/// Builds the overlays for `result` in drawing order: city A, city B where
/// it really is, then city B moved onto city A.
///
/// Missing cities simply contribute no layer.
#[must_use]
pub fn build_layers<'a>(result: &'a ComparisonResult, styles: &'a StyleConfig) -> Vec<MapLayer<'a>> {
    let mut layers = Vec::with_capacity(3);

    if let Some(a) = &result.city_a {
        layers.push(MapLayer {
            role: LayerRole::Reference,
            name: a.name.clone(),
            tooltip: format!("{}: {}", a.name, format_area(a.area_sq_km)),
            boundary: &a.boundary,
            style: styles.style(LayerRole::Reference),
        });
    }

    if let Some(b) = &result.city_b {
        let area = format_area(b.area_sq_km);
        let original = format!("{} (original)", b.name);

        layers.push(MapLayer {
            role: LayerRole::Original,
            tooltip: format!("{original}: {area}"),
            name: original,
            boundary: &b.boundary,
            style: styles.style(LayerRole::Original),
        });

        if let Some(translated) = &result.translated_b {
            let name = format!("{} (translated)", b.name);
            layers.push(MapLayer {
                role: LayerRole::Translated,
                tooltip: format!("{name}: {area}"),
                name,
                boundary: translated,
                style: styles.style(LayerRole::Translated),
            });
        }
    }

    layers
}

fn layer_json(layer: &MapLayer<'_>) -> serde_json::Value {
    let geometry = geojson::Geometry::new(geojson::Value::from(layer.boundary));

    json!({
        "role": layer.role.as_ref(),
        "name": html::escape(&layer.name),
        "tooltip": html::escape(&layer.tooltip),
        "style": {
            "color": layer.style.stroke_color,
            "weight": layer.style.stroke_weight,
            "fillColor": layer.style.fill_color,
            "fillOpacity": layer.style.fill_opacity,
        },
        "feature": {
            "type": "Feature",
            "properties": { "role": layer.role.as_ref() },
            "geometry": geometry,
        },
    })
}

/// Renders `result` as a self-contained HTML page with a Leaflet map.
///
/// The map is centered on city A (city B when A is missing) with a layer
/// control in the top-right corner, expanded. The summary sentence and any
/// warnings are shown above the map.
///
/// # Errors
///
/// Returns an error if the layer data cannot be serialized.
pub fn render_html(
    result: &ComparisonResult,
    styles: &StyleConfig,
) -> Result<String, serde_json::Error> {
    let layers = build_layers(result, styles);

    let (center, zoom) = result
        .map_center()
        .map_or((WORLD_CENTER, WORLD_ZOOM), |p| ([p.y(), p.x()], CITY_ZOOM));

    let config = json!({
        "center": center,
        "zoom": zoom,
        "tileUrl": TILE_URL,
        "attribution": TILE_ATTRIBUTION,
        "layerControl": { "position": "topright", "collapsed": false },
        "layers": layers.iter().map(layer_json).collect::<Vec<_>>(),
    });
    let config = html::script_json(&config)?;

    let title = match (&result.city_a, &result.city_b) {
        (Some(a), Some(b)) => format!("{} vs {}", a.name, b.name),
        (Some(c), None) | (None, Some(c)) => c.name.clone(),
        (None, None) => "no cities".to_string(),
    };

    let summary = summary::Summary::from_result(result)
        .map(|s| format!("<p class=\"summary\">{}</p>", s.to_html()))
        .unwrap_or_default();

    let warnings: String = result
        .warnings
        .iter()
        .map(|w| format!("<p class=\"warning\">{}</p>", html::escape(&w.to_string())))
        .collect();

    log::debug!(
        "Rendering map with {} layer(s) and {} warning(s)",
        layers.len(),
        result.warnings.len()
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>City Size Comparison: {title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<style>
html, body {{ height: 100%; margin: 0; font-family: sans-serif; }}
body {{ display: flex; flex-direction: column; }}
#info {{ padding: 0.5rem 1rem; }}
#info p {{ margin: 0.25rem 0; }}
.warning {{ color: #a15c00; }}
#map {{ flex: 1; }}
</style>
</head>
<body>
<div id="info">{summary}{warnings}</div>
<div id="map"></div>
<script>
const config = {config};
const map = L.map("map").setView(config.center, config.zoom);
L.tileLayer(config.tileUrl, {{ maxZoom: 19, attribution: config.attribution }}).addTo(map);
const overlays = {{}};
for (const layer of config.layers) {{
  const overlay = L.geoJSON(layer.feature, {{ style: () => layer.style }})
    .bindTooltip(layer.tooltip)
    .addTo(map);
  overlays[layer.name] = overlay;
}}
L.control.layers(null, overlays, config.layerControl).addTo(map);
</script>
</body>
</html>
"#,
        title = html::escape(&title),
    ))
}
