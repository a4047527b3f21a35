#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the city comparison server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the comparison types so the API contract can evolve independently;
//! boundaries are exposed as `GeoJSON` geometries.

use city_compare_comparison_models::{
    CityMeasurement, CitySlot, ComparisonResult, ComparisonStage, ComparisonWarning,
};
use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

/// Query parameters for the compare endpoints.
///
/// Missing parameters are treated as blank inputs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareQueryParams {
    /// The reference city.
    pub city_a: Option<String>,
    /// The city to compare against it.
    pub city_b: Option<String>,
}

/// A resolved city as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCity {
    /// Name as entered.
    pub name: String,
    /// Name reported by the geocoder.
    pub display_name: Option<String>,
    /// Area in square kilometres.
    pub area_sq_km: f64,
    /// Centroid as `[longitude, latitude]`.
    pub centroid: Option<[f64; 2]>,
    /// Boundary in WGS84.
    pub boundary: geojson::Geometry,
}

impl From<&CityMeasurement> for ApiCity {
    fn from(city: &CityMeasurement) -> Self {
        Self {
            name: city.name.clone(),
            display_name: city.display_name.clone(),
            area_sq_km: city.area_sq_km,
            centroid: city.centroid.map(|p| [p.x(), p.y()]),
            boundary: to_geojson(&city.boundary),
        }
    }
}

/// A warning as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWarning {
    /// Which input the warning concerns.
    pub slot: CitySlot,
    /// Display text.
    pub message: String,
    /// The structured warning.
    pub detail: ComparisonWarning,
}

impl From<&ComparisonWarning> for ApiWarning {
    fn from(warning: &ComparisonWarning) -> Self {
        Self {
            slot: warning.slot(),
            message: warning.to_string(),
            detail: warning.clone(),
        }
    }
}

/// A comparison as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiComparison {
    /// Current first input.
    pub input_a: String,
    /// Current second input.
    pub input_b: String,
    /// Where the comparison finished.
    pub stage: ComparisonStage,
    /// The reference city.
    pub city_a: Option<ApiCity>,
    /// The compared city in its real position.
    pub city_b: Option<ApiCity>,
    /// City B moved onto city A's centroid.
    pub translated_b: Option<geojson::Geometry>,
    /// Signed percentage by which B is larger than A.
    pub percent_difference: Option<f64>,
    /// Sentence describing the difference.
    pub sentence: Option<String>,
    /// Non-fatal problems.
    pub warnings: Vec<ApiWarning>,
}

impl ApiComparison {
    /// Builds the API view of a finished comparison.
    #[must_use]
    pub fn new(
        input_a: &str,
        input_b: &str,
        stage: ComparisonStage,
        result: &ComparisonResult,
        sentence: Option<String>,
    ) -> Self {
        Self {
            input_a: input_a.to_string(),
            input_b: input_b.to_string(),
            stage,
            city_a: result.city_a.as_ref().map(ApiCity::from),
            city_b: result.city_b.as_ref().map(ApiCity::from),
            translated_b: result.translated_b.as_ref().map(to_geojson),
            percent_difference: result.percent_difference,
            sentence,
            warnings: result.warnings.iter().map(ApiWarning::from).collect(),
        }
    }
}

fn to_geojson(boundary: &MultiPolygon<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(boundary))
}
