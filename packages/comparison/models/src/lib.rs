#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City size comparison types.
//!
//! A [`ComparisonResult`] is the plain data handed from the comparison
//! pipeline to whatever renders it (the map document, the JSON API, the
//! terminal). Layer styling is data too: a [`StyleConfig`] maps each
//! [`LayerRole`] to a [`LayerStyle`].

use geo::{MultiPolygon, Point};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which of the two inputs a city came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CitySlot {
    /// The reference city; its centroid anchors the map.
    First,
    /// The city whose boundary is moved onto the first.
    Second,
}

/// A resolved city with its measured area.
#[derive(Debug, Clone, PartialEq)]
pub struct CityMeasurement {
    /// Name as the user entered it (trimmed).
    pub name: String,
    /// Provider display name, if any.
    pub display_name: Option<String>,
    /// Boundary in WGS84 longitude/latitude.
    pub boundary: MultiPolygon<f64>,
    /// Web mercator area in square kilometres, two decimals.
    pub area_sq_km: f64,
    /// Geometric centroid, `None` for an empty boundary.
    pub centroid: Option<Point<f64>>,
}

/// A non-fatal problem encountered while comparing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonWarning {
    /// The place name did not resolve to a boundary.
    NotFound {
        /// Which input failed.
        slot: CitySlot,
        /// The name as entered.
        city: String,
    },
    /// The geocoding service could not be reached or answered badly.
    LookupFailed {
        /// Which input failed.
        slot: CitySlot,
        /// The name as entered.
        city: String,
        /// Error description.
        reason: String,
    },
    /// The city resolved but its area is zero, so no percentage can be
    /// computed against it.
    DegenerateArea {
        /// Which input is degenerate.
        slot: CitySlot,
        /// The name as entered.
        city: String,
    },
}

impl ComparisonWarning {
    /// The input this warning concerns.
    #[must_use]
    pub const fn slot(&self) -> CitySlot {
        match self {
            Self::NotFound { slot, .. }
            | Self::LookupFailed { slot, .. }
            | Self::DegenerateArea { slot, .. } => *slot,
        }
    }
}

impl std::fmt::Display for ComparisonWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { city, .. } => write!(f, "City '{city}' not found."),
            Self::LookupFailed { city, reason, .. } => {
                write!(f, "Could not look up '{city}': {reason}")
            }
            Self::DegenerateArea { city, .. } => {
                write!(f, "City '{city}' has no measurable area.")
            }
        }
    }
}

/// The outcome of one comparison request.
///
/// Either city may be missing; the remaining fields are only populated
/// when they can be computed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonResult {
    /// The reference city.
    pub city_a: Option<CityMeasurement>,
    /// The compared city, in its original position.
    pub city_b: Option<CityMeasurement>,
    /// City B's boundary moved onto city A's centroid.
    pub translated_b: Option<MultiPolygon<f64>>,
    /// `(area_b - area_a) / area_a * 100`; positive when B is larger.
    pub percent_difference: Option<f64>,
    /// Problems to surface to the user.
    pub warnings: Vec<ComparisonWarning>,
}

impl ComparisonResult {
    /// Whether there is nothing to render.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.city_a.is_none() && self.city_b.is_none()
    }

    /// Where to center a map: city A's centroid, else city B's.
    #[must_use]
    pub fn map_center(&self) -> Option<Point<f64>> {
        self.city_a
            .as_ref()
            .and_then(|c| c.centroid)
            .or_else(|| self.city_b.as_ref().and_then(|c| c.centroid))
    }
}

/// Progress of one interaction cycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComparisonStage {
    /// Nothing entered.
    #[default]
    Idle,
    /// First city submitted for lookup.
    CityAEntered,
    /// First city resolved.
    CityAResolved,
    /// First city could not be resolved.
    CityAFailed,
    /// Second city submitted for lookup.
    CityBEntered,
    /// Second city resolved.
    CityBResolved,
    /// Second city could not be resolved.
    CityBFailed,
    /// Both cities resolved and compared.
    Composed,
    /// Finished with at least one city missing.
    Partial,
}

impl ComparisonStage {
    /// Whether the cycle has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Composed | Self::Partial)
    }
}

/// The role a boundary plays on the comparison map.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayerRole {
    /// City A's boundary.
    Reference,
    /// City B's boundary where it really is.
    Original,
    /// City B's boundary moved onto city A.
    Translated,
}

impl LayerRole {
    /// All roles in drawing order.
    pub const ALL: &[Self] = &[Self::Reference, Self::Original, Self::Translated];
}

/// How one map layer is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    /// Polygon fill colour (any CSS colour).
    pub fill_color: String,
    /// Outline colour.
    pub stroke_color: String,
    /// Outline width in pixels.
    pub stroke_weight: f64,
    /// Fill opacity, 0.0 to 1.0.
    pub fill_opacity: f64,
}

/// Layer styles for every [`LayerRole`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Style for city A.
    pub reference: LayerStyle,
    /// Style for city B in its original position.
    pub original: LayerStyle,
    /// Style for city B moved onto city A.
    pub translated: LayerStyle,
}

impl StyleConfig {
    /// Returns the style for `role`.
    #[must_use]
    pub const fn style(&self, role: LayerRole) -> &LayerStyle {
        match role {
            LayerRole::Reference => &self.reference,
            LayerRole::Original => &self.original,
            LayerRole::Translated => &self.translated,
        }
    }
}
