#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry operations on boundary polygons.
//!
//! All inputs are WGS84 longitude/latitude multi-polygons as returned by
//! the geocoder. [`area`] projects them to web mercator (EPSG:3857) and
//! measures them in square kilometres; [`align`] shifts one polygon so
//! its centroid lands on another's. Neither mutates its input.

pub mod align;
pub mod area;
pub mod projection;

pub use align::{Offset, align, centroid, offset_between, translate};
pub use area::{measure, planar_area_sq_m};
pub use projection::{project, to_web_mercator};
