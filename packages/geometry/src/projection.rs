//! Spherical web mercator (EPSG:3857) forward projection.
//!
//! Web mercator inflates areas by `1 / cos²(latitude)`. For comparing two
//! cities that is an accepted approximation; do not "fix" it here.

use geo::{Coord, MapCoords, MultiPolygon};

/// WGS84 semi-major axis used by EPSG:3857, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude at which web mercator becomes square; inputs are clamped to it.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Projects a single longitude/latitude coordinate to web mercator metres.
#[must_use]
pub fn to_web_mercator(coord: Coord<f64>) -> Coord<f64> {
    let lat = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    Coord {
        x: EARTH_RADIUS_M * coord.x.to_radians(),
        y: EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln(),
    }
}

/// Projects every vertex of a boundary to web mercator.
#[must_use]
pub fn project(boundary: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    boundary.map_coords(to_web_mercator)
}
