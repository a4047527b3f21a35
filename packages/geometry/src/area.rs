//! Projected area measurement.

use geo::{Area, MultiPolygon};

use crate::projection::project;

const SQ_M_PER_SQ_KM: f64 = 1_000_000.0;

/// Unsigned planar area of a boundary in its own coordinate units squared.
///
/// Holes are subtracted; parts are summed regardless of ring orientation.
#[must_use]
pub fn planar_area_sq_m(boundary: &MultiPolygon<f64>) -> f64 {
    boundary.unsigned_area()
}

/// Measures a longitude/latitude boundary in square kilometres after
/// projecting it to web mercator, rounded to two decimal places.
///
/// Empty boundaries measure `0.0`.
#[must_use]
pub fn measure(boundary: &MultiPolygon<f64>) -> f64 {
    let sq_km = planar_area_sq_m(&project(boundary)) / SQ_M_PER_SQ_KM;
    if !sq_km.is_finite() {
        log::warn!("Non-finite projected area; treating boundary as empty");
        return 0.0;
    }
    round_to_hundredths(sq_km)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use geo::{Translate, polygon};

    use super::*;

    fn degree_square(lon: f64, lat: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: lon, y: lat),
            (x: lon + 1.0, y: lat),
            (x: lon + 1.0, y: lat + 1.0),
            (x: lon, y: lat + 1.0),
            (x: lon, y: lat),
        ]])
    }

    #[test]
    fn equatorial_degree_square() {
        let area = measure(&degree_square(0.0, 0.0));
        assert!((area - 12_392.66).abs() < 0.01, "got {area}");
    }

    #[test]
    fn high_latitudes_are_inflated() {
        let equator = measure(&degree_square(0.0, 0.0));
        let north = measure(&degree_square(0.0, 60.0));
        assert!((north - 25_167.70).abs() < 0.01, "got {north}");
        assert!(north > equator);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let area = measure(&degree_square(10.0, 45.0));
        assert!(((area * 100.0).round() - area * 100.0).abs() < 1e-6);
    }

    #[test]
    fn empty_boundary_measures_zero() {
        assert!(measure(&MultiPolygon(vec![])).abs() < f64::EPSILON);
    }

    #[test]
    fn holes_are_subtracted() {
        let with_hole = MultiPolygon(vec![polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 4.0, y: 0.0),
                (x: 4.0, y: 4.0),
                (x: 0.0, y: 4.0),
                (x: 0.0, y: 0.0),
            ],
            interiors: [[
                (x: 1.0, y: 1.0),
                (x: 2.0, y: 1.0),
                (x: 2.0, y: 2.0),
                (x: 1.0, y: 2.0),
                (x: 1.0, y: 1.0),
            ]],
        )]);
        assert!((planar_area_sq_m(&with_hole) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn planar_area_is_translation_invariant() {
        let projected = project(&degree_square(2.0, 48.0));
        let moved = projected.translate(123_456.0, -654_321.0);
        let before = planar_area_sq_m(&projected);
        let after = planar_area_sq_m(&moved);
        assert!((before - after).abs() / before < 1e-9);
    }

    #[test]
    fn measure_is_invariant_under_longitude_shift() {
        let paris = degree_square(2.0, 48.0);
        let shifted = paris.translate(-5.7, 0.0);
        assert!((measure(&paris) - measure(&shifted)).abs() < 0.011);
    }

    #[test]
    fn measure_does_not_mutate_input() {
        let boundary = degree_square(2.0, 48.0);
        let copy = boundary.clone();
        let _ = measure(&boundary);
        assert_eq!(boundary, copy);
    }
}
