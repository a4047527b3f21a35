//! Centroid alignment of one boundary onto another.
//!
//! Offsets are computed in longitude/latitude, the same space the map
//! displays, so the translated outline sits visually on top of the
//! reference city.

use geo::{Centroid, MultiPolygon, Point, Translate};

/// Per-axis shift in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    /// Longitude shift.
    pub dx: f64,
    /// Latitude shift.
    pub dy: f64,
}

/// Geometric centroid of a boundary, or `None` if it is empty.
#[must_use]
pub fn centroid(boundary: &MultiPolygon<f64>) -> Option<Point<f64>> {
    boundary.centroid()
}

/// Offset that moves `target`'s centroid onto `reference`'s.
#[must_use]
pub fn offset_between(
    reference: &MultiPolygon<f64>,
    target: &MultiPolygon<f64>,
) -> Option<Offset> {
    let reference = centroid(reference)?;
    let target = centroid(target)?;
    Some(Offset {
        dx: reference.x() - target.x(),
        dy: reference.y() - target.y(),
    })
}

/// Returns a copy of `boundary` with every vertex shifted by `offset`.
#[must_use]
pub fn translate(boundary: &MultiPolygon<f64>, offset: Offset) -> MultiPolygon<f64> {
    boundary.translate(offset.dx, offset.dy)
}

/// Returns `target` moved so that its centroid coincides with
/// `reference`'s. `None` if either boundary is empty.
#[must_use]
pub fn align(reference: &MultiPolygon<f64>, target: &MultiPolygon<f64>) -> Option<MultiPolygon<f64>> {
    let offset = offset_between(reference, target)?;
    log::debug!("Aligning boundary by ({:.5}, {:.5})", offset.dx, offset.dy);
    Some(translate(target, offset))
}

#[cfg(test)]
mod tests {
    use geo::{Area, polygon};

    use super::*;

    fn rectangle(x: f64, y: f64, w: f64, h: f64) -> geo::Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + w, y: y),
            (x: x + w, y: y + h),
            (x: x, y: y + h),
            (x: x, y: y),
        ]
    }

    fn paris_like() -> MultiPolygon<f64> {
        MultiPolygon(vec![rectangle(2.25, 48.81, 0.17, 0.09)])
    }

    fn madrid_like() -> MultiPolygon<f64> {
        MultiPolygon(vec![
            rectangle(-3.83, 40.31, 0.3, 0.2),
            rectangle(-3.4, 40.6, 0.05, 0.05),
        ])
    }

    #[test]
    fn aligned_centroid_matches_reference() {
        let reference = paris_like();
        let aligned = align(&reference, &madrid_like()).unwrap();

        let expected = centroid(&reference).unwrap();
        let actual = centroid(&aligned).unwrap();
        assert!((expected.x() - actual.x()).abs() < 1e-9);
        assert!((expected.y() - actual.y()).abs() < 1e-9);
    }

    #[test]
    fn aligned_is_congruent_to_target() {
        let target = madrid_like();
        let aligned = align(&paris_like(), &target).unwrap();

        assert_eq!(aligned.0.len(), target.0.len());
        assert!((aligned.unsigned_area() - target.unsigned_area()).abs() < 1e-9);

        let offset = offset_between(&paris_like(), &target).unwrap();
        for (moved, original) in aligned.0.iter().zip(&target.0) {
            assert_eq!(moved.interiors().len(), original.interiors().len());
            for (a, b) in moved.exterior().coords().zip(original.exterior().coords()) {
                assert!((a.x - b.x - offset.dx).abs() < 1e-9);
                assert!((a.y - b.y - offset.dy).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn target_is_not_mutated() {
        let target = madrid_like();
        let copy = target.clone();
        let _ = align(&paris_like(), &target);
        assert_eq!(target, copy);
    }

    #[test]
    fn interiors_are_preserved() {
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
        let moved = translate(&with_hole, Offset { dx: 10.0, dy: -3.0 });
        assert_eq!(moved.0[0].interiors().len(), 1);
        let first = moved.0[0].interiors()[0].0[0];
        assert!((first.x - 11.0).abs() < 1e-12);
        assert!((first.y + 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_boundary_cannot_be_aligned() {
        let empty = MultiPolygon::<f64>(vec![]);
        assert!(centroid(&empty).is_none());
        assert!(align(&paris_like(), &empty).is_none());
        assert!(align(&empty, &paris_like()).is_none());
    }

    #[test]
    fn self_alignment_is_identity() {
        let boundary = paris_like();
        let offset = offset_between(&boundary, &boundary).unwrap();
        assert!(offset.dx.abs() < 1e-12);
        assert!(offset.dy.abs() < 1e-12);
    }
}
