//! Box primitive and bounds helpers for the truck backend.
//!
//! truck has no box primitive, so one is built from three translational sweeps.

use truck_modeling::builder;
use truck_modeling::topology::Solid;
use truck_modeling::{Point3, Vector3};

/// Axis-aligned box with its minimum corner at `origin` and positive `extent`.
pub fn make_box(origin: [f64; 3], extent: [f64; 3]) -> Solid {
    let corner = builder::vertex(Point3::from(origin));
    let edge = builder::tsweep(&corner, Vector3::new(extent[0], 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, extent[1], 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, extent[2]))
}

/// Axis-aligned bounds `[xmin, ymin, zmin, xmax, ymax, zmax]` of a set of points.
pub fn point_bounds<I: IntoIterator<Item = Point3>>(points: I) -> Option<[f64; 6]> {
    points.into_iter().fold(None, |acc, p| {
        Some(match acc {
            None => [p.x, p.y, p.z, p.x, p.y, p.z],
            Some(b) => [
                b[0].min(p.x),
                b[1].min(p.y),
                b[2].min(p.z),
                b[3].max(p.x),
                b[4].max(p.y),
                b[5].max(p.z),
            ],
        })
    })
}

/// Bounds of every vertex on a solid's boundary.
pub fn solid_bounds(solid: &Solid) -> Option<[f64; 6]> {
    point_bounds(
        solid
            .boundaries()
            .iter()
            .flat_map(|shell| shell.vertex_iter().map(|v| v.point())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cavity_box_has_six_faces() {
        let solid = make_box([-0.6, -0.6, 0.9], [1.2, 1.2, 1.2]);
        let shells = solid.boundaries();
        assert_eq!(shells.len(), 1);
        assert_eq!(shells[0].face_iter().count(), 6);
    }

    #[test]
    fn test_box_bounds_follow_origin() {
        let solid = make_box([-1.0, 2.0, 0.5], [2.0, 3.0, 4.0]);
        let b = solid_bounds(&solid).unwrap();

        let expected = [-1.0, 2.0, 0.5, 1.0, 5.0, 4.5];
        for i in 0..6 {
            assert!((b[i] - expected[i]).abs() < 1e-10, "bound {i}: {}", b[i]);
        }
    }

    #[test]
    fn test_no_points_no_bounds() {
        assert!(point_bounds(Vec::<Point3>::new()).is_none());
    }
}
