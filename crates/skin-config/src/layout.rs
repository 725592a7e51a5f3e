//! Layout derivation: grids, centers, rigid-object grouping, ROI boxes and
//! sensor zones.
//!
//! Ordering contract with the downstream simulation: `rigid_objects[i]`,
//! `rigid_object_rois[i]` and object index `i` in `index_pairs` all refer to
//! the same object. Index 0 is the articulation anchor; magnets follow in
//! grid order.

use serde::{Deserialize, Serialize};
use skin_types::{boxes_around, BoxRoi, Point2, Point3};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::grid::generate_grid;
use crate::mask::Mask;
use crate::params::SkinParameters;

/// Rigid group holding the articulation anchor alone.
pub const ANCHOR_GROUP: usize = 0;
/// Rigid group holding every magnet.
pub const MAGNET_GROUP: usize = 1;

/// Zone of a sensor: `0` when its x exceeds `tolerance`, else `1`.
pub fn sensor_zone(x: f64, tolerance: f64) -> usize {
    if x > tolerance {
        0
    } else {
        1
    }
}

/// Every artifact derived from one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub magnet_grid: Vec<Point2>,
    pub sensor_grid: Vec<Point2>,
    /// Kept magnet positions at `z = +height/2`.
    pub magnet_centers: Vec<Point3>,
    /// Sensor positions at `z = -height/2`.
    pub sensor_centers: Vec<Point3>,
    pub articulation_center: Point3,
    /// Articulation anchor followed by every magnet center.
    pub rigid_objects: Vec<Point3>,
    /// Flat `[group, index, group, index, ...]` pairs: `[0, 1]` for the
    /// anchor, then `[1, i]` for magnet `i`.
    pub index_pairs: Vec<usize>,
    /// Fixed-support boundary region.
    pub fix_roi: BoxRoi,
    pub articulation_roi: BoxRoi,
    /// One cube per magnet; also the cavities carved from the slab.
    pub magnet_rois: Vec<BoxRoi>,
    /// Articulation ROI followed by the magnet ROIs, aligned with `rigid_objects`.
    pub rigid_object_rois: Vec<BoxRoi>,
    /// Zone per sensor center, see [`sensor_zone`].
    pub sensor_zones: Vec<usize>,
}

impl Layout {
    pub fn derive(params: &SkinParameters, mask: &Mask) -> Result<Self, ConfigError> {
        let p = params;
        let tol = p.box_tolerance;

        let magnet_grid = generate_grid(
            p.length,
            p.width,
            p.grid_margin,
            p.grid_rows_magnets,
            p.grid_cols_magnets,
        );
        let sensor_grid = generate_grid(
            p.length,
            p.width,
            p.grid_margin,
            p.grid_rows_sensors,
            p.grid_cols_sensors,
        );

        let magnet_centers: Vec<Point3> = mask
            .select(&magnet_grid, p.grid_rows_magnets, p.grid_cols_magnets)?
            .into_iter()
            .map(|[x, y]| [x, y, p.height / 2.0])
            .collect();
        let sensor_centers: Vec<Point3> = sensor_grid
            .iter()
            .map(|&[x, y]| [x, y, -p.height / 2.0])
            .collect();

        let articulation_center = [-p.length / 4.0, 0.0, 0.0];
        let mut rigid_objects = Vec::with_capacity(magnet_centers.len() + 1);
        rigid_objects.push(articulation_center);
        rigid_objects.extend_from_slice(&magnet_centers);

        let mut index_pairs = vec![ANCHOR_GROUP, 1];
        for i in 0..magnet_centers.len() {
            index_pairs.extend([MAGNET_GROUP, i]);
        }

        let fix_roi = BoxRoi::around(
            [p.length / 3.5, 0.0, 0.0],
            [p.length / 2.3, p.width, tol],
            tol,
        );
        let articulation_roi =
            BoxRoi::around(articulation_center, [p.length / 2.0, p.width, tol], tol);
        let side = p.magnet_side;
        let magnet_rois = boxes_around(&magnet_centers, [side, side, side], tol);

        let mut rigid_object_rois = Vec::with_capacity(magnet_rois.len() + 1);
        rigid_object_rois.push(articulation_roi);
        rigid_object_rois.extend_from_slice(&magnet_rois);

        let sensor_zones = sensor_centers
            .iter()
            .map(|c| sensor_zone(c[0], tol))
            .collect();

        info!(
            magnets = magnet_centers.len(),
            sensors = sensor_centers.len(),
            rois = rigid_object_rois.len(),
            "derived magnetic skin layout"
        );
        debug!(?magnet_grid, ?magnet_rois, "magnet layout");

        Ok(Self {
            magnet_grid,
            sensor_grid,
            magnet_centers,
            sensor_centers,
            articulation_center,
            rigid_objects,
            index_pairs,
            fix_roi,
            articulation_roi,
            magnet_rois,
            rigid_object_rois,
            sensor_zones,
        })
    }

    pub fn magnet_count(&self) -> usize {
        self.magnet_centers.len()
    }

    /// `index_pairs` as `(group, index)` tuples.
    pub fn group_pairs(&self) -> Vec<(usize, usize)> {
        self.index_pairs
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// Magnet cavities as flat six-value boxes, the shape the generator takes.
    pub fn magnet_box_coords(&self) -> Vec<[f64; 6]> {
        self.magnet_rois.iter().map(BoxRoi::to_array).collect()
    }

    /// Indices of the sensors in `zone`.
    pub fn sensors_in_zone(&self, zone: usize) -> Vec<usize> {
        self.sensor_zones
            .iter()
            .enumerate()
            .filter(|(_, z)| **z == zone)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sensor_zone_boundary_is_exclusive() {
        let tol = 0.1;
        assert_eq!(sensor_zone(tol + 1e-9, tol), 0);
        assert_eq!(sensor_zone(-1.0, tol), 1);
        assert_eq!(sensor_zone(tol, tol), 1);
    }

    #[test]
    fn test_default_layout_counts() {
        let p = SkinParameters::default();
        let layout = Layout::derive(&p, &p.effective_mask()).unwrap();

        assert_eq!(layout.magnet_count(), 6);
        assert_eq!(layout.magnet_rois.len(), 6);
        assert_eq!(layout.rigid_objects.len(), 7);
        assert_eq!(layout.rigid_object_rois.len(), 7);
        assert_eq!(layout.index_pairs.len(), 14);
        assert_eq!(layout.sensor_centers.len(), 6);
    }

    #[test]
    fn test_index_pairs_encoding() {
        let p = SkinParameters::default();
        let layout = Layout::derive(&p, &p.effective_mask()).unwrap();
        assert_eq!(
            layout.index_pairs,
            vec![0, 1, 1, 0, 1, 1, 1, 2, 1, 3, 1, 4, 1, 5]
        );
        assert_eq!(layout.group_pairs()[0], (0, 1));
        assert_eq!(layout.group_pairs()[6], (1, 5));
    }

    #[test]
    fn test_centers_sit_on_slab_faces() {
        let p = SkinParameters::default();
        let layout = Layout::derive(&p, &p.effective_mask()).unwrap();
        assert!(layout.magnet_centers.iter().all(|c| approx(c[2], 1.5)));
        assert!(layout.sensor_centers.iter().all(|c| approx(c[2], -1.5)));
        assert_eq!(layout.rigid_objects[0], [-10.0, 0.0, 0.0]);
        assert_eq!(&layout.rigid_objects[1..], &layout.magnet_centers[..]);
    }

    #[test]
    fn test_roi_values() {
        let p = SkinParameters::default();
        let layout = Layout::derive(&p, &p.effective_mask()).unwrap();

        // Articulation: center (-10, 0, 0), lengths (20, 20, 0.1), tol 0.1.
        let a = layout.articulation_roi.to_array();
        let expected = [-20.1, -10.1, -0.15, 0.1, 10.1, 0.15];
        for i in 0..6 {
            assert!(approx(a[i], expected[i]), "articulation[{i}] = {}", a[i]);
        }

        // First magnet at (-15, -5, 1.5), cube side 1 + tol.
        let m = layout.magnet_rois[0].to_array();
        let expected = [-15.6, -5.6, 0.9, -14.4, -4.4, 2.1];
        for i in 0..6 {
            assert!(approx(m[i], expected[i]), "magnet[{i}] = {}", m[i]);
        }

        let f = layout.fix_roi.centroid();
        assert!(approx(f[0], 40.0 / 3.5));
        assert!(approx(layout.fix_roi.extent()[0], 40.0 / 2.3 + 0.2));

        assert_eq!(layout.rigid_object_rois[0], layout.articulation_roi);
        assert_eq!(&layout.rigid_object_rois[1..], &layout.magnet_rois[..]);
    }

    #[test]
    fn test_default_sensor_zones() {
        let p = SkinParameters::default();
        let layout = Layout::derive(&p, &p.effective_mask()).unwrap();
        // Sensor x: -15, 0, 15 per row.
        assert_eq!(layout.sensor_zones, vec![1, 1, 0, 1, 1, 0]);
        assert_eq!(layout.sensors_in_zone(0), vec![2, 5]);
    }

    #[test]
    fn test_masked_magnets_shrink_groupings() {
        let p = SkinParameters::default();
        let mask = Mask::from_rows(vec![vec![true, false, false], vec![false, false, true]]).unwrap();
        let layout = Layout::derive(&p, &mask).unwrap();

        assert_eq!(layout.magnet_count(), 2);
        assert_eq!(layout.rigid_objects.len(), 3);
        assert_eq!(layout.index_pairs, vec![0, 1, 1, 0, 1, 1]);
        assert_eq!(layout.magnet_centers[1], [15.0, 5.0, 1.5]);
    }

    #[test]
    fn test_empty_mask_leaves_only_anchor() {
        let p = SkinParameters::default();
        let mask = Mask::from_rows(vec![vec![false; 3]; 2]).unwrap();
        let layout = Layout::derive(&p, &mask).unwrap();
        assert_eq!(layout.rigid_objects.len(), 1);
        assert_eq!(layout.index_pairs, vec![0, 1]);
        assert!(layout.magnet_box_coords().is_empty());
    }

    #[test]
    fn test_mismatched_mask_is_an_error() {
        let p = SkinParameters::default();
        let err = Layout::derive(&p, &Mask::ones(3, 3)).unwrap_err();
        assert!(matches!(err, ConfigError::MaskShape { .. }));
    }
}
