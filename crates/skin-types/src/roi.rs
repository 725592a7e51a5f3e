use serde::{Deserialize, Serialize};

use crate::Point3;

/// Axis-aligned box used both as a simulation region of interest and as a
/// cavity to carve from the slab.
///
/// Serialized as the flat six-value array `[xmin, ymin, zmin, xmax, ymax, zmax]`
/// that downstream BoxROI consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct BoxRoi {
    pub min: Point3,
    pub max: Point3,
}

impl BoxRoi {
    /// Box around `center` with full side `lengths`, grown by `tolerance` on every face.
    pub fn around(center: Point3, lengths: [f64; 3], tolerance: f64) -> Self {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for axis in 0..3 {
            let half = lengths[axis] / 2.0 + tolerance;
            min[axis] = center[axis] - half;
            max[axis] = center[axis] + half;
        }
        Self { min, max }
    }

    /// Side lengths along x, y and z.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn centroid(&self) -> Point3 {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min[0], self.min[1], self.min[2], self.max[0], self.max[1], self.max[2],
        ]
    }
}

impl From<[f64; 6]> for BoxRoi {
    fn from(c: [f64; 6]) -> Self {
        Self {
            min: [c[0], c[1], c[2]],
            max: [c[3], c[4], c[5]],
        }
    }
}

impl From<BoxRoi> for [f64; 6] {
    fn from(b: BoxRoi) -> Self {
        b.to_array()
    }
}

/// One box per center, all sharing the same lengths and tolerance.
pub fn boxes_around(centers: &[Point3], lengths: [f64; 3], tolerance: f64) -> Vec<BoxRoi> {
    centers
        .iter()
        .map(|&c| BoxRoi::around(c, lengths, tolerance))
        .collect()
}
