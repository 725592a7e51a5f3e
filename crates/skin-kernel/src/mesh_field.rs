//! Background mesh-size fields.
//!
//! A `MeshSizing` is plain data: field definitions, the field chosen as the
//! background mesh, and global mesh options. Kernels with a mesher consume it
//! through `Kernel::apply_mesh_sizing`; `size_at` evaluates it directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skin_types::Point3;

use crate::types::KernelError;

/// Identifier of a mesh-size field within one `MeshSizing`.
pub type FieldId = u32;

pub const EXTEND_FROM_BOUNDARY: &str = "Mesh.CharacteristicLengthExtendFromBoundary";
pub const SIZE_FROM_POINTS: &str = "Mesh.CharacteristicLengthFromPoints";
pub const SIZE_FROM_CURVATURE: &str = "Mesh.CharacteristicLengthFromCurvature";

/// Element size `v_in` inside an axis-aligned box and `v_out` outside it,
/// blended linearly over `thickness` beyond the box faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxField {
    pub v_in: f64,
    pub v_out: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub thickness: f64,
}

impl BoxField {
    /// Box field over `[min, max]` with no transition layer.
    pub fn from_bounds(min: Point3, max: Point3, v_in: f64, v_out: f64) -> Self {
        Self {
            v_in,
            v_out,
            x_min: min[0],
            x_max: max[0],
            y_min: min[1],
            y_max: max[1],
            z_min: min[2],
            z_max: max[2],
            thickness: 0.0,
        }
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Euclidean distance from `p` to the box; zero inside.
    pub fn distance(&self, p: Point3) -> f64 {
        let dx = (self.x_min - p[0]).max(0.0).max(p[0] - self.x_max);
        let dy = (self.y_min - p[1]).max(0.0).max(p[1] - self.y_max);
        let dz = (self.z_min - p[2]).max(0.0).max(p[2] - self.z_max);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn size_at(&self, p: Point3) -> f64 {
        let d = self.distance(p);
        if d <= 0.0 {
            self.v_in
        } else if d < self.thickness {
            self.v_in + (self.v_out - self.v_in) * d / self.thickness
        } else {
            self.v_out
        }
    }
}

/// A mesh-size field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Field {
    Box(BoxField),
    /// Pointwise minimum of other fields.
    Min { fields: Vec<FieldId> },
}

/// Complete mesh-size configuration for one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSizing {
    pub fields: BTreeMap<FieldId, Field>,
    pub background: Option<FieldId>,
    pub options: BTreeMap<String, f64>,
}

impl MeshSizing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field under `id`. Ids are unique; a `Min` field may only
    /// reference fields that already exist.
    pub fn add_field(&mut self, id: FieldId, field: Field) -> Result<(), KernelError> {
        if self.fields.contains_key(&id) {
            return Err(KernelError::MeshField {
                reason: format!("field {id} already defined"),
            });
        }
        if let Field::Min { fields } = &field {
            if let Some(missing) = fields.iter().find(|f| !self.fields.contains_key(f)) {
                return Err(KernelError::MeshField {
                    reason: format!("Min field {id} references unknown field {missing}"),
                });
            }
        }
        self.fields.insert(id, field);
        Ok(())
    }

    /// One past the largest id in use, or 1 when there are no fields.
    /// Gaps below the largest id are not reused.
    pub fn next_field_id(&self) -> FieldId {
        self.fields.keys().next_back().map_or(1, |last| last + 1)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(&id)
    }

    pub fn set_background(&mut self, id: FieldId) -> Result<(), KernelError> {
        if !self.fields.contains_key(&id) {
            return Err(KernelError::MeshField {
                reason: format!("background field {id} is not defined"),
            });
        }
        self.background = Some(id);
        Ok(())
    }

    pub fn set_option(&mut self, name: &str, value: f64) {
        self.options.insert(name.to_string(), value);
    }

    pub fn option(&self, name: &str) -> Option<f64> {
        self.options.get(name).copied()
    }

    /// Turn off the mesher's own size heuristics so only the background
    /// field governs element size.
    pub fn disable_size_heuristics(&mut self) {
        self.set_option(EXTEND_FROM_BOUNDARY, 0.0);
        self.set_option(SIZE_FROM_POINTS, 0.0);
        self.set_option(SIZE_FROM_CURVATURE, 0.0);
    }

    /// Target element size at `p` according to the background field.
    pub fn size_at(&self, p: Point3) -> Option<f64> {
        self.background.and_then(|id| self.eval(id, p))
    }

    fn eval(&self, id: FieldId, p: Point3) -> Option<f64> {
        match self.fields.get(&id)? {
            Field::Box(b) => Some(b.size_at(p)),
            Field::Min { fields } => fields
                .iter()
                .filter_map(|f| self.eval(*f, p))
                .reduce(f64::min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(v_in: f64, v_out: f64) -> BoxField {
        BoxField::from_bounds([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], v_in, v_out)
    }

    #[test]
    fn test_box_field_inside_and_outside() {
        let b = unit_box(0.1, 5.0);
        assert_eq!(b.size_at([0.5, 0.5, 0.5]), 0.1);
        assert_eq!(b.size_at([1.0, 1.0, 1.0]), 0.1);
        assert_eq!(b.size_at([2.0, 0.5, 0.5]), 5.0);
    }

    #[test]
    fn test_box_field_thickness_blends_linearly() {
        let b = unit_box(1.0, 3.0).with_thickness(2.0);
        let s = b.size_at([2.0, 0.5, 0.5]);
        assert!((s - 2.0).abs() < 1e-12, "halfway through the layer, got {s}");
        assert_eq!(b.size_at([3.5, 0.5, 0.5]), 3.0);
    }

    #[test]
    fn test_min_field_takes_smallest() {
        let mut sizing = MeshSizing::new();
        sizing.add_field(1, Field::Box(unit_box(1.0, 10.0))).unwrap();
        let fine = BoxField::from_bounds([0.4, 0.4, 0.4], [0.6, 0.6, 0.6], 0.2, 0.9);
        sizing.add_field(2, Field::Box(fine)).unwrap();
        sizing.add_field(3, Field::Min { fields: vec![1, 2] }).unwrap();
        sizing.set_background(3).unwrap();

        assert_eq!(sizing.size_at([0.5, 0.5, 0.5]), Some(0.2));
        assert_eq!(sizing.size_at([0.1, 0.1, 0.1]), Some(0.9));
        assert_eq!(sizing.size_at([5.0, 5.0, 5.0]), Some(0.9));
    }

    #[test]
    fn test_duplicate_and_dangling_fields_rejected() {
        let mut sizing = MeshSizing::new();
        sizing.add_field(1, Field::Box(unit_box(1.0, 2.0))).unwrap();
        assert!(sizing.add_field(1, Field::Box(unit_box(1.0, 2.0))).is_err());
        assert!(sizing.add_field(2, Field::Min { fields: vec![1, 7] }).is_err());
        assert!(sizing.set_background(9).is_err());
        assert_eq!(sizing.next_field_id(), 2);
    }

    #[test]
    fn test_next_field_id_skips_past_gaps() {
        let mut sizing = MeshSizing::new();
        assert_eq!(sizing.next_field_id(), 1);
        sizing.add_field(4, Field::Box(unit_box(1.0, 2.0))).unwrap();
        assert_eq!(sizing.next_field_id(), 5);
    }

    #[test]
    fn test_no_background_means_no_size() {
        let mut sizing = MeshSizing::new();
        sizing.add_field(1, Field::Box(unit_box(1.0, 2.0))).unwrap();
        assert_eq!(sizing.size_at([0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_disable_size_heuristics_sets_three_options() {
        let mut sizing = MeshSizing::new();
        sizing.disable_size_heuristics();
        assert_eq!(sizing.option(EXTEND_FROM_BOUNDARY), Some(0.0));
        assert_eq!(sizing.option(SIZE_FROM_POINTS), Some(0.0));
        assert_eq!(sizing.option(SIZE_FROM_CURVATURE), Some(0.0));
        assert_eq!(sizing.options.len(), 3);
    }
}
