//! TruckKernel: real geometry kernel wrapping truck's API.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Solid, Vertex, Wire};
use truck_modeling::{InnerSpace, Point3, Vector3};
use truck_stepio::out;

use crate::primitives;
use crate::traits::Kernel;
use crate::types::*;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    vertices: BTreeMap<Tag, Vertex>,
    edges: BTreeMap<Tag, Edge>,
    wires: BTreeMap<Tag, Wire>,
    faces: BTreeMap<Tag, Face>,
    solids: BTreeMap<Tag, Solid>,
    synced: BTreeSet<DimTag>,
    /// Tolerance handed to truck-shapeops boolean operations.
    pub boolean_tolerance: f64,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
            wires: BTreeMap::new(),
            faces: BTreeMap::new(),
            solids: BTreeMap::new(),
            synced: BTreeSet::new(),
            boolean_tolerance: 0.05,
        }
    }

    fn next_tag<T>(map: &BTreeMap<Tag, T>) -> Tag {
        map.keys().next_back().map_or(1, |t| t + 1)
    }

    fn store_solid(&mut self, solid: Solid) -> Tag {
        let tag = Self::next_tag(&self.solids);
        self.solids.insert(tag, solid);
        tag
    }

    pub fn solid(&self, tag: Tag) -> Result<&Solid, KernelError> {
        self.solids
            .get(&tag)
            .ok_or(KernelError::EntityNotFound(DimTag::volume(tag)))
    }

    /// Serialize one solid as a STEP AP203 document.
    pub fn export_step(&self, tag: Tag) -> Result<String, KernelError> {
        let compressed = self.solid(tag)?.compress();
        let display = out::CompleteStepDisplay::new(
            out::StepModel::from(&compressed),
            out::StepHeaderDescriptor {
                organization_system: "magnetic-skin".to_owned(),
                ..Default::default()
            },
        );
        Ok(display.to_string())
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Newell normal of a face's outer boundary (unnormalized).
fn face_normal(face: &Face) -> Vector3 {
    let Some(outer) = face.boundaries().into_iter().next() else {
        return Vector3::new(0.0, 0.0, 0.0);
    };
    let pts: Vec<Point3> = outer.vertex_iter().map(|v| v.point()).collect();
    let mut n = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}

/// Whether `inner` lies strictly inside `outer` on every axis.
fn encloses(outer: &[f64; 6], inner: &[f64; 6]) -> bool {
    (0..3).all(|i| inner[i] > outer[i] && inner[i + 3] < outer[i + 3])
}

impl Kernel for TruckKernel {
    fn add_point(&mut self, x: f64, y: f64, z: f64) -> Result<Tag, KernelError> {
        let tag = Self::next_tag(&self.vertices);
        self.vertices
            .insert(tag, builder::vertex(Point3::new(x, y, z)));
        Ok(tag)
    }

    fn add_line(&mut self, start: Tag, end: Tag) -> Result<Tag, KernelError> {
        let lookup = |t: Tag| {
            self.vertices
                .get(&t)
                .ok_or(KernelError::EntityNotFound(DimTag::new(Dim::Point, t)))
        };
        let (v0, v1) = (lookup(start)?, lookup(end)?);
        if (v0.point() - v1.point()).magnitude() < 1e-12 {
            return Err(KernelError::InvalidGeometry {
                reason: format!("line {start}-{end} has zero length"),
            });
        }
        let edge = builder::line(v0, v1);
        let tag = Self::next_tag(&self.edges);
        self.edges.insert(tag, edge);
        Ok(tag)
    }

    fn add_wire(&mut self, curves: &[Tag]) -> Result<Tag, KernelError> {
        let edges = curves
            .iter()
            .map(|c| {
                self.edges
                    .get(c)
                    .cloned()
                    .ok_or(KernelError::EntityNotFound(DimTag::new(Dim::Curve, *c)))
            })
            .collect::<Result<Vec<Edge>, _>>()?;
        let wire = Wire::from_iter(edges);
        if !wire.is_continuous() {
            return Err(KernelError::InvalidGeometry {
                reason: "wire curves are not connected".to_string(),
            });
        }
        let tag = Self::next_tag(&self.wires);
        self.wires.insert(tag, wire);
        Ok(tag)
    }

    fn add_plane_surface(&mut self, wires: &[Tag]) -> Result<Tag, KernelError> {
        let loops = wires
            .iter()
            .map(|w| {
                self.wires.get(w).cloned().ok_or(KernelError::InvalidGeometry {
                    reason: format!("wire {w} does not exist"),
                })
            })
            .collect::<Result<Vec<Wire>, _>>()?;
        let face = builder::try_attach_plane(&loops).map_err(|e| KernelError::InvalidGeometry {
            reason: format!("failed to create planar face: {e}"),
        })?;
        let tag = Self::next_tag(&self.faces);
        self.faces.insert(tag, face);
        Ok(tag)
    }

    fn extrude(
        &mut self,
        entities: &[DimTag],
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Vec<DimTag>, KernelError> {
        let sweep = Vector3::new(dx, dy, dz);
        let mut out = Vec::new();
        for &dt in entities {
            let tag = expect_dim(dt, Dim::Surface)?;
            let face = self
                .faces
                .get(&tag)
                .cloned()
                .ok_or(KernelError::EntityNotFound(dt))?;

            let normal = face_normal(&face);
            if normal.dot(sweep).abs() < 1e-12 * normal.magnitude().max(1.0) {
                debug!(?dt, "extrusion parallel to surface sweeps no volume");
                continue;
            }

            let solid: Solid = builder::tsweep(&face, sweep);
            let vol = self.store_solid(solid);
            out.push(DimTag::volume(vol));
        }
        Ok(out)
    }

    fn add_box(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Tag, KernelError> {
        if dx == 0.0 || dy == 0.0 || dz == 0.0 {
            return Err(KernelError::InvalidGeometry {
                reason: format!("box extents ({dx}, {dy}, {dz}) must be non-zero"),
            });
        }
        let origin = [x.min(x + dx), y.min(y + dy), z.min(z + dz)];
        let solid = primitives::make_box(origin, [dx.abs(), dy.abs(), dz.abs()]);
        Ok(self.store_solid(solid))
    }

    fn cut(&mut self, objects: &[DimTag], tools: &[DimTag]) -> Result<Vec<DimTag>, KernelError> {
        let mut negated = Vec::with_capacity(tools.len());
        for &t in tools {
            let tool = self.solid(expect_dim(t, Dim::Volume)?)?;
            let bounds = primitives::solid_bounds(tool).ok_or(KernelError::EntityNotFound(t))?;
            let mut solid = tool.clone();
            // Subtraction = A ∩ ¬B. not() mutates in place.
            solid.not();
            negated.push((t, bounds, solid));
        }

        // truck-shapeops needs the tool boundary to cross the object's
        // boundary; a fully enclosed void makes it panic. Check every pair
        // before touching the model.
        for &o in objects {
            let tag = expect_dim(o, Dim::Volume)?;
            let outer =
                primitives::solid_bounds(self.solid(tag)?).ok_or(KernelError::EntityNotFound(o))?;
            if let Some((t, _, _)) = negated.iter().find(|(_, inner, _)| encloses(&outer, inner)) {
                return Err(KernelError::NotSupported {
                    operation: format!("enclosed cavity cut of {t:?} from volume {tag}"),
                });
            }
        }

        let mut result = Vec::new();
        for &o in objects {
            let tag = expect_dim(o, Dim::Volume)?;
            let mut current = self.solid(tag)?.clone();
            for (_, _, tool) in &negated {
                current = truck_shapeops::and(&current, tool, self.boolean_tolerance).ok_or_else(
                    || KernelError::BooleanFailed {
                        reason: format!("truck and() returned None cutting volume {tag}"),
                    },
                )?;
            }
            self.solids.insert(tag, current);
            result.push(o);
        }

        for t in tools {
            if !objects.contains(t) {
                self.solids.remove(&t.tag);
                self.synced.remove(t);
            }
        }
        Ok(result)
    }

    fn synchronize(&mut self) -> Result<(), KernelError> {
        let mut synced = BTreeSet::new();
        synced.extend(self.vertices.keys().map(|t| DimTag::new(Dim::Point, *t)));
        synced.extend(self.edges.keys().map(|t| DimTag::new(Dim::Curve, *t)));
        synced.extend(self.faces.keys().map(|t| DimTag::surface(*t)));
        synced.extend(self.solids.keys().map(|t| DimTag::volume(*t)));
        self.synced = synced;
        Ok(())
    }

    fn entities(&self, dim: Dim) -> Vec<DimTag> {
        self.synced.iter().filter(|dt| dt.dim == dim).copied().collect()
    }

    fn bounding_box(&self, entity: DimTag) -> Result<[f64; 6], KernelError> {
        let missing = || KernelError::EntityNotFound(entity);
        let bounds = match entity.dim {
            Dim::Point => {
                let v = self.vertices.get(&entity.tag).ok_or_else(missing)?;
                primitives::point_bounds([v.point()])
            }
            Dim::Curve => {
                let e = self.edges.get(&entity.tag).ok_or_else(missing)?;
                primitives::point_bounds([e.front().point(), e.back().point()])
            }
            Dim::Surface => {
                let f = self.faces.get(&entity.tag).ok_or_else(missing)?;
                primitives::point_bounds(
                    f.boundaries()
                        .iter()
                        .flat_map(|w| w.vertex_iter().map(|v| v.point()))
                        .collect::<Vec<_>>(),
                )
            }
            Dim::Volume => primitives::solid_bounds(self.solid(entity.tag)?),
        };
        bounds.ok_or_else(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle(kernel: &mut TruckKernel, w: f64, h: f64) -> Tag {
        let p = [
            kernel.add_point(w / 2.0, h / 2.0, 0.0).unwrap(),
            kernel.add_point(-w / 2.0, h / 2.0, 0.0).unwrap(),
            kernel.add_point(-w / 2.0, -h / 2.0, 0.0).unwrap(),
            kernel.add_point(w / 2.0, -h / 2.0, 0.0).unwrap(),
        ];
        let lines: Vec<Tag> = (0..4)
            .map(|i| kernel.add_line(p[i], p[(i + 1) % 4]).unwrap())
            .collect();
        let wire = kernel.add_wire(&lines).unwrap();
        kernel.add_plane_surface(&[wire]).unwrap()
    }

    #[test]
    fn test_truck_kernel_rectangle_extrudes_to_six_faces() {
        let mut kernel = TruckKernel::new();
        let surf = rectangle(&mut kernel, 4.0, 2.0);
        let out = kernel
            .extrude(&[DimTag::surface(surf)], 0.0, 0.0, 3.0)
            .unwrap();

        assert_eq!(out.len(), 1);
        let solid = kernel.solid(out[0].tag).unwrap();
        let shell = &solid.boundaries()[0];
        assert_eq!(shell.face_iter().count(), 6, "Extruded rectangle should have 6 faces");

        kernel.synchronize().unwrap();
        let b = kernel.bounding_box(out[0]).unwrap();
        let expected = [-2.0, -1.0, 0.0, 2.0, 1.0, 3.0];
        for i in 0..6 {
            assert!((b[i] - expected[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_truck_kernel_in_plane_extrude_has_no_volume() {
        let mut kernel = TruckKernel::new();
        let surf = rectangle(&mut kernel, 4.0, 2.0);
        let out = kernel
            .extrude(&[DimTag::surface(surf)], 1.0, 0.0, 0.0)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_truck_kernel_box_bounds() {
        let mut kernel = TruckKernel::new();
        let b = kernel.add_box(1.0, 1.0, 1.0, -1.0, 2.0, 0.5).unwrap();
        let bb = kernel.bounding_box(DimTag::volume(b)).unwrap();
        let expected = [0.0, 1.0, 1.0, 1.0, 3.0, 1.5];
        for i in 0..6 {
            assert!((bb[i] - expected[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_truck_kernel_zero_length_line_rejected() {
        let mut kernel = TruckKernel::new();
        let a = kernel.add_point(0.0, 0.0, 0.0).unwrap();
        let b = kernel.add_point(0.0, 0.0, 0.0).unwrap();
        assert!(kernel.add_line(a, b).is_err());
    }

    #[test]
    fn test_truck_kernel_step_export_mentions_solid() {
        let mut kernel = TruckKernel::new();
        let b = kernel.add_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
        let step = kernel.export_step(b).unwrap();
        assert!(step.contains("ISO-10303-21"));
        assert!(step.contains("END-ISO-10303-21"));
    }

    #[test]
    fn test_truck_kernel_cuts_pocket_through_top() {
        let mut kernel = TruckKernel::new();
        let base = kernel.add_box(0.0, 0.0, 0.0, 4.0, 4.0, 2.0).unwrap();
        let pocket = kernel.add_box(1.0, 1.0, 1.0, 2.0, 2.0, 2.0).unwrap();
        let out = kernel
            .cut(&[DimTag::volume(base)], &[DimTag::volume(pocket)])
            .unwrap();
        kernel.synchronize().unwrap();

        assert_eq!(out, vec![DimTag::volume(base)]);
        assert_eq!(kernel.entities(Dim::Volume), out);
        assert_eq!(kernel.solid(base).unwrap().boundaries().len(), 1);
        let bb = kernel.bounding_box(out[0]).unwrap();
        let expected = [0.0, 0.0, 0.0, 4.0, 4.0, 2.0];
        for i in 0..6 {
            assert!((bb[i] - expected[i]).abs() < 1e-9, "{bb:?}");
        }
    }

    #[test]
    fn test_truck_kernel_enclosed_cavity_is_not_supported() {
        let mut kernel = TruckKernel::new();
        let base = kernel.add_box(0.0, 0.0, 0.0, 4.0, 4.0, 3.0).unwrap();
        let cavity = kernel.add_box(1.0, 1.0, 0.9, 1.2, 1.2, 1.2).unwrap();
        let err = kernel
            .cut(&[DimTag::volume(base)], &[DimTag::volume(cavity)])
            .unwrap_err();
        assert!(matches!(err, KernelError::NotSupported { .. }));

        // Nothing consumed on failure.
        assert!(kernel.solid(cavity).is_ok());
        assert_eq!(kernel.solid(base).unwrap().boundaries()[0].face_iter().count(), 6);
    }

    #[test]
    fn test_encloses_is_strict() {
        let outer = [0.0, 0.0, 0.0, 4.0, 4.0, 2.0];
        assert!(encloses(&outer, &[1.0, 1.0, 0.5, 2.0, 2.0, 1.5]));
        assert!(!encloses(&outer, &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0]));
        assert!(!encloses(&outer, &[1.0, 1.0, 1.0, 2.0, 2.0, 3.0]));
    }
}
