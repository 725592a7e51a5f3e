//! MockKernel: deterministic test double implementing Kernel.
//!
//! Tracks entities by `(dim, tag)` and models every volume as an axis-aligned
//! box with a list of cavities, so bounding boxes and volumes are exact.
//! Only axis-aligned planar profiles are supported.

use std::collections::{BTreeMap, BTreeSet};

use skin_types::BoxRoi;

use crate::mesh_field::MeshSizing;
use crate::traits::Kernel;
use crate::types::*;

#[derive(Debug, Clone)]
enum MockEntity {
    Point([f64; 3]),
    Line { start: Tag, end: Tag },
    Surface { bounds: BoxRoi, edge_count: usize },
    Volume(MockVolume),
}

#[derive(Debug, Clone)]
struct MockVolume {
    bounds: BoxRoi,
    cavities: Vec<BoxRoi>,
}

/// Deterministic in-memory kernel.
pub struct MockKernel {
    entities: BTreeMap<DimTag, MockEntity>,
    /// Wires have their own tag space, outside the model entities.
    wires: BTreeMap<Tag, Vec<Tag>>,
    /// Entities visible to queries; filled by `synchronize`.
    synced: BTreeSet<DimTag>,
    sync_count: usize,
    applied_sizing: Option<MeshSizing>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            wires: BTreeMap::new(),
            synced: BTreeSet::new(),
            sync_count: 0,
            applied_sizing: None,
        }
    }

    fn alloc_tag(&self, dim: Dim) -> Tag {
        self.entities
            .keys()
            .filter(|dt| dt.dim == dim)
            .map(|dt| dt.tag)
            .max()
            .map_or(1, |t| t + 1)
    }

    fn insert(&mut self, dim: Dim, entity: MockEntity) -> Tag {
        let tag = self.alloc_tag(dim);
        self.entities.insert(DimTag::new(dim, tag), entity);
        tag
    }

    fn get(&self, dt: DimTag) -> Result<&MockEntity, KernelError> {
        self.entities.get(&dt).ok_or(KernelError::EntityNotFound(dt))
    }

    fn point(&self, tag: Tag) -> Result<[f64; 3], KernelError> {
        let dt = DimTag::new(Dim::Point, tag);
        match self.get(dt)? {
            MockEntity::Point(p) => Ok(*p),
            _ => Err(KernelError::EntityNotFound(dt)),
        }
    }

    fn line_ends(&self, tag: Tag) -> Result<(Tag, Tag), KernelError> {
        let dt = DimTag::new(Dim::Curve, tag);
        match self.get(dt)? {
            MockEntity::Line { start, end } => Ok((*start, *end)),
            _ => Err(KernelError::EntityNotFound(dt)),
        }
    }

    fn mock_volume(&self, tag: Tag) -> Result<&MockVolume, KernelError> {
        let dt = DimTag::volume(tag);
        match self.get(dt)? {
            MockEntity::Volume(v) => Ok(v),
            _ => Err(KernelError::EntityNotFound(dt)),
        }
    }

    fn wire_bounds(&self, curves: &[Tag]) -> Result<BoxRoi, KernelError> {
        let mut acc: Option<BoxRoi> = None;
        for c in curves {
            let b = self.bounds_of(DimTag::new(Dim::Curve, *c))?;
            acc = Some(acc.map_or(b, |a| union(&a, &b)));
        }
        acc.ok_or_else(|| KernelError::InvalidGeometry {
            reason: "empty wire".to_string(),
        })
    }

    /// Enclosed volume: the outer box minus its cavities. Cavities are assumed
    /// not to overlap one another.
    pub fn volume(&self, tag: Tag) -> Result<f64, KernelError> {
        let v = self.mock_volume(tag)?;
        let carved: f64 = v.cavities.iter().map(box_volume).sum();
        Ok(box_volume(&v.bounds) - carved)
    }

    /// Cavities carved from a volume, in cut order.
    pub fn cavities(&self, tag: Tag) -> Result<Vec<BoxRoi>, KernelError> {
        Ok(self.mock_volume(tag)?.cavities.clone())
    }

    /// Number of `synchronize` calls so far.
    pub fn sync_count(&self) -> usize {
        self.sync_count
    }

    /// The last mesh sizing handed over through `apply_mesh_sizing`.
    pub fn applied_sizing(&self) -> Option<&MeshSizing> {
        self.applied_sizing.as_ref()
    }

    fn bounds_of(&self, dt: DimTag) -> Result<BoxRoi, KernelError> {
        match self.get(dt)? {
            MockEntity::Point(p) => Ok(BoxRoi { min: *p, max: *p }),
            MockEntity::Line { start, end } => {
                let a = self.point(*start)?;
                let b = self.point(*end)?;
                Ok(union(&BoxRoi { min: a, max: a }, &BoxRoi { min: b, max: b }))
            }
            MockEntity::Surface { bounds, .. } => Ok(*bounds),
            MockEntity::Volume(v) => Ok(v.bounds),
        }
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn union(a: &BoxRoi, b: &BoxRoi) -> BoxRoi {
    let mut out = *a;
    for i in 0..3 {
        out.min[i] = a.min[i].min(b.min[i]);
        out.max[i] = a.max[i].max(b.max[i]);
    }
    out
}

/// Overlap of two boxes, or `None` when they share no volume.
fn intersection(a: &BoxRoi, b: &BoxRoi) -> Option<BoxRoi> {
    let mut out = *a;
    for i in 0..3 {
        out.min[i] = a.min[i].max(b.min[i]);
        out.max[i] = a.max[i].min(b.max[i]);
        if out.max[i] - out.min[i] <= 0.0 {
            return None;
        }
    }
    Some(out)
}

fn box_volume(b: &BoxRoi) -> f64 {
    let e = b.extent();
    e[0] * e[1] * e[2]
}

fn translated(b: &BoxRoi, d: [f64; 3]) -> BoxRoi {
    let mut out = *b;
    for i in 0..3 {
        out.min[i] += d[i];
        out.max[i] += d[i];
    }
    out
}

impl Kernel for MockKernel {
    fn add_point(&mut self, x: f64, y: f64, z: f64) -> Result<Tag, KernelError> {
        Ok(self.insert(Dim::Point, MockEntity::Point([x, y, z])))
    }

    fn add_line(&mut self, start: Tag, end: Tag) -> Result<Tag, KernelError> {
        let a = self.point(start)?;
        let b = self.point(end)?;
        if a == b {
            return Err(KernelError::InvalidGeometry {
                reason: format!("line {start}-{end} has zero length"),
            });
        }
        Ok(self.insert(Dim::Curve, MockEntity::Line { start, end }))
    }

    fn add_wire(&mut self, curves: &[Tag]) -> Result<Tag, KernelError> {
        if curves.is_empty() {
            return Err(KernelError::InvalidGeometry {
                reason: "wire needs at least one curve".to_string(),
            });
        }
        let ends = curves
            .iter()
            .map(|c| self.line_ends(*c))
            .collect::<Result<Vec<_>, _>>()?;
        for pair in ends.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let shared = a.0 == b.0 || a.0 == b.1 || a.1 == b.0 || a.1 == b.1;
            if !shared {
                return Err(KernelError::InvalidGeometry {
                    reason: "wire curves are not connected".to_string(),
                });
            }
        }
        let tag = self.wires.keys().next_back().map_or(1, |t| t + 1);
        self.wires.insert(tag, curves.to_vec());
        Ok(tag)
    }

    fn add_plane_surface(&mut self, wires: &[Tag]) -> Result<Tag, KernelError> {
        let outer = *wires.first().ok_or_else(|| KernelError::InvalidGeometry {
            reason: "plane surface needs an outer wire".to_string(),
        })?;
        let curves = self
            .wires
            .get(&outer)
            .cloned()
            .ok_or_else(|| KernelError::InvalidGeometry {
                reason: format!("wire {outer} does not exist"),
            })?;

        // Closed loop: every endpoint is shared by exactly two curves.
        let mut uses: BTreeMap<Tag, usize> = BTreeMap::new();
        for c in &curves {
            let (s, e) = self.line_ends(*c)?;
            *uses.entry(s).or_default() += 1;
            *uses.entry(e).or_default() += 1;
        }
        if uses.values().any(|&n| n != 2) {
            return Err(KernelError::InvalidGeometry {
                reason: format!("wire {outer} is not closed"),
            });
        }

        let bounds = self.wire_bounds(&curves)?;
        let flat_axes = bounds.extent().iter().filter(|e| e.abs() < 1e-12).count();
        if flat_axes != 1 {
            return Err(KernelError::NotSupported {
                operation: "non axis-aligned plane surface".to_string(),
            });
        }
        Ok(self.insert(
            Dim::Surface,
            MockEntity::Surface {
                bounds,
                edge_count: curves.len(),
            },
        ))
    }

    fn extrude(
        &mut self,
        entities: &[DimTag],
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Vec<DimTag>, KernelError> {
        let d = [dx, dy, dz];
        let mut out = Vec::new();
        for &dt in entities {
            let (bounds, edge_count) = match self.get(dt)? {
                MockEntity::Surface { bounds, edge_count } => (*bounds, *edge_count),
                _ => {
                    return Err(KernelError::NotSupported {
                        operation: format!("extrude of {dt:?}"),
                    })
                }
            };
            let top = translated(&bounds, d);
            let top_tag = self.insert(
                Dim::Surface,
                MockEntity::Surface {
                    bounds: top,
                    edge_count,
                },
            );
            out.push(DimTag::surface(top_tag));

            let swept = union(&bounds, &top);
            if box_volume(&swept) <= 0.0 {
                // Extruding within the surface's own plane sweeps no volume.
                continue;
            }
            let vol_tag = self.insert(
                Dim::Volume,
                MockEntity::Volume(MockVolume {
                    bounds: swept,
                    cavities: Vec::new(),
                }),
            );
            out.push(DimTag::volume(vol_tag));
            for _ in 0..edge_count {
                let side = self.insert(
                    Dim::Surface,
                    MockEntity::Surface {
                        bounds: swept,
                        edge_count: 4,
                    },
                );
                out.push(DimTag::surface(side));
            }
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
        let bounds = BoxRoi {
            min: [x.min(x + dx), y.min(y + dy), z.min(z + dz)],
            max: [x.max(x + dx), y.max(y + dy), z.max(z + dz)],
        };
        Ok(self.insert(
            Dim::Volume,
            MockEntity::Volume(MockVolume {
                bounds,
                cavities: Vec::new(),
            }),
        ))
    }

    fn cut(&mut self, objects: &[DimTag], tools: &[DimTag]) -> Result<Vec<DimTag>, KernelError> {
        let mut tool_bounds = Vec::with_capacity(tools.len());
        for &t in tools {
            let tag = expect_dim(t, Dim::Volume)?;
            tool_bounds.push(self.mock_volume(tag)?.bounds);
        }

        let mut result = Vec::new();
        for &o in objects {
            let tag = expect_dim(o, Dim::Volume)?;
            let mut vol = self.mock_volume(tag)?.clone();
            let mut consumed = false;
            for tb in &tool_bounds {
                if let Some(overlap) = intersection(&vol.bounds, tb) {
                    if overlap == vol.bounds {
                        consumed = true;
                        break;
                    }
                    vol.cavities.push(overlap);
                }
            }
            if consumed {
                self.entities.remove(&o);
                self.synced.remove(&o);
            } else {
                self.entities.insert(o, MockEntity::Volume(vol));
                result.push(o);
            }
        }

        for t in tools {
            if !objects.contains(t) {
                self.entities.remove(t);
                self.synced.remove(t);
            }
        }
        Ok(result)
    }

    fn synchronize(&mut self) -> Result<(), KernelError> {
        self.synced = self.entities.keys().copied().collect();
        self.sync_count += 1;
        Ok(())
    }

    fn entities(&self, dim: Dim) -> Vec<DimTag> {
        self.synced.iter().filter(|dt| dt.dim == dim).copied().collect()
    }

    fn bounding_box(&self, entity: DimTag) -> Result<[f64; 6], KernelError> {
        Ok(self.bounds_of(entity)?.to_array())
    }

    fn apply_mesh_sizing(&mut self, sizing: &MeshSizing) -> Result<(), KernelError> {
        self.applied_sizing = Some(sizing.clone());
        Ok(())
    }
}
