use crate::mesh_field::MeshSizing;
use crate::types::*;

/// Core CAD kernel trait: the primitive construction operations the
/// generator drives, plus read-only queries on the resulting model.
///
/// Implemented by `TruckKernel` (real B-rep), `GeoScriptKernel` (records a gmsh
/// `.geo` script) and `MockKernel` (deterministic test double).
pub trait Kernel {
    /// Add a point. Returns its tag.
    fn add_point(&mut self, x: f64, y: f64, z: f64) -> Result<Tag, KernelError>;

    /// Add a straight line between two existing points.
    fn add_line(&mut self, start: Tag, end: Tag) -> Result<Tag, KernelError>;

    /// Join curves into a wire. The curves must form a connected chain.
    fn add_wire(&mut self, curves: &[Tag]) -> Result<Tag, KernelError>;

    /// Build a plane surface bounded by the given wires (first is the outer loop).
    fn add_plane_surface(&mut self, wires: &[Tag]) -> Result<Tag, KernelError>;

    /// Translate-extrude entities by `(dx, dy, dz)`.
    ///
    /// Returns every entity the extrusion produced, in kernel order; callers
    /// pick out what they need by dimension. An extrusion that sweeps no
    /// volume returns no `Dim::Volume` entry.
    fn extrude(
        &mut self,
        entities: &[DimTag],
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Vec<DimTag>, KernelError>;

    /// Axis-aligned box with one corner at `(x, y, z)` and extents `(dx, dy, dz)`.
    fn add_box(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Tag, KernelError>;

    /// Boolean difference `objects − tools`. Tool entities are consumed.
    fn cut(&mut self, objects: &[DimTag], tools: &[DimTag]) -> Result<Vec<DimTag>, KernelError>;

    /// Push pending construction into the model so queries see it.
    fn synchronize(&mut self) -> Result<(), KernelError>;

    /// All live entities of a dimension, ascending by tag.
    fn entities(&self, dim: Dim) -> Vec<DimTag>;

    /// Axis-aligned bounds `[xmin, ymin, zmin, xmax, ymax, zmax]` of an entity.
    fn bounding_box(&self, entity: DimTag) -> Result<[f64; 6], KernelError>;

    /// Hand the mesh-size configuration to the kernel. Kernels without a
    /// mesher ignore it.
    fn apply_mesh_sizing(&mut self, _sizing: &MeshSizing) -> Result<(), KernelError> {
        Ok(())
    }
}
