//! Background mesh-size fields for the slab.

use serde::{Deserialize, Serialize};
use skin_kernel::{BoxField, Field, FieldId, MeshSizing};
use skin_types::Point3;
use tracing::debug;

use crate::types::{require_positive, GenError};

/// Element size far from the slab; large enough that nothing is refined there.
pub const FAR_FIELD_SIZE: f64 = 100000.0;

/// Global box field covering the slab `[-L/2, L/2] × [-W/2, W/2] × [0, H]`
/// with target size `lc`, set as the background mesh. The mesher's own size
/// heuristics are switched off.
pub fn define_mesh_sizes(
    mesh: &mut MeshSizing,
    length: f64,
    width: f64,
    height: f64,
    lc: f64,
) -> Result<FieldId, GenError> {
    require_positive("mesh size", lc)?;
    let id = mesh.next_field_id();
    let field = BoxField::from_bounds(
        [-length / 2.0, -width / 2.0, 0.0],
        [length / 2.0, width / 2.0, height],
        lc,
        FAR_FIELD_SIZE,
    );
    mesh.add_field(id, Field::Box(field))?;
    mesh.set_background(id)?;
    mesh.disable_size_heuristics();
    debug!(field = id, lc, "global mesh size field");
    Ok(id)
}

/// Finer element size in a cube around one point, e.g. a magnet or sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRefinement {
    pub center: Point3,
    /// Half the cube side.
    pub half_size: f64,
    /// Element size inside the cube.
    pub size: f64,
    /// Element size outside the transition layer.
    pub far_size: f64,
    /// Width of the linear transition between `size` and `far_size`.
    pub thickness: f64,
}

impl ZoneRefinement {
    /// One zone per center, all with the same sizing.
    pub fn around(
        centers: &[Point3],
        half_size: f64,
        size: f64,
        far_size: f64,
        thickness: f64,
    ) -> Vec<Self> {
        centers
            .iter()
            .map(|&center| Self {
                center,
                half_size,
                size,
                far_size,
                thickness,
            })
            .collect()
    }
}

/// Register a box field for one refinement zone. Does not change the
/// background field; see [`combine_as_background`].
pub fn define_zone_mesh_size(
    mesh: &mut MeshSizing,
    zone: &ZoneRefinement,
) -> Result<FieldId, GenError> {
    require_positive("zone half size", zone.half_size)?;
    require_positive("zone mesh size", zone.size)?;
    let c = zone.center;
    let r = zone.half_size;
    let field = BoxField::from_bounds(
        [c[0] - r, c[1] - r, c[2] - r],
        [c[0] + r, c[1] + r, c[2] + r],
        zone.size,
        zone.far_size,
    )
    .with_thickness(zone.thickness);

    let id = mesh.next_field_id();
    mesh.add_field(id, Field::Box(field))?;
    Ok(id)
}

/// Make the pointwise minimum of `fields` the background mesh.
pub fn combine_as_background(mesh: &mut MeshSizing, fields: &[FieldId]) -> Result<FieldId, GenError> {
    let id = mesh.next_field_id();
    mesh.add_field(
        id,
        Field::Min {
            fields: fields.to_vec(),
        },
    )?;
    mesh.set_background(id)?;
    Ok(id)
}
