//! Top-level orchestration.

use serde::{Deserialize, Serialize};
use skin_config::MagneticSkinConfig;
use skin_kernel::{DimTag, Kernel, Session};
use tracing::{info, instrument};

use crate::base::create_base_box;
use crate::cut::cut_magnets_from_base;
use crate::magnets::create_magnet_boxes;
use crate::mesh_sizes::{
    combine_as_background, define_mesh_sizes, define_zone_mesh_size, ZoneRefinement,
};
use crate::types::GenError;

/// Target element size used when the caller gives none.
pub const DEFAULT_MESH_SIZE: f64 = 0.1;

/// Build the magnetic skin: slab, magnet boxes, cut, global mesh sizing.
///
/// Returns the volume of the carved slab. The session keeps the model and its
/// mesh sizing for downstream meshing or export.
#[instrument(skip(session, magnet_boxes), fields(magnets = magnet_boxes.len()))]
pub fn magnetic_skin<K: Kernel, B: AsRef<[f64]>>(
    session: &mut Session<K>,
    length: f64,
    width: f64,
    height: f64,
    magnet_boxes: &[B],
    lc: f64,
) -> Result<DimTag, GenError> {
    let base = create_base_box(session.kernel_mut(), length, width, height)?;
    let magnets = create_magnet_boxes(session.kernel_mut(), magnet_boxes)?;
    let result = cut_magnets_from_base(session.kernel_mut(), base, &magnets)?;

    define_mesh_sizes(session.mesh_mut(), length, width, height, lc)?;
    session.commit_mesh_sizing()?;

    info!(?result, cavities = magnets.len(), "magnetic skin generated");
    Ok(result)
}

/// Knobs for [`generate_from_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub mesh_size: f64,
    /// Optional local refinement; empty by default.
    pub zones: Vec<ZoneRefinement>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            mesh_size: DEFAULT_MESH_SIZE,
            zones: Vec::new(),
        }
    }
}

/// Generate the solid for a configuration's current parameters and layout.
///
/// With refinement zones, the background mesh becomes the minimum of the
/// global field and every zone field.
pub fn generate_from_config<K: Kernel>(
    session: &mut Session<K>,
    config: &MagneticSkinConfig,
    options: &GenerationOptions,
) -> Result<DimTag, GenError> {
    let p = config.params();
    let boxes = config.layout().magnet_box_coords();
    let result = magnetic_skin(session, p.length, p.width, p.height, &boxes, options.mesh_size)?;

    if !options.zones.is_empty() {
        let mut fields = Vec::with_capacity(options.zones.len() + 1);
        if let Some(global) = session.mesh().background {
            fields.push(global);
        }
        for zone in &options.zones {
            fields.push(define_zone_mesh_size(session.mesh_mut(), zone)?);
        }
        combine_as_background(session.mesh_mut(), &fields)?;
        session.commit_mesh_sizing()?;
    }
    Ok(result)
}
