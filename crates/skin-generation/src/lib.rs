//! Builds the magnetic skin solid through a CAD kernel: slab, magnet
//! cavities, boolean cut and background mesh-size fields.

pub mod base;
pub mod cut;
pub mod magnets;
pub mod mesh_sizes;
pub mod skin;
pub mod types;

pub use base::create_base_box;
pub use cut::cut_magnets_from_base;
pub use magnets::create_magnet_boxes;
pub use mesh_sizes::{combine_as_background, define_mesh_sizes, define_zone_mesh_size, ZoneRefinement};
pub use skin::{generate_from_config, magnetic_skin, GenerationOptions, DEFAULT_MESH_SIZE};
pub use types::GenError;
