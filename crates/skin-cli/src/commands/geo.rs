use anyhow::Result;
use clap::Args;
use skin_generation::{generate_from_config, GenerationOptions, ZoneRefinement, DEFAULT_MESH_SIZE};
use skin_kernel::{GeoScriptKernel, Session};
use std::path::PathBuf;
use tracing::info;

use super::{write_output, ModelArgs};

#[derive(Args)]
pub struct GeoArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Target element size inside the slab
    #[arg(long, default_value_t = DEFAULT_MESH_SIZE)]
    pub mesh_size: f64,

    /// Element size near each magnet; no local refinement when absent
    #[arg(long)]
    pub magnet_mesh_size: Option<f64>,

    /// Append `Mesh <dim>;` so gmsh meshes on load
    #[arg(long)]
    pub mesh_dim: Option<u8>,

    /// Output file; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: GeoArgs) -> Result<()> {
    let config = args.model.load()?;

    let mut kernel = GeoScriptKernel::new();
    if let Some(dim) = args.mesh_dim {
        kernel = kernel.with_mesh_command(dim);
    }
    let mut session = Session::new(kernel);

    let zones = match args.magnet_mesh_size {
        Some(size) => {
            let side = config.params().magnet_side;
            ZoneRefinement::around(
                &config.layout().magnet_centers,
                side,
                size,
                args.mesh_size,
                side,
            )
        }
        None => Vec::new(),
    };
    let options = GenerationOptions {
        mesh_size: args.mesh_size,
        zones,
    };

    let volume = generate_from_config(&mut session, &config, &options)?;
    info!(?volume, "generated .geo model");
    write_output(args.output.as_deref(), &session.kernel().render())
}
