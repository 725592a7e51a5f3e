use anyhow::{Context, Result};
use clap::Args;
use skin_generation::{generate_from_config, GenerationOptions};
use skin_kernel::{Session, TruckKernel};
use std::path::PathBuf;
use tracing::info;

use super::{write_output, ModelArgs};

#[derive(Args)]
pub struct StepArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output file; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: StepArgs) -> Result<()> {
    let config = args.model.load()?;

    let mut session = Session::new(TruckKernel::new());
    // The B-rep boolean cannot carve voids fully enclosed in the slab; such
    // layouts fail here and can still be written with `skin geo`.
    let volume = generate_from_config(&mut session, &config, &GenerationOptions::default())
        .context("building the solid with the truck kernel")?;
    info!(?volume, "generated solid");

    let step = session.kernel().export_step(volume.tag)?;
    write_output(args.output.as_deref(), &step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosed_default_layout_reports_error() {
        let args = StepArgs {
            model: ModelArgs {
                params: None,
                overrides: Vec::new(),
            },
            output: None,
        };
        let err = execute(args).unwrap_err();
        assert!(format!("{err:#}").contains("enclosed cavity"));
    }
}
