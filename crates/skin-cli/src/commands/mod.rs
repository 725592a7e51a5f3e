pub mod geo;
pub mod layout;
pub mod step;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use skin_config::{DesignModel, MagneticSkinConfig, SkinParameters};
use tracing::info;

/// Options shared by every command that builds a configuration.
#[derive(Args)]
pub struct ModelArgs {
    /// JSON parameter document; defaults are used when absent
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Design variable override, e.g. `--set Length=50` (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,
}

impl ModelArgs {
    pub fn load(&self) -> Result<MagneticSkinConfig> {
        let params = match &self.params {
            Some(path) => load_params(path)?,
            None => SkinParameters::default(),
        };
        let mut config = MagneticSkinConfig::from_parameters(params)?;

        if !self.overrides.is_empty() {
            let values = parse_overrides(&self.overrides)?;
            config.set_design_variables(&values)?;
            info!(?values, "applied design variable overrides");
        }
        Ok(config)
    }
}

fn load_params(path: &Path) -> Result<SkinParameters> {
    let params = SkinParameters::from_json_file(path)
        .with_context(|| format!("loading parameters from {}", path.display()))?;
    info!(path = %path.display(), "loaded parameters");
    Ok(params)
}

fn parse_overrides(pairs: &[String]) -> Result<BTreeMap<String, f64>> {
    let mut values = BTreeMap::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("override `{pair}` is not NAME=VALUE");
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("override `{pair}` has a non-numeric value"))?;
        values.insert(name.trim().to_string(), value);
    }
    Ok(values)
}

/// Write `text` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}
