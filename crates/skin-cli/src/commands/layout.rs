use anyhow::Result;
use clap::Args;
use serde_json::json;
use skin_config::DesignModel;
use std::path::PathBuf;

use super::{write_output, ModelArgs};

#[derive(Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Also print design variables and objectives
    #[arg(long)]
    pub design: bool,

    /// Output file; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: LayoutArgs) -> Result<()> {
    let config = args.model.load()?;

    let doc = if args.design {
        json!({
            "name": config.name(),
            "parameters": config.params(),
            "layout": config.layout(),
            "design_variables": config.design_variables(),
            "objectives": config.objectives(),
            "assessed_together": config.assessed_together_objectives(),
        })
    } else {
        json!({
            "parameters": config.params(),
            "layout": config.layout(),
        })
    };

    let mut text = serde_json::to_string_pretty(&doc)?;
    text.push('\n');
    write_output(args.output.as_deref(), &text)
}
