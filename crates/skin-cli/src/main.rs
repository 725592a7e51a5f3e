//! `skin`: command-line front end for the magnetic skin model.
//!
//! Loads a parameter document, derives the layout and writes either the
//! layout, a gmsh `.geo` script or a STEP solid.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Magnetic skin sensor geometry tool
#[derive(Parser)]
#[command(name = "skin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Magnetic skin sensor layout and geometry", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived layout as JSON
    Layout(commands::layout::LayoutArgs),
    /// Write a gmsh .geo script of the carved slab
    Geo(commands::geo::GeoArgs),
    /// Write the carved slab as a STEP file
    Step(commands::step::StepArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so JSON and scripts on stdout stay clean.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Layout(args) => commands::layout::execute(args),
        Commands::Geo(args) => commands::geo::execute(args),
        Commands::Step(args) => commands::step::execute(args),
    }
}
