#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI tool for generating the water-quality compliance map.
//!
//! Reads the Sisagua sample export and the neighborhood boundaries named in
//! the configuration and writes a self-contained HTML map.

use std::path::PathBuf;

use clap::Parser;
use sisagua_map_generate::config::Config;

#[derive(Parser)]
#[command(
    name = "sisagua_map_generate",
    about = "Water-quality compliance map generator"
)]
struct Cli {
    /// TOML file merged over the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sample CSV file
    #[arg(long)]
    samples: Option<PathBuf>,

    /// Neighborhood `GeoJSON` file
    #[arg(long)]
    boundaries: Option<PathBuf>,

    /// Output HTML file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(samples) = cli.samples {
        config.input.samples = samples;
    }
    if let Some(boundaries) = cli.boundaries {
        config.input.boundaries = boundaries;
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }

    let summary = sisagua_map_generate::run(&config)?;
    log::info!(
        "{} of {} polygons matched sampled neighborhoods",
        summary.matched,
        summary.boundaries
    );

    println!(
        "Map saved successfully to: {}",
        summary.output_path.display()
    );

    Ok(())
}
