// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Vesselframe CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vesselframe::cli::Reporter;
use vesselframe::config::{load_vessel_spec, CliConfig};
use vesselframe::io::{export_stl, handle_json};
use vesselframe::{build_solid, volume, Dimensions, RawDimensions, ShapeKind, VesselSpec};

#[derive(Parser)]
#[command(name = "vesselframe")]
#[command(about = "Vesselframe - volumes and solids for process vessels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./vesselframe.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the volume of a single component
    Volume {
        /// Shape name, e.g. cylinder or torispherical-head
        #[arg(short, long)]
        shape: String,

        /// Dimension as field=value, in the configured input unit
        #[arg(short, long = "dim", value_name = "FIELD=VALUE", value_parser = parse_dimension)]
        dims: Vec<(String, Value)>,
    },

    /// Print the solid description of a component as JSON
    Solid {
        #[arg(short, long)]
        shape: String,

        #[arg(short, long = "dim", value_name = "FIELD=VALUE", value_parser = parse_dimension)]
        dims: Vec<(String, Value)>,
    },

    /// Answer a JSON volume request (lengths in meters)
    Request {
        /// Request file; reads stdin when omitted
        input: Option<PathBuf>,
    },

    /// Show the stacked layout and volumes of a vessel
    Assembly {
        /// Vessel description (TOML); the default vessel when omitted
        #[arg(long, value_name = "FILE")]
        spec: Option<PathBuf>,
    },

    /// Export the stacked vessel mesh as STL
    Export {
        #[arg(long, value_name = "FILE")]
        spec: Option<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        Reporter::report_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Volume { shape, dims } => volume_command(&config, &shape, dims),
        Commands::Solid { shape, dims } => solid_command(&config, &shape, dims),
        Commands::Request { input } => request_command(input.as_deref()),
        Commands::Assembly { spec } => assembly_command(spec.as_deref()),
        Commands::Export { spec, output } => export_command(&config, spec.as_deref(), &output),
        Commands::Version => {
            println!("Vesselframe v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// `field=value`; numeric values stay numbers, anything else is passed on as text
fn parse_dimension(arg: &str) -> std::result::Result<(String, Value), String> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{arg}`"))?;
    let value = match value.trim().parse::<f64>() {
        Ok(number) => Value::from(number),
        Err(_) => Value::String(value.trim().to_string()),
    };
    Ok((field.trim().to_string(), value))
}

fn volume_command(config: &CliConfig, shape: &str, dims: Vec<(String, Value)>) -> Result<()> {
    let Some(kind) = ShapeKind::from_name(shape) else {
        Reporter::report_warning(&format!("unknown shape `{shape}`, volume is 0"));
        Reporter::report_volume(shape, None, 0.0);
        return Ok(());
    };

    let dimensions = cli_dimensions(config, kind, dims)?;
    Reporter::report_volume(kind.name(), Some(&dimensions), volume(&dimensions));
    Ok(())
}

fn solid_command(config: &CliConfig, shape: &str, dims: Vec<(String, Value)>) -> Result<()> {
    let Some(kind) = ShapeKind::from_name(shape) else {
        bail!("unknown shape `{shape}`");
    };

    let dimensions = cli_dimensions(config, kind, dims)?;
    let solid = build_solid(&dimensions);
    println!("{}", serde_json::to_string_pretty(&solid)?);
    Ok(())
}

fn request_command(input: Option<&Path>) -> Result<()> {
    let body = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request: {}", path.display()))?,
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request from stdin")?;
            body
        }
    };

    println!("{}", handle_json(&body)?);
    Ok(())
}

fn assembly_command(spec: Option<&Path>) -> Result<()> {
    let assembly = vessel_spec(spec)?
        .to_assembly()
        .context("Invalid vessel description")?;

    Reporter::report_assembly(&assembly.layout(), &assembly.volumes());
    Ok(())
}

fn export_command(config: &CliConfig, spec: Option<&Path>, output: &Path) -> Result<()> {
    let assembly = vessel_spec(spec)?
        .to_assembly()
        .context("Invalid vessel description")?;

    let start = Instant::now();
    let mesh = assembly.to_mesh(&config.tessellation());
    let output = config.output_path(output);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    export_stl(&mesh, &output)?;
    info!(path = %output.display(), "exported vessel");

    Reporter::report_export(
        &output.display().to_string(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        start.elapsed(),
    );
    Ok(())
}

fn cli_dimensions(
    config: &CliConfig,
    kind: ShapeKind,
    dims: Vec<(String, Value)>,
) -> Result<Dimensions> {
    let raw: RawDimensions = dims.into_iter().collect();
    Dimensions::from_raw(kind, &raw, config.input_unit)
        .with_context(|| format!("Invalid dimensions for {kind}"))
}

fn vessel_spec(path: Option<&Path>) -> Result<VesselSpec> {
    match path {
        Some(path) => load_vessel_spec(path),
        None => Ok(VesselSpec::default()),
    }
}
