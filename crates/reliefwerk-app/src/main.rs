// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reliefwerk — PCB trace PDFs to 3D-printable STL relief meshes
//
// Entry point. Initialises logging, parses the command line, and runs the
// requested conversion. Any pipeline error prints a message naming the
// failure and exits non-zero without leaving a partial output file behind.

mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use reliefwerk_core::config::{BinarizeMode, ConvertConfig, PreprocessOptions};
use reliefwerk_core::error::Result;
use reliefwerk_core::types::OutputDimensions;
use reliefwerk_mesh::{StlFormat, SurfaceNets};

#[derive(Parser, Debug)]
#[command(name = "reliefwerk")]
#[command(about = "Convert single-page PCB trace documents into 3D-printable meshes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single-page PDF to a PNG raster.
    Raster(RasterArgs),
    /// Convert a PDF or raster into an STL mesh with the given physical size.
    Mesh(MeshArgs),
}

#[derive(Args, Debug)]
struct RasterArgs {
    /// Input PDF path.
    input: PathBuf,
    /// Output PNG path; defaults to the input with a .png extension.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Render resolution in dots per inch.
    #[arg(long, default_value_t = 400)]
    dpi: u32,
}

#[derive(Args, Debug)]
struct MeshArgs {
    /// Input document (.pdf) or raster (.png/.jpg/.tiff) path.
    input: PathBuf,
    /// Physical width of the output, in millimetres.
    width: f64,
    /// Physical depth of the output, in millimetres.
    depth: f64,
    /// Physical height of the output, in millimetres.
    height: f64,
    /// Output STL path; defaults to the input with a .stl extension.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Render resolution for PDF inputs, in dots per inch.
    #[arg(long, default_value_t = 400)]
    dpi: u32,
    /// Voxel layers the mask is extruded through.
    #[arg(long, default_value_t = 3)]
    layers: usize,
    /// Flip solid and empty pixels (for white-on-black sources).
    #[arg(long)]
    invert: bool,
    /// Mirror the mask left-right.
    #[arg(long)]
    mirror_horizontal: bool,
    /// Skip the default top-bottom mirror.
    #[arg(long)]
    no_mirror_vertical: bool,
    /// Fixed binarization threshold instead of automatic (Otsu) selection.
    #[arg(long, value_name = "LEVEL")]
    fixed_threshold: Option<u8>,
    /// Emit ASCII STL instead of binary.
    #[arg(long)]
    ascii: bool,
    /// Keep the intermediate PNG raster next to a PDF input.
    #[arg(long)]
    keep_raster: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "conversion failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Command::Raster(args) => {
            let target = pipeline::rasterize_document(&args.input, args.output, args.dpi)?;
            println!("{}", target.display());
        }
        Command::Mesh(args) => {
            // Reject invalid dimensions before any rendering or extraction.
            let dimensions = OutputDimensions::new(args.width, args.depth, args.height)?;

            let config = ConvertConfig {
                dpi: args.dpi,
                layers: args.layers,
                preprocess: PreprocessOptions {
                    invert: args.invert,
                    mirror_horizontal: args.mirror_horizontal,
                    mirror_vertical: !args.no_mirror_vertical,
                    binarize: args
                        .fixed_threshold
                        .map_or(BinarizeMode::Otsu, BinarizeMode::Fixed),
                },
            };
            let format = if args.ascii {
                StlFormat::Ascii
            } else {
                StlFormat::Binary
            };

            let target = pipeline::convert_document(
                &args.input,
                args.output,
                &dimensions,
                &config,
                format,
                args.keep_raster,
                &SurfaceNets,
            )?;
            println!("{}", target.display());
        }
    }
    Ok(())
}
