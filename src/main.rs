//! epsplot - Convert EPS vector artwork into pen plotter G-code
//!
//! Reads the path geometry of an EPS file, converts it from PostScript points
//! into millimeters or inches and writes G-code to a file or stdout.

use anyhow::Context;
use clap::{ArgAction, Parser};
use epsplot::{
    default_config_path, init_logging, save_preview_to, PenPlotter, PlotSettings, BUILD_DATE,
    VERSION,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Convert EPS vector artwork into pen plotter G-code.
#[derive(Parser, Debug)]
#[command(name = "epsplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// EPS file to convert
    input: PathBuf,

    /// Write G-code to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Settings file (.toml or .json); defaults to the user config file when it exists
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output unit system: mm or in
    #[arg(short = 'u', long)]
    units: Option<String>,

    /// Maximum chord length between samples, in output units
    #[arg(short = 'r', long)]
    resolution: Option<f64>,

    /// Horizontal offset applied after unit conversion
    #[arg(long = "offset-x", allow_hyphen_values = true)]
    offset_x: Option<f64>,

    /// Vertical offset applied after unit conversion
    #[arg(long = "offset-y", allow_hyphen_values = true)]
    offset_y: Option<f64>,

    /// Render a PNG preview of the toolpath
    #[arg(short = 'p', long)]
    preview: Option<PathBuf>,

    /// Preview pixels per output unit
    #[arg(long = "preview-scale")]
    preview_scale: Option<f64>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

impl Args {
    /// Settings from the config file with command line overrides applied
    fn settings(&self) -> anyhow::Result<PlotSettings> {
        let mut settings = match &self.config {
            Some(path) => PlotSettings::load_from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    PlotSettings::load_from_file(&path).with_context(|| {
                        format!("failed to load settings from {}", path.display())
                    })?
                } else {
                    PlotSettings::default()
                }
            }
        };

        if let Some(units) = &self.units {
            settings.units = units.clone();
        }
        if let Some(resolution) = self.resolution {
            settings.resolution = resolution;
        }
        if let Some(x) = self.offset_x {
            settings.offset_x = x;
        }
        if let Some(y) = self.offset_y {
            settings.offset_y = y;
        }
        if let Some(scale) = self.preview_scale {
            settings.preview_scale = scale;
        }

        settings.validate().context("invalid plot settings")?;
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;
    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "starting epsplot");

    let settings = args.settings()?;
    let mut plotter = PenPlotter::from_file(&args.input, settings)
        .with_context(|| format!("failed to import {}", args.input.display()))?;

    let gcode = plotter
        .generate_gcode()
        .context("failed to generate G-code")?;

    match plotter.bounds() {
        Some(b) => tracing::info!(
            "bounds ({:.3}, {:.3}) - ({:.3}, {:.3}) {}",
            b.min_x,
            b.min_y,
            b.max_x,
            b.max_y,
            plotter.units().label()
        ),
        None => tracing::warn!("{} contains no paths", args.input.display()),
    }
    let stats = plotter.stats();
    tracing::info!(
        paths = stats.paths,
        curves = stats.curves,
        samples = stats.samples,
        "drawn length {:.3} {}",
        stats.drawn_length,
        plotter.units().label()
    );

    match &args.output {
        Some(path) => {
            fs::write(path, &gcode)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(file = %path.display(), "wrote G-code");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(gcode.as_bytes())?;
            stdout.flush()?;
        }
    }

    if let Some(path) = &args.preview {
        save_preview_to(&mut plotter, path)?;
    }

    Ok(())
}
