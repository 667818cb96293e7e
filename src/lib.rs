//! # epsplot
//!
//! Converts the vector paths of an EPS file into G-code for a pen plotter.
//!
//! ## Architecture
//!
//! epsplot is organized as a workspace with multiple crates:
//!
//! 1. **epsplot-core** - Measurement units and PostScript point conversion
//! 2. **epsplot-settings** - Plot settings, JSON/TOML persistence
//! 3. **epsplot-camtools** - Bezier geometry, EPS import, toolpaths, preview
//! 4. **epsplot** - Command line binary that ties the crates together
//!
//! ## Pipeline
//!
//! EPS path operators are scanned into paths of chained Bezier curves. The
//! paths are scaled from points into millimeters or inches, shifted by the
//! plot offset and sampled at a fixed chord resolution. Every path is then
//! drawn inside its own pen up/down bracket.

pub use epsplot_camtools as camtools;
pub use epsplot_settings as settings;

pub use epsplot_camtools::{
    Bounds, CamToolError, CamToolResult, EpsDocument, Group, Path, PenPlotter, PlotStats,
    PreviewRenderer, ToolpathEmitter,
};
pub use epsplot_core::{MeasurementSystem, POINT_TO_INCH, POINT_TO_MM};
pub use epsplot_settings::{default_config_path, PlotSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so G-code written to stdout stays clean
/// - RUST_LOG environment variable support
/// - `info` as the default level, `debug` when `debug` is set
pub fn init_logging(debug: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_level(true)
        .with_line_number(debug);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Render the plotter's preview and write it to `path`
///
/// The image format follows the file extension.
pub fn save_preview_to(plotter: &mut PenPlotter, path: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let img = plotter
        .render_preview()
        .context("failed to render preview")?;
    epsplot_camtools::save_preview(&img, path)
        .with_context(|| format!("failed to save preview to {}", path.display()))?;
    Ok(())
}
