//! Pen plotter pipeline
//!
//! Takes geometry in PostScript points, converts it to the configured output
//! unit, applies the plot offset, samples every curve and emits G-code.
//! Every pass starts from a restore, so repeated calls never compound.

use crate::bounds::Bounds;
use crate::eps_import::{EpsDocument, PathRecord};
use crate::error::CamToolResult;
use crate::group::Group;
use crate::preview::PreviewRenderer;
use crate::toolpath::ToolpathEmitter;
use epsplot_core::MeasurementSystem;
use epsplot_settings::PlotSettings;
use image::RgbImage;
use serde::Serialize;
use std::path::Path as StdPath;

/// Summary of a prepared plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotStats {
    pub paths: usize,
    pub curves: usize,
    pub samples: usize,
    /// Length of the sampled polylines in output units
    pub drawn_length: f64,
}

/// Converts point-space artwork into a pen plotter toolpath
#[derive(Debug, Clone)]
pub struct PenPlotter {
    settings: PlotSettings,
    units: MeasurementSystem,
    group: Group,
    document_bounds: Option<Bounds>,
}

impl PenPlotter {
    /// Validate the settings and prepare `group` for plotting
    pub fn new(group: Group, settings: PlotSettings) -> CamToolResult<Self> {
        settings.validate()?;
        let units = settings.measurement_system()?;
        let mut plotter = Self {
            settings,
            units,
            group,
            document_bounds: None,
        };
        plotter.prepare()?;
        Ok(plotter)
    }

    /// Build one path per record
    pub fn from_records(records: &[PathRecord], settings: PlotSettings) -> CamToolResult<Self> {
        let group = records.iter().map(PathRecord::to_path).collect::<CamToolResult<Group>>()?;
        Self::new(group, settings)
    }

    /// Build from scanned EPS geometry, keeping its bounding box
    pub fn from_document(document: &EpsDocument, settings: PlotSettings) -> CamToolResult<Self> {
        let group = document.to_group()?;

        if let (Some(declared), Some(actual)) = (document.bounding_box, group.bounds()) {
            // Bounding box comments are rounded to whole points
            if !declared.contains(&actual, 1.0) {
                tracing::warn!(
                    "artwork ({:.2}, {:.2})-({:.2}, {:.2}) extends past the declared bounding box ({:.2}, {:.2})-({:.2}, {:.2})",
                    actual.min_x,
                    actual.min_y,
                    actual.max_x,
                    actual.max_y,
                    declared.min_x,
                    declared.min_y,
                    declared.max_x,
                    declared.max_y
                );
            }
        }

        let mut plotter = Self::new(group, settings)?;
        plotter.document_bounds = document.bounding_box;
        Ok(plotter)
    }

    /// Read an EPS file and prepare it for plotting
    pub fn from_file<P: AsRef<StdPath>>(path: P, settings: PlotSettings) -> CamToolResult<Self> {
        Self::from_document(&EpsDocument::from_file(path)?, settings)
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    pub fn units(&self) -> MeasurementSystem {
        self.units
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Bounding box declared by the source document, in points
    pub fn document_bounds(&self) -> Option<Bounds> {
        self.document_bounds
    }

    /// Restore, convert to output units, apply the offset and sample
    pub fn prepare(&mut self) -> CamToolResult<()> {
        self.group.restore();
        self.group.scale_uniform(self.units.points_scale());
        self.group
            .move_by(self.settings.offset_x, self.settings.offset_y);
        self.group.interpolate(self.settings.resolution)?;

        tracing::debug!(
            paths = self.group.len(),
            units = %self.units,
            resolution = self.settings.resolution,
            "prepared toolpath"
        );
        Ok(())
    }

    /// Prepare and emit the whole group as G-code
    pub fn generate_gcode(&mut self) -> CamToolResult<String> {
        self.prepare()?;
        let gcode = ToolpathEmitter::from_settings(&self.settings)?.emit_group(&self.group)?;
        let stats = self.stats();
        tracing::info!(
            paths = stats.paths,
            samples = stats.samples,
            lines = gcode.lines().count(),
            "generated G-code"
        );
        Ok(gcode)
    }

    /// Control-point bounds of the prepared geometry, in output units
    pub fn bounds(&self) -> Option<Bounds> {
        self.group.bounds()
    }

    /// Render the artwork at `preview_scale` pixels per output unit
    ///
    /// The toolpath is prepared again afterwards, so later G-code is unaffected.
    pub fn render_preview(&mut self) -> CamToolResult<RgbImage> {
        self.render_preview_with(&PreviewRenderer::default())
    }

    pub fn render_preview_with(&mut self, renderer: &PreviewRenderer) -> CamToolResult<RgbImage> {
        self.group.restore();
        self.group
            .scale_uniform(self.units.points_scale() * self.settings.preview_scale);
        let rendered = self
            .group
            .interpolate(self.settings.resolution)
            .map(|()| renderer.render(&self.group));

        self.prepare()?;
        rendered
    }

    pub fn stats(&self) -> PlotStats {
        PlotStats {
            paths: self.group.len(),
            curves: self.group.curve_count(),
            samples: self.group.sample_count(),
            drawn_length: self.group.drawn_length(),
        }
    }
}
