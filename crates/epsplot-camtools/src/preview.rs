//! Raster preview of sampled toolpaths
//!
//! One pixel per drawing unit: the caller scales the geometry before rendering
//! (see [`crate::pen_plotter::PenPlotter::render_preview`]). Drawings larger
//! than `max_dimension` are shrunk to fit. The y axis is flipped since EPS
//! coordinates grow upwards.

use crate::bounds::Bounds;
use crate::error::{CamToolError, CamToolResult};
use crate::group::Group;
use crate::point::Coord;
use image::{Rgb, RgbImage};
use std::path::Path as StdPath;

/// Draws polylines onto an RGB image
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    pub padding: u32,
    pub max_dimension: u32,
    pub background: Rgb<u8>,
    pub stroke: Rgb<u8>,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self {
            padding: 10,
            max_dimension: 4096,
            background: Rgb([128, 128, 128]),
            stroke: Rgb([255, 255, 255]),
        }
    }
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every path's sampled polyline
    pub fn render(&self, group: &Group) -> RgbImage {
        let polylines = group.toolpath_points();
        let Some(bounds) = Bounds::from_points(polylines.iter().flatten().copied()) else {
            return self.blank(2 * self.padding + 1, 2 * self.padding + 1);
        };

        let limit = self.max_dimension.saturating_sub(2 * self.padding).max(1) as f64;
        let largest = bounds.width().max(bounds.height());
        let fit = if largest > limit { limit / largest } else { 1.0 };

        // Same rounding as the pixel mapping, so sampling noise cannot add a row
        let width = (bounds.width() * fit).round() as u32 + 2 * self.padding + 1;
        let height = (bounds.height() * fit).round() as u32 + 2 * self.padding + 1;
        let mut img = self.blank(width, height);

        let pad = self.padding as f64;
        let to_pixel = |at: Coord| -> (i32, i32) {
            let x = pad + (at.x - bounds.min_x) * fit;
            let y = height as f64 - 1.0 - pad - (at.y - bounds.min_y) * fit;
            (x.round() as i32, y.round() as i32)
        };

        for polyline in &polylines {
            // The first point is the travel target; drawing starts there
            for pair in polyline.windows(2) {
                let (x0, y0) = to_pixel(pair[0]);
                let (x1, y1) = to_pixel(pair[1]);
                draw_line_segment(&mut img, x0, y0, x1, y1, self.stroke);
            }
        }

        tracing::debug!(width, height, fit, paths = polylines.len(), "rendered preview");
        img
    }

    fn blank(&self, width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, self.background)
    }
}

/// Write a rendered preview, format chosen by the file extension
pub fn save_preview<P: AsRef<StdPath>>(img: &RgbImage, path: P) -> CamToolResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path)
        .map_err(|e| CamToolError::ImageError(format!("{}: {}", path.display(), e)))?;
    tracing::info!(file = %path.display(), "saved preview");
    Ok(())
}

/// Bresenham line, clipped to the image
fn draw_line_segment(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);
    let (w, h) = (img.width() as i32, img.height() as i32);

    loop {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            img.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
