//! Groups of independent paths

use crate::bounds::Bounds;
use crate::error::CamToolResult;
use crate::path::Path;
use crate::point::Coord;
use crate::toolpath::MotionCommand;

/// An ordered collection of paths, processed in document order
#[derive(Debug, Clone, Default)]
pub struct Group {
    paths: Vec<Path>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        for path in &mut self.paths {
            path.move_by(dx, dy);
        }
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        for path in &mut self.paths {
            path.scale(sx, sy);
        }
    }

    pub fn scale_uniform(&mut self, factor: f64) {
        self.scale(factor, factor);
    }

    pub fn restore(&mut self) {
        for path in &mut self.paths {
            path.restore();
        }
    }

    pub fn interpolate(&mut self, resolution: f64) -> CamToolResult<()> {
        for path in &mut self.paths {
            path.interpolate(resolution)?;
        }
        Ok(())
    }

    /// Union of every path's control-point box, `None` for an empty group
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.paths.iter().flat_map(Path::control_points))
    }

    /// Sampled polyline of each path, origin first
    pub fn toolpath_points(&self) -> Vec<Vec<Coord>> {
        self.paths.iter().map(Path::toolpath_points).collect()
    }

    /// Every path's bracketed command list, concatenated in order
    pub fn toolpath_commands(&self) -> CamToolResult<Vec<MotionCommand>> {
        let mut commands = Vec::new();
        for (index, path) in self.paths.iter().enumerate() {
            commands.extend(path.toolpath_commands(index)?);
        }
        Ok(commands)
    }

    pub fn curve_count(&self) -> usize {
        self.paths.iter().map(|p| p.curves().len()).sum()
    }

    pub fn sample_count(&self) -> usize {
        self.paths.iter().map(Path::sample_count).sum()
    }

    pub fn drawn_length(&self) -> f64 {
        self.paths.iter().map(Path::drawn_length).sum()
    }
}

impl FromIterator<Path> for Group {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        Self::from_paths(iter.into_iter().collect())
    }
}
