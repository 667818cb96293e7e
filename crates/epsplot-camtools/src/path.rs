//! Paths: an origin followed by a chain of anchored curves
//!
//! All points of a path live in one [`PointArena`]. Each curve is anchored to
//! the previous curve's endpoint (or the origin for the first curve) by handle,
//! so a transform touches every stored point exactly once and the shared
//! endpoint moves for both curves at the same time.

use crate::bounds::Bounds;
use crate::curve::{validate_resolution, Curve};
use crate::error::{CamToolError, CamToolResult};
use crate::point::{Coord, Point, PointArena, PointId};
use crate::toolpath::MotionCommand;

/// An origin point plus an ordered chain of curves
#[derive(Debug, Clone)]
pub struct Path {
    arena: PointArena,
    origin: PointId,
    curves: Vec<Curve>,
    resolution: Option<f64>,
}

impl Path {
    /// Create a path with no curves yet
    pub fn new(origin: Point) -> Self {
        let mut arena = PointArena::new();
        let origin = arena.insert(origin);
        Self {
            arena,
            origin,
            curves: Vec::new(),
            resolution: None,
        }
    }

    /// Build a path from an origin record (`"x y"`) and 6-number curve records
    pub fn from_records<S: AsRef<str>>(origin: &str, records: &[S]) -> CamToolResult<Self> {
        let mut path = Self::new(Point::parse(origin)?);
        for record in records {
            path.push_record(record.as_ref())?;
        }
        Ok(path)
    }

    /// Build a path from an origin and explicit control-point triples
    pub fn from_controls(
        origin: Point,
        controls: impl IntoIterator<Item = [Point; 3]>,
    ) -> CamToolResult<Self> {
        let mut path = Self::new(origin);
        for triple in controls {
            path.push_curve(triple)?;
        }
        Ok(path)
    }

    /// Handle the next curve anchors to
    fn tail(&self) -> PointId {
        self.curves
            .last()
            .map(Curve::endpoint)
            .unwrap_or(self.origin)
    }

    /// Append a curve anchored to the current tail
    pub fn push_curve(&mut self, controls: [Point; 3]) -> CamToolResult<&Curve> {
        let anchor = self.tail();
        let curve = Curve::four_point(&mut self.arena, anchor, controls)?;
        self.attach(curve)
    }

    /// Append a curve parsed from a 6-number record, anchored to the current tail
    pub fn push_record(&mut self, record: &str) -> CamToolResult<&Curve> {
        let anchor = self.tail();
        let curve = Curve::from_record(&mut self.arena, anchor, record)?;
        self.attach(curve)
    }

    fn attach(&mut self, mut curve: Curve) -> CamToolResult<&Curve> {
        if let Some(resolution) = self.resolution {
            curve.interpolate(&self.arena, resolution)?;
        }
        self.curves.push(curve);
        Ok(&self.curves[self.curves.len() - 1])
    }

    /// Handle of the origin point
    pub fn origin_id(&self) -> PointId {
        self.origin
    }

    pub fn origin(&self) -> Coord {
        self.arena.at(self.origin)
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Storage holding the origin and every control point
    pub fn points(&self) -> &PointArena {
        &self.arena
    }

    /// Look up a point of this path by handle
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.arena.get(id)
    }

    /// Resolution of the last interpolation, if any
    pub fn resolution(&self) -> Option<f64> {
        self.resolution
    }

    /// Translate the origin and then every curve
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        if let Some(origin) = self.arena.get_mut(self.origin) {
            origin.move_by(dx, dy);
        }
        for curve in &mut self.curves {
            curve.move_by(&mut self.arena, dx, dy);
        }
    }

    /// Scale the origin and then every curve
    pub fn scale(&mut self, sx: f64, sy: f64) {
        if let Some(origin) = self.arena.get_mut(self.origin) {
            origin.scale(sx, sy);
        }
        for curve in &mut self.curves {
            curve.scale(&mut self.arena, sx, sy);
        }
    }

    pub fn scale_uniform(&mut self, factor: f64) {
        self.scale(factor, factor);
    }

    /// Return the origin and every curve to construction-time coordinates
    pub fn restore(&mut self) {
        if let Some(origin) = self.arena.get_mut(self.origin) {
            origin.restore();
        }
        for curve in &mut self.curves {
            curve.restore(&mut self.arena);
        }
    }

    /// Sample every curve at `resolution`
    pub fn interpolate(&mut self, resolution: f64) -> CamToolResult<()> {
        validate_resolution(resolution)?;
        for curve in &mut self.curves {
            curve.interpolate(&self.arena, resolution)?;
        }
        self.resolution = Some(resolution);
        Ok(())
    }

    /// Origin followed by p1, p2, p3 of every curve
    pub fn control_points(&self) -> impl Iterator<Item = Coord> + '_ {
        std::iter::once(self.origin()).chain(
            self.curves
                .iter()
                .flat_map(|c| c.controls())
                .map(|id| self.arena.at(id)),
        )
    }

    /// Bounding box of the origin and all control points (not the samples)
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::from_point(self.origin());
        for at in self.control_points().skip(1) {
            bounds.include(at);
        }
        bounds
    }

    /// Origin followed by every sample of every curve
    ///
    /// Consecutive curves both include their shared endpoint, so it appears
    /// twice in the sequence.
    pub fn toolpath_points(&self) -> Vec<Coord> {
        std::iter::once(self.origin())
            .chain(self.curves.iter().flat_map(|c| c.samples().iter().copied()))
            .collect()
    }

    /// Motion commands drawing this path inside its own lift/lower bracket
    ///
    /// `index` only labels the error when a curve has not been sampled.
    pub fn toolpath_commands(&self, index: usize) -> CamToolResult<Vec<MotionCommand>> {
        if let Some(curve) = self.curves.iter().position(|c| !c.is_interpolated()) {
            return Err(CamToolError::NotInterpolated { path: index, curve });
        }

        let points = self.toolpath_points();
        let mut commands = Vec::with_capacity(points.len() + 4);
        commands.push(MotionCommand::PenUp);
        commands.push(MotionCommand::TravelFeed);
        commands.push(MotionCommand::Travel(points[0]));
        commands.push(MotionCommand::PenDown);
        commands.extend(points[1..].iter().copied().map(MotionCommand::Draw));
        commands.push(MotionCommand::PenUp);
        Ok(commands)
    }

    /// Total number of samples over all curves
    pub fn sample_count(&self) -> usize {
        self.curves.iter().map(|c| c.samples().len()).sum()
    }

    /// Length of the sampled polylines
    pub fn drawn_length(&self) -> f64 {
        self.curves.iter().map(Curve::polyline_length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveForm;
    use lyon::geom::point;

    #[test]
    fn test_chaining_anchors() {
        let path = Path::from_records("0 0", &["1 1 2 2 3 3", "4 4 5 5 6 6", "7 7 8 8 9 9"])
            .unwrap();
        let curves = path.curves();
        assert_eq!(curves.len(), 3);
        assert_eq!(curves[0].anchor(), Some(path.origin_id()));
        for i in 1..curves.len() {
            assert_eq!(curves[i].anchor(), Some(curves[i - 1].endpoint()));
            assert!(matches!(curves[i].form(), CurveForm::FourPoint { .. }));
        }
        // origin + 3 control points per curve, shared endpoints not duplicated
        assert_eq!(path.points().len(), 10);
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(
            Path::from_records("0", &["1 2 3 4 5 6"]),
            Err(CamToolError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            Path::from_records("0 0", &["1 2 3 4 5 6", "1 2 3"]),
            Err(CamToolError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_bounds_over_control_points() {
        let path = Path::from_records("0 0", &["1 5 3 -2 4 1"]).unwrap();
        assert_eq!(path.bounds(), Bounds::new(0.0, -2.0, 4.0, 5.0));
    }

    #[test]
    fn test_shared_endpoint_transformed_once() {
        let mut path = Path::from_records("0 0", &["0 1 1 1 1 0", "1 -1 2 -1 2 0"]).unwrap();
        path.move_by(10.0, 0.0);
        let shared = path.curves()[0].endpoint();
        assert_eq!(path.points().position(shared), Some(point(11.0, 0.0)));
        assert_eq!(path.point(shared).unwrap().offset(), (10.0, 0.0));
    }

    #[test]
    fn test_toolpath_points_duplicate_shared_endpoint() {
        let mut path = Path::from_records("0 0", &["0 1 1 1 1 0", "1 -1 2 -1 2 0"]).unwrap();
        path.interpolate(100.0).unwrap();
        let points = path.toolpath_points();
        assert_eq!(
            points,
            vec![
                point(0.0, 0.0),
                point(0.0, 0.0),
                point(1.0, 0.0),
                point(1.0, 0.0),
                point(2.0, 0.0),
            ]
        );
        assert_eq!(path.sample_count(), 4);
    }

    #[test]
    fn test_commands_require_interpolation() {
        let path = Path::from_records("0 0", &["0 1 1 1 1 0"]).unwrap();
        assert!(matches!(
            path.toolpath_commands(3),
            Err(CamToolError::NotInterpolated { path: 3, curve: 0 })
        ));
    }

    #[test]
    fn test_commands_bracket() {
        let mut path = Path::from_records("0 0", &["10 0 10 10 0 10"]).unwrap();
        path.interpolate(5.0).unwrap();
        let commands = path.toolpath_commands(0).unwrap();
        assert_eq!(commands.len(), 4 + 4 + 1);
        assert_eq!(commands[0], MotionCommand::PenUp);
        assert_eq!(commands[1], MotionCommand::TravelFeed);
        assert_eq!(commands[2], MotionCommand::Travel(point(0.0, 0.0)));
        assert_eq!(commands[3], MotionCommand::PenDown);
        assert_eq!(commands[7], MotionCommand::Draw(point(0.0, 10.0)));
        assert_eq!(commands[8], MotionCommand::PenUp);
    }

    #[test]
    fn test_curve_pushed_after_interpolate_is_sampled() {
        let mut path = Path::new(Point::new(0.0, 0.0));
        path.interpolate(1.0).unwrap();
        let curve = path.push_curve([
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 0.0),
        ])
        .unwrap();
        assert_eq!(curve.samples().len(), 4);
        assert_eq!(path.resolution(), Some(1.0));
    }

    #[test]
    fn test_empty_path_commands() {
        let mut path = Path::new(Point::new(2.0, 3.0));
        path.interpolate(1.0).unwrap();
        let commands = path.toolpath_commands(0).unwrap();
        assert_eq!(
            commands,
            vec![
                MotionCommand::PenUp,
                MotionCommand::TravelFeed,
                MotionCommand::Travel(point(2.0, 3.0)),
                MotionCommand::PenDown,
                MotionCommand::PenUp,
            ]
        );
    }
}
