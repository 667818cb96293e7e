//! Bezier curve segments and their subdivision into samples
//!
//! A [`Curve`] stores handles to its three control points in a [`PointArena`].
//! When it is anchored to a preceding point (the path origin or the previous
//! curve's endpoint) it evaluates as a cubic through four points; without an
//! anchor it evaluates as a quadratic through its three control points.

use crate::error::{CamToolError, CamToolResult};
use crate::point::{parse_numbers, Coord, Point, PointArena, PointId};
use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};

/// Degree of a curve, selected by the presence of an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveForm {
    /// Quadratic through p1, p2, p3
    ThreePoint,
    /// Cubic from the anchor through p1, p2 to p3
    FourPoint { anchor: PointId },
}

/// A curve resolved to concrete coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BezierArc {
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
}

impl BezierArc {
    /// Point at parameter `t` in `[0, 1]` (De Casteljau blend)
    pub fn sample(&self, t: f64) -> Coord {
        match self {
            Self::Quadratic(segment) => segment.sample(t),
            Self::Cubic(segment) => segment.sample(t),
        }
    }
}

/// One curve segment of a path
#[derive(Debug, Clone)]
pub struct Curve {
    form: CurveForm,
    p1: PointId,
    p2: PointId,
    p3: PointId,
    resolution: Option<f64>,
    samples: Vec<Coord>,
}

impl Curve {
    /// Add three control points to `arena` and build a quadratic curve over them
    pub fn three_point(arena: &mut PointArena, controls: [Point; 3]) -> Self {
        let [p1, p2, p3] = controls.map(|p| arena.insert(p));
        Self::with_form(CurveForm::ThreePoint, p1, p2, p3)
    }

    /// Add three control points to `arena` and build a cubic curve anchored at `anchor`
    pub fn four_point(
        arena: &mut PointArena,
        anchor: PointId,
        controls: [Point; 3],
    ) -> CamToolResult<Self> {
        if !arena.contains(anchor) {
            return Err(CamToolError::InvalidConstruction(format!(
                "anchor point #{} does not exist",
                anchor.index()
            )));
        }
        let [p1, p2, p3] = controls.map(|p| arena.insert(p));
        Ok(Self::with_form(CurveForm::FourPoint { anchor }, p1, p2, p3))
    }

    /// Build an anchored curve from a record of six numbers: `x1 y1 x2 y2 x3 y3`
    pub fn from_record(
        arena: &mut PointArena,
        anchor: PointId,
        record: &str,
    ) -> CamToolResult<Self> {
        let v = parse_numbers(record, 6)?;
        Self::four_point(
            arena,
            anchor,
            [
                Point::new(v[0], v[1]),
                Point::new(v[2], v[3]),
                Point::new(v[4], v[5]),
            ],
        )
    }

    fn with_form(form: CurveForm, p1: PointId, p2: PointId, p3: PointId) -> Self {
        Self {
            form,
            p1,
            p2,
            p3,
            resolution: None,
            samples: Vec::new(),
        }
    }

    pub fn form(&self) -> CurveForm {
        self.form
    }

    /// The point this curve starts from, if it is anchored
    pub fn anchor(&self) -> Option<PointId> {
        match self.form {
            CurveForm::ThreePoint => None,
            CurveForm::FourPoint { anchor } => Some(anchor),
        }
    }

    /// Handles of p1, p2 and p3
    pub fn controls(&self) -> [PointId; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Handle of p3, the anchor for a following curve
    pub fn endpoint(&self) -> PointId {
        self.p3
    }

    /// Resolve handles into a concrete Bezier segment
    ///
    /// `None` when a handle does not belong to `arena`.
    pub fn arc(&self, arena: &PointArena) -> Option<BezierArc> {
        let p1 = arena.position(self.p1)?;
        let p2 = arena.position(self.p2)?;
        let p3 = arena.position(self.p3)?;
        let arc = match self.form {
            CurveForm::ThreePoint => BezierArc::Quadratic(QuadraticBezierSegment {
                from: p1,
                ctrl: p2,
                to: p3,
            }),
            CurveForm::FourPoint { anchor } => BezierArc::Cubic(CubicBezierSegment {
                from: arena.position(anchor)?,
                ctrl1: p1,
                ctrl2: p2,
                to: p3,
            }),
        };
        Some(arc)
    }

    /// Point on the curve at parameter `t`
    pub fn evaluate(&self, arena: &PointArena, t: f64) -> Option<Coord> {
        self.arc(arena).map(|arc| arc.sample(t))
    }

    /// Distance from p1 to p3
    ///
    /// This is the chord of the control polygon, not the arc length, and it
    /// ignores the anchor. It only steers sampling density.
    pub fn chord_length(&self, arena: &PointArena) -> Option<f64> {
        let p1 = arena.position(self.p1)?;
        let p3 = arena.position(self.p3)?;
        Some((p3.x - p1.x).hypot(p3.y - p1.y))
    }

    /// Number of intervals used at `resolution`, never less than one
    pub fn sample_intervals(&self, arena: &PointArena, resolution: f64) -> Option<usize> {
        let chord = self.chord_length(arena)?;
        Some(((chord / resolution).ceil() as usize).max(1))
    }

    /// Subdivide into `intervals + 1` samples, endpoints included
    ///
    /// The resolution is remembered so later transforms re-sample on their own.
    pub fn interpolate(&mut self, arena: &PointArena, resolution: f64) -> CamToolResult<&[Coord]> {
        validate_resolution(resolution)?;
        if self.arc(arena).is_none() {
            return Err(CamToolError::InvalidConstruction(
                "curve points are not stored in the given arena".to_string(),
            ));
        }
        self.resolution = Some(resolution);
        self.resample(arena);
        Ok(self.samples.as_slice())
    }

    fn resample(&mut self, arena: &PointArena) {
        self.samples.clear();
        let Some(resolution) = self.resolution else {
            return;
        };
        let (Some(arc), Some(intervals)) =
            (self.arc(arena), self.sample_intervals(arena, resolution))
        else {
            return;
        };
        self.samples = (0..=intervals)
            .map(|i| arc.sample(i as f64 / intervals as f64))
            .collect();
    }

    /// Samples from the last interpolation; empty if never interpolated
    pub fn samples(&self) -> &[Coord] {
        &self.samples
    }

    pub fn is_interpolated(&self) -> bool {
        self.resolution.is_some()
    }

    /// Translate p1, p2 and p3; the anchor is left to its owner
    pub fn move_by(&mut self, arena: &mut PointArena, dx: f64, dy: f64) {
        self.for_each_control(arena, |p| p.move_by(dx, dy));
        self.resample(arena);
    }

    /// Scale p1, p2 and p3 componentwise
    pub fn scale(&mut self, arena: &mut PointArena, sx: f64, sy: f64) {
        self.for_each_control(arena, |p| p.scale(sx, sy));
        self.resample(arena);
    }

    /// Restore p1, p2 and p3 to their construction-time positions
    pub fn restore(&mut self, arena: &mut PointArena) {
        self.for_each_control(arena, Point::restore);
        self.resample(arena);
    }

    fn for_each_control(&self, arena: &mut PointArena, mut f: impl FnMut(&mut Point)) {
        for id in self.controls() {
            if let Some(p) = arena.get_mut(id) {
                f(p);
            }
        }
    }

    /// Length of the sampled polyline
    pub fn polyline_length(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| (w[1] - w[0]).length())
            .sum()
    }
}

/// Reject resolutions that cannot produce a finite sample count
pub(crate) fn validate_resolution(resolution: f64) -> CamToolResult<()> {
    if resolution > 0.0 && resolution.is_finite() {
        Ok(())
    } else {
        Err(CamToolError::InvalidParameter {
            name: "resolution".to_string(),
            value: resolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::geom::point;

    fn quadratic(arena: &mut PointArena) -> Curve {
        Curve::three_point(
            arena,
            [
                Point::new(0.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(4.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_three_point_evaluation() {
        let mut arena = PointArena::new();
        let curve = quadratic(&mut arena);
        assert_eq!(curve.form(), CurveForm::ThreePoint);
        assert_eq!(curve.anchor(), None);
        assert_eq!(curve.evaluate(&arena, 0.5), Some(point(2.0, 1.0)));
        assert_eq!(curve.evaluate(&arena, 0.0), Some(point(0.0, 0.0)));
        assert_eq!(curve.evaluate(&arena, 1.0), Some(point(4.0, 0.0)));
    }

    #[test]
    fn test_four_point_evaluation_differs_from_three_point() {
        let mut arena = PointArena::new();
        let anchor = arena.insert(Point::new(0.0, 0.0));
        let cubic = Curve::four_point(
            &mut arena,
            anchor,
            [
                Point::new(0.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 0.0),
            ],
        )
        .unwrap();
        // 0.125*0 + 0.375*(0,2) + 0.375*(4,2) + 0.125*(4,0)
        assert_eq!(cubic.evaluate(&arena, 0.5), Some(point(2.0, 1.5)));

        let mut other = PointArena::new();
        let quad = Curve::three_point(
            &mut other,
            [
                Point::new(0.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 0.0),
            ],
        );
        assert_eq!(quad.evaluate(&other, 0.0), Some(point(0.0, 2.0)));
        assert_ne!(quad.evaluate(&other, 0.5), cubic.evaluate(&arena, 0.5));
    }

    #[test]
    fn test_four_point_rejects_unknown_anchor() {
        let mut foreign = PointArena::new();
        foreign.insert(Point::new(0.0, 0.0));
        let stray = foreign.insert(Point::new(1.0, 1.0));

        let mut arena = PointArena::new();
        let result = Curve::four_point(
            &mut arena,
            stray,
            [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)],
        );
        assert!(matches!(result, Err(CamToolError::InvalidConstruction(_))));
    }

    #[test]
    fn test_from_record_token_count() {
        let mut arena = PointArena::new();
        let anchor = arena.insert(Point::new(0.0, 0.0));
        assert!(Curve::from_record(&mut arena, anchor, "1 2 3 4 5 6").is_ok());
        assert!(matches!(
            Curve::from_record(&mut arena, anchor, "1 2 3 4 5"),
            Err(CamToolError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            Curve::from_record(&mut arena, anchor, "1 2 3 4 5 x"),
            Err(CamToolError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_interpolate_sample_count() {
        let mut arena = PointArena::new();
        let anchor = arena.insert(Point::new(0.0, 0.0));
        let mut curve = Curve::from_record(&mut arena, anchor, "10 0 10 10 0 10").unwrap();

        // chord (10,0)-(0,10) is ~14.14, so ceil(14.14 / 5) = 3 intervals
        let samples = curve.interpolate(&arena, 5.0).unwrap().to_vec();
        assert_eq!(samples.len(), 4);
        assert_eq!(Some(samples[0]), curve.evaluate(&arena, 0.0));
        assert_eq!(Some(samples[3]), curve.evaluate(&arena, 1.0));
        assert_eq!(samples[0], point(0.0, 0.0));
        assert_eq!(samples[3], point(0.0, 10.0));

        let expected = |r: f64| ((200.0f64.sqrt() / r).ceil() as usize).max(1) + 1;
        for r in [0.1, 0.7, 2.0, 14.0, 15.0, 100.0] {
            assert_eq!(curve.interpolate(&arena, r).unwrap().len(), expected(r));
        }
    }

    #[test]
    fn test_degenerate_chord_still_two_samples() {
        let mut arena = PointArena::new();
        let anchor = arena.insert(Point::new(-3.0, 0.0));
        let mut curve = Curve::from_record(&mut arena, anchor, "1 1 5 5 1 1").unwrap();
        assert_eq!(curve.chord_length(&arena), Some(0.0));
        assert_eq!(curve.interpolate(&arena, 1.0).unwrap().len(), 2);
    }

    #[test]
    fn test_interpolate_rejects_bad_resolution() {
        let mut arena = PointArena::new();
        let mut curve = quadratic(&mut arena);
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                curve.interpolate(&arena, r),
                Err(CamToolError::InvalidParameter { .. })
            ));
        }
        assert!(!curve.is_interpolated());
    }

    #[test]
    fn test_transform_resamples_and_leaves_anchor() {
        let mut arena = PointArena::new();
        let anchor = arena.insert(Point::new(0.0, 0.0));
        let mut curve = Curve::from_record(&mut arena, anchor, "0 1 1 1 1 0").unwrap();
        curve.interpolate(&arena, 0.5).unwrap();
        let before = curve.samples().len();

        curve.scale(&mut arena, 10.0, 10.0);
        assert_eq!(arena.position(anchor), Some(point(0.0, 0.0)));
        assert_eq!(arena.position(curve.endpoint()), Some(point(10.0, 0.0)));
        assert!(curve.samples().len() > before);
        assert_eq!(*curve.samples().last().unwrap(), point(10.0, 0.0));

        curve.move_by(&mut arena, 1.0, 2.0);
        assert_eq!(arena.position(anchor), Some(point(0.0, 0.0)));
        assert_eq!(*curve.samples().last().unwrap(), point(11.0, 2.0));

        curve.restore(&mut arena);
        assert_eq!(curve.samples().len(), before);
        assert_eq!(*curve.samples().last().unwrap(), point(1.0, 0.0));
    }

    #[test]
    fn test_polyline_length_of_straight_curve() {
        let mut arena = PointArena::new();
        let anchor = arena.insert(Point::new(0.0, 0.0));
        let mut curve = Curve::from_record(&mut arena, anchor, "0 0 8 0 8 0").unwrap();
        curve.interpolate(&arena, 1.0).unwrap();
        assert!((curve.polyline_length() - 8.0).abs() < 1e-9);
        assert_eq!(curve.samples()[0], point(0.0, 0.0));
        assert_eq!(*curve.samples().last().unwrap(), point(8.0, 0.0));
    }

    #[test]
    fn test_foreign_arena_does_not_resolve() {
        let mut arena = PointArena::new();
        let anchor = arena.insert(Point::new(0.0, 0.0));
        let mut curve = Curve::from_record(&mut arena, anchor, "10 0 10 10 0 10").unwrap();

        let mut other = PointArena::new();
        other.insert(Point::new(5.0, 5.0));
        assert_eq!(curve.arc(&other), None);
        assert_eq!(curve.evaluate(&other, 0.5), None);
        assert_eq!(curve.chord_length(&other), None);
        assert!(matches!(
            curve.interpolate(&other, 1.0),
            Err(CamToolError::InvalidConstruction(_))
        ));
        assert!(!curve.is_interpolated());
        assert!(curve.samples().is_empty());
    }
}
