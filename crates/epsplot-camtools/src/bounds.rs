//! Axis-aligned bounding boxes over control points

use crate::point::Coord;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate box holding a single coordinate
    pub fn from_point(at: Coord) -> Self {
        Self::new(at.x, at.y, at.x, at.y)
    }

    /// Box over a sequence of coordinates, `None` when it is empty
    pub fn from_points(points: impl IntoIterator<Item = Coord>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for at in points {
            bounds.include(at);
        }
        Some(bounds)
    }

    /// Widen the box to cover `at`
    ///
    /// Each axis tests the maximum first and only falls through to the minimum
    /// when the value is not a new maximum.
    pub fn include(&mut self, at: Coord) {
        if at.x > self.max_x {
            self.max_x = at.x;
        } else if at.x < self.min_x {
            self.min_x = at.x;
        }

        if at.y > self.max_y {
            self.max_y = at.y;
        } else if at.y < self.min_y {
            self.min_y = at.y;
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether `other` lies entirely within this box, with `tolerance` slack
    pub fn contains(&self, other: &Bounds, tolerance: f64) -> bool {
        other.min_x >= self.min_x - tolerance
            && other.min_y >= self.min_y - tolerance
            && other.max_x <= self.max_x + tolerance
            && other.max_y <= self.max_y + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::geom::point;

    #[test]
    fn test_include_widens_independently_per_axis() {
        let mut b = Bounds::from_point(point(0.0, 0.0));
        b.include(point(5.0, -3.0));
        b.include(point(-2.0, 4.0));
        assert_eq!(b, Bounds::new(-2.0, -3.0, 5.0, 4.0));
        assert_eq!(b.width(), 7.0);
        assert_eq!(b.height(), 7.0);
    }

    #[test]
    fn test_tie_with_max_is_harmless() {
        let mut b = Bounds::from_point(point(1.0, 1.0));
        b.include(point(1.0, 1.0));
        b.include(point(0.5, 1.0));
        assert_eq!(b, Bounds::new(0.5, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_from_points() {
        assert_eq!(Bounds::from_points(Vec::new()), None);
        let b = Bounds::from_points(vec![point(3.0, 1.0), point(-1.0, 2.0), point(0.0, -6.0)]);
        assert_eq!(b, Some(Bounds::new(-1.0, -6.0, 3.0, 2.0)));
    }

    #[test]
    fn test_contains() {
        let outer = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains(&Bounds::new(1.0, 1.0, 9.0, 9.0), 0.0));
        assert!(!outer.contains(&Bounds::new(-1.0, 1.0, 9.0, 9.0), 0.0));
        assert!(outer.contains(&Bounds::new(-0.5, 1.0, 9.0, 10.5), 0.5));
    }
}
