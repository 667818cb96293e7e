//! Transformable points and the arena that owns them
//!
//! A [`Point`] remembers the coordinates it was built with, so any chain of
//! moves and scales can be undone with [`Point::restore`]. Paths keep their
//! points in a [`PointArena`] and curves refer to them by [`PointId`], which
//! lets consecutive curves share an endpoint without copying it.

use crate::error::CoordinateError;
use lyon::geom::{point, Point as Coord2D};

/// A plain 2D coordinate, used for samples and emitted positions
pub type Coord = Coord2D<f64>;

/// A 2D point with memory of its construction-time value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    original: (f64, f64),
    offset: (f64, f64),
    scale: (f64, f64),
}

impl Point {
    /// Create a point at (x, y)
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            original: (x, y),
            offset: (0.0, 0.0),
            scale: (1.0, 1.0),
        }
    }

    /// Parse a point from a text coordinate pair such as `"12.5 40"`
    pub fn parse(text: &str) -> Result<Self, CoordinateError> {
        let values = parse_numbers(text, 2)?;
        Ok(Self::new(values[0], values[1]))
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Current position as a plain coordinate
    pub fn position(&self) -> Coord {
        point(self.x, self.y)
    }

    /// Coordinates captured at construction
    pub fn original(&self) -> Coord {
        point(self.original.0, self.original.1)
    }

    /// Accumulated translation since construction or the last restore
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Accumulated scale factors since construction or the last restore
    pub fn scale_factors(&self) -> (f64, f64) {
        self.scale
    }

    /// Translate by (dx, dy)
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    /// Scale componentwise by (sx, sy)
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.x *= sx;
        self.y *= sy;
        self.scale.0 *= sx;
        self.scale.1 *= sy;
    }

    /// Scale both axes by the same factor
    pub fn scale_uniform(&mut self, factor: f64) {
        self.scale(factor, factor);
    }

    /// Snap back to the construction-time coordinates and clear the deltas
    pub fn restore(&mut self) {
        self.x = self.original.0;
        self.y = self.original.1;
        self.offset = (0.0, 0.0);
        self.scale = (1.0, 1.0);
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Parse exactly `expected` numeric tokens separated by whitespace or commas
pub fn parse_numbers(text: &str, expected: usize) -> Result<Vec<f64>, CoordinateError> {
    let values = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(CoordinateError::InvalidNumber {
                token: token.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != expected {
        return Err(CoordinateError::TokenCount {
            expected,
            found: values.len(),
            record: text.trim().to_string(),
        });
    }

    Ok(values)
}

/// Handle to a point stored in a [`PointArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId(usize);

impl PointId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owning storage for the points of one path
#[derive(Debug, Clone, Default)]
pub struct PointArena {
    points: Vec<Point>,
}

impl PointArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a point and return its handle
    pub fn insert(&mut self, point: Point) -> PointId {
        self.points.push(point);
        PointId(self.points.len() - 1)
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.0)
    }

    pub fn get_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.0)
    }

    pub fn contains(&self, id: PointId) -> bool {
        id.0 < self.points.len()
    }

    /// Current position of a stored point, `None` for a handle from another arena
    pub fn position(&self, id: PointId) -> Option<Coord> {
        self.get(id).map(Point::position)
    }

    /// Position of a handle minted by this arena's `insert`
    pub(crate) fn at(&self, id: PointId) -> Coord {
        self.points[id.0].position()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
