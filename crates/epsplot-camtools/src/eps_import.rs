//! EPS path extraction
//!
//! Scans the PostScript body of an EPS file for path construction operators
//! and turns every subpath into a [`PathRecord`]: an origin coordinate pair
//! plus one 6-number record per curve segment. Straight segments become
//! curves whose control points sit on the segment's ends.
//!
//! Recognized operators:
//! - `m` / `moveto`, `rmoveto`: start a new subpath
//! - `c` / `C` / `curveto`, `rcurveto`: cubic segment
//! - `v` / `V`: cubic whose first control point is the current point
//! - `y` / `Y`: cubic whose second control point is the endpoint
//! - `l` / `L` / `lineto`, `rlineto`: straight segment
//! - `h` / `H` / `closepath`: straight segment back to the subpath start
//!
//! Any other token clears the operand stack. Prolog, setup and resource
//! sections are skipped.

use crate::bounds::Bounds;
use crate::error::{CamToolError, CamToolResult, CoordinateError};
use crate::group::Group;
use crate::path::Path;
use crate::point::parse_numbers;
use regex::Regex;
use std::path::Path as StdPath;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?$").expect("invalid number regex")
});
static SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^%%(Begin|End)(Prolog|Setup|Resource|ProcSet)\b").expect("invalid section regex")
});
static HIRES_BBOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^%%HiResBoundingBox:(.*)$").expect("invalid hires bbox regex")
});
static BBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^%%BoundingBox:(.*)$").expect("invalid bbox regex"));

/// One subpath as text records, ready for [`Path::from_records`]
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    /// Origin as `"x y"`
    pub origin: String,
    /// Curve records as `"x1 y1 x2 y2 x3 y3"`
    pub curves: Vec<String>,
}

impl PathRecord {
    /// Build the chained path this record describes
    pub fn to_path(&self) -> CamToolResult<Path> {
        Path::from_records(&self.origin, self.curves.as_slice())
    }
}

/// Path geometry extracted from an EPS document
#[derive(Debug, Clone, Default)]
pub struct EpsDocument {
    /// `%%HiResBoundingBox`, or `%%BoundingBox` when the former is absent
    pub bounding_box: Option<Bounds>,
    /// Subpaths in document order
    pub records: Vec<PathRecord>,
}

impl EpsDocument {
    /// Read and scan an EPS file
    pub fn from_file<P: AsRef<StdPath>>(path: P) -> CamToolResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        // DOS EPS files carry a binary preview; only the PostScript text matters
        let text = String::from_utf8_lossy(&bytes);
        let document = Self::parse(&text)?;
        tracing::info!(
            file = %path.display(),
            paths = document.records.len(),
            "imported EPS document"
        );
        Ok(document)
    }

    /// Scan EPS text
    pub fn parse(text: &str) -> CamToolResult<Self> {
        let bounding_box = Self::parse_bounding_box(text);

        let mut scanner = PathScanner::default();
        let mut skip_depth = 0usize;

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = line.trim();

            if let Some(caps) = SECTION.captures(line) {
                if &caps[1] == "Begin" {
                    skip_depth += 1;
                } else {
                    skip_depth = skip_depth.saturating_sub(1);
                }
                continue;
            }
            if skip_depth > 0 || line.starts_with('%') {
                continue;
            }

            let code = line.split('%').next().unwrap_or_default();
            for token in code.split_whitespace() {
                if NUMBER.is_match(token) {
                    let value = token.parse::<f64>().map_err(|_| CoordinateError::InvalidNumber {
                        token: token.to_string(),
                    })?;
                    scanner.operands.push(value);
                } else {
                    scanner.operator(token, line_number)?;
                }
            }
        }

        let records = scanner.finish();
        tracing::debug!(
            paths = records.len(),
            curves = records.iter().map(|r| r.curves.len()).sum::<usize>(),
            "scanned EPS body"
        );

        Ok(Self {
            bounding_box,
            records,
        })
    }

    fn parse_bounding_box(text: &str) -> Option<Bounds> {
        for re in [&*HIRES_BBOX, &*BBOX] {
            if let Some(caps) = re.captures(text) {
                match parse_numbers(&caps[1], 4) {
                    Ok(v) => return Some(Bounds::new(v[0], v[1], v[2], v[3])),
                    Err(e) => tracing::warn!("ignoring bounding box comment: {}", e),
                }
            }
        }
        None
    }

    /// Build a group with one path per record
    pub fn to_group(&self) -> CamToolResult<Group> {
        self.records.iter().map(PathRecord::to_path).collect()
    }
}

#[derive(Debug, Default)]
struct PathScanner {
    operands: Vec<f64>,
    current: Option<PathRecord>,
    start: (f64, f64),
    point: (f64, f64),
    records: Vec<PathRecord>,
}

impl PathScanner {
    fn operator(&mut self, op: &str, line: usize) -> CamToolResult<()> {
        match op {
            "m" | "moveto" => {
                let [x, y] = self.take::<2>(op)?;
                self.begin(x, y);
            }
            "rmoveto" => {
                let [dx, dy] = self.take::<2>(op)?;
                self.begin(self.point.0 + dx, self.point.1 + dy);
            }
            "l" | "L" | "lineto" => {
                let [x, y] = self.take::<2>(op)?;
                self.line_to(x, y, op, line)?;
            }
            "rlineto" => {
                let [dx, dy] = self.take::<2>(op)?;
                self.line_to(self.point.0 + dx, self.point.1 + dy, op, line)?;
            }
            "c" | "C" | "curveto" => {
                let v = self.take::<6>(op)?;
                self.curve_to(v, op, line)?;
            }
            "rcurveto" => {
                let mut v = self.take::<6>(op)?;
                for pair in v.chunks_mut(2) {
                    pair[0] += self.point.0;
                    pair[1] += self.point.1;
                }
                self.curve_to(v, op, line)?;
            }
            "v" | "V" => {
                let [x2, y2, x3, y3] = self.take::<4>(op)?;
                let (px, py) = self.point;
                self.curve_to([px, py, x2, y2, x3, y3], op, line)?;
            }
            "y" | "Y" => {
                let [x1, y1, x3, y3] = self.take::<4>(op)?;
                self.curve_to([x1, y1, x3, y3, x3, y3], op, line)?;
            }
            "h" | "H" | "closepath" => {
                self.operands.clear();
                if self.current.is_some() && self.point != self.start {
                    let (sx, sy) = self.start;
                    self.line_to(sx, sy, op, line)?;
                }
            }
            _ => {
                if !self.operands.is_empty() {
                    tracing::trace!(operator = op, line, "discarding operands");
                }
                self.operands.clear();
            }
        }
        Ok(())
    }

    /// Pop exactly N operands for `op`
    fn take<const N: usize>(&mut self, op: &str) -> Result<[f64; N], CoordinateError> {
        let operands = std::mem::take(&mut self.operands);
        <[f64; N]>::try_from(operands.as_slice()).map_err(|_| CoordinateError::TokenCount {
            expected: N,
            found: operands.len(),
            record: format!("{} {}", join(&operands), op),
        })
    }

    fn begin(&mut self, x: f64, y: f64) {
        self.close_current();
        self.current = Some(PathRecord {
            origin: join(&[x, y]),
            curves: Vec::new(),
        });
        self.start = (x, y);
        self.point = (x, y);
    }

    fn line_to(&mut self, x: f64, y: f64, op: &str, line: usize) -> CamToolResult<()> {
        let (px, py) = self.point;
        self.curve_to([px, py, x, y, x, y], op, line)
    }

    fn curve_to(&mut self, v: [f64; 6], op: &str, line: usize) -> CamToolResult<()> {
        let Some(current) = self.current.as_mut() else {
            return Err(CamToolError::InvalidConstruction(format!(
                "line {}: '{}' without a current point",
                line, op
            )));
        };
        current.curves.push(join(&v));
        self.point = (v[4], v[5]);
        Ok(())
    }

    fn close_current(&mut self) {
        if let Some(record) = self.current.take() {
            if record.curves.is_empty() {
                tracing::debug!(origin = %record.origin, "dropping subpath without segments");
            } else {
                self.records.push(record);
            }
        }
    }

    fn finish(mut self) -> Vec<PathRecord> {
        self.close_current();
        self.records
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
