//! Unit conversion utilities
//!
//! EPS coordinates are expressed in PostScript points (1/72 inch). A toolpath
//! is emitted either in millimeters or in inches, selected by [`MeasurementSystem`].

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PostScript points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// One PostScript point expressed in inches
pub const POINT_TO_INCH: f64 = 1.0 / POINTS_PER_INCH;

/// One PostScript point expressed in millimeters
pub const POINT_TO_MM: f64 = POINT_TO_INCH * MM_PER_INCH;

/// Measurement system of an emitted toolpath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[serde(rename = "mm")]
    Metric,
    /// Imperial system (inches)
    #[serde(rename = "in", alias = "inches")]
    Imperial,
}

impl Default for MeasurementSystem {
    fn default() -> Self {
        Self::Metric
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Self::Metric),
            "in" | "inches" => Ok(Self::Imperial),
            _ => Err(Error::UnknownUnits {
                name: s.to_string(),
            }),
        }
    }
}

impl MeasurementSystem {
    /// Factor converting PostScript points into this system's length unit
    pub fn points_scale(&self) -> f64 {
        match self {
            Self::Metric => POINT_TO_MM,
            Self::Imperial => POINT_TO_INCH,
        }
    }

    /// G-code word selecting this unit system on the controller
    pub fn gcode_word(&self) -> &'static str {
        match self {
            Self::Metric => "G21",
            Self::Imperial => "G20",
        }
    }

    /// Get the unit label ("mm" or "in")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }
}
