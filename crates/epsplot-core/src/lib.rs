//! # epsplot Core
//!
//! Core types shared by the epsplot crates: the measurement systems a toolpath
//! can be emitted in, the PostScript point conversion constants, and the core
//! error type.

pub mod error;
pub mod units;

pub use error::{Error, Result};
pub use units::{MeasurementSystem, MM_PER_INCH, POINTS_PER_INCH, POINT_TO_INCH, POINT_TO_MM};
