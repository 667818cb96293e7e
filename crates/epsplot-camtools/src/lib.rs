//! # epsplot CAM Tools
//!
//! Geometry and toolpath generation for turning EPS vector artwork into
//! pen plotter G-code.
//!
//! ## Geometry
//!
//! - **Point**: Transformable coordinates that remember where they started
//! - **Curve**: Quadratic and cubic Bezier curves sampled at a chord resolution
//! - **Path**: An origin followed by a chain of curves sharing endpoints
//! - **Group**: Independent paths processed in document order
//! - **Bounds**: Control-point bounding boxes
//!
//! ## Output
//!
//! - **Toolpath**: Pen up/down motion commands and their G-code rendering
//! - **Preview**: Raster rendering of the sampled polylines
//! - **Pen Plotter**: Unit conversion, offset, sampling and emission in one pipeline
//!
//! ## Import
//!
//! - **EPS Import**: Path operators scanned from the PostScript body

pub mod bounds;
pub mod curve;
pub mod eps_import;
pub mod error;
pub mod group;
pub mod path;
pub mod pen_plotter;
pub mod point;
pub mod preview;
pub mod toolpath;

// Re-export commonly used items
pub use bounds::Bounds;
pub use curve::{BezierArc, Curve, CurveForm};
pub use eps_import::{EpsDocument, PathRecord};
pub use error::{CamToolError, CamToolResult, CoordinateError};
pub use group::Group;
pub use path::Path;
pub use pen_plotter::{PenPlotter, PlotStats};
pub use point::{Coord, Point, PointArena, PointId};
pub use preview::{save_preview, PreviewRenderer};
pub use toolpath::{MotionCommand, ToolpathEmitter};
