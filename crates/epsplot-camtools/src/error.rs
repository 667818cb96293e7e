//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for geometry construction,
//! toolpath emission, and EPS import.

use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A coordinate or curve record could not be parsed.
    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(#[from] CoordinateError),

    /// A path or curve was built from an unsupported origin or anchor.
    #[error("Invalid construction argument: {0}")]
    InvalidConstruction(String),

    /// A numeric parameter is outside its valid range.
    #[error("Invalid value for '{name}': {value}")]
    InvalidParameter { name: String, value: f64 },

    /// The unit system is not recognized.
    #[error("Invalid configuration: {0}")]
    Units(#[from] epsplot_core::Error),

    /// The plot settings failed validation.
    #[error("Invalid configuration: {0}")]
    Settings(#[from] epsplot_settings::SettingsError),

    /// A toolpath was requested before the curves were sampled.
    #[error("Curve {curve} of path {path} has not been interpolated")]
    NotInterpolated { path: usize, curve: usize },

    /// Image processing failed.
    #[error("Image processing error: {0}")]
    ImageError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl CamToolError {
    /// Check if this error comes from configuration rather than geometry
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CamToolError::Units(_) | CamToolError::Settings(_) | CamToolError::InvalidParameter { .. }
        )
    }
}

/// Errors raised while reading numeric coordinate records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// The record does not hold the expected number of values.
    #[error("expected {expected} numbers, found {found} in '{record}'")]
    TokenCount {
        expected: usize,
        found: usize,
        record: String,
    },

    /// A token is not a finite number.
    #[error("'{token}' is not a number")]
    InvalidNumber { token: String },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
