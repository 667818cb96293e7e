//! Error handling for epsplot core types
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for the core crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested unit system is not one of the recognized names
    #[error("Unknown unit system: {name} (expected \"mm\", \"in\" or \"inches\")")]
    UnknownUnits {
        /// The name that failed to resolve.
        name: String,
    },
}

impl Error {
    /// Check if this is a unit system error
    pub fn is_units_error(&self) -> bool {
        matches!(self, Error::UnknownUnits { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_units_display() {
        let err = Error::UnknownUnits {
            name: "furlongs".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown unit system: furlongs (expected \"mm\", \"in\" or \"inches\")"
        );
        assert!(err.is_units_error());
    }
}
