//! Error types for the settings crate.
//!
//! This module provides structured error types for plot configuration loading,
//! saving, and validation.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value must be finite and strictly positive.
    #[error("Value out of range for '{key}': {value} (must be finite and > 0)")]
    NotPositive { key: String, value: f64 },

    /// A configuration value must be a finite number.
    #[error("Value out of range for '{key}': {value} (must be finite)")]
    NotFinite { key: String, value: f64 },

    /// The unit system name is not recognized.
    #[error(transparent)]
    Units(#[from] epsplot_core::Error),

    /// A pen command is empty.
    #[error("Pen command '{0}' must not be empty")]
    EmptyCommand(String),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::LoadError("file not found".to_string());
        assert_eq!(err.to_string(), "Failed to load settings: file not found");

        let err = SettingsError::SaveError("read-only".to_string());
        assert_eq!(err.to_string(), "Failed to save settings: read-only");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");

        let err = ConfigError::NotPositive {
            key: "resolution".to_string(),
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range for 'resolution': -1 (must be finite and > 0)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let cfg_err = ConfigError::EmptyCommand("pen_up".to_string());
        let err: SettingsError = cfg_err.into();
        assert!(matches!(err, SettingsError::Config(_)));

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: SettingsError = io_err.into();
        assert!(matches!(err, SettingsError::IoError(_)));
    }
}
