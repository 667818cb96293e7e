//! epsplot Settings Crate
//!
//! Handles plot configuration: defaults, validation, and JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{default_config_path, PlotSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
