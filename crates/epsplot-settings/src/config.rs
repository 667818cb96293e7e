//! Plot configuration
//!
//! Every option that shapes a plotting run lives in [`PlotSettings`]:
//! - `resolution`: curve sampling density, in output units between samples
//! - `units`: output unit system (`"mm"`, `"in"` or `"inches"`)
//! - `offset_x` / `offset_y`: translation applied after unit scaling
//! - `preview_scale`: magnification of the raster preview only
//! - `travel_feed`: feed rate selected before each travel move
//! - `pen_up` / `pen_down`: tool lift and lower commands
//!
//! Settings are stored as JSON or TOML, selected by file extension.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use epsplot_core::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options for a single EPS to G-code run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Maximum chord length between curve samples
    pub resolution: f64,
    /// Output unit system name
    pub units: String,
    /// X offset applied after unit scaling
    pub offset_x: f64,
    /// Y offset applied after unit scaling
    pub offset_y: f64,
    /// Scale factor of the raster preview
    pub preview_scale: f64,
    /// Feed rate for travel moves (units/min)
    pub travel_feed: f64,
    /// Command that lifts the pen off the surface
    pub pen_up: String,
    /// Command that lowers the pen onto the surface
    pub pen_down: String,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            resolution: 0.5,
            units: "mm".to_string(),
            offset_x: 0.0,
            offset_y: 0.0,
            preview_scale: 1.0,
            travel_feed: 3000.0,
            pen_up: "M5".to_string(),
            pen_down: "M3".to_string(),
        }
    }
}

impl PlotSettings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the configured unit system
    pub fn measurement_system(&self) -> SettingsResult<MeasurementSystem> {
        self.units
            .parse::<MeasurementSystem>()
            .map_err(|e| SettingsError::Config(ConfigError::Units(e)))
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let settings: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        self.measurement_system()?;

        for (key, value) in [
            ("resolution", self.resolution),
            ("preview_scale", self.preview_scale),
            ("travel_feed", self.travel_feed),
        ] {
            // NaN fails this comparison too
            if !(value > 0.0) || value.is_infinite() {
                return Err(ConfigError::NotPositive {
                    key: key.to_string(),
                    value,
                }
                .into());
            }
        }

        for (key, value) in [("offset_x", self.offset_x), ("offset_y", self.offset_y)] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite {
                    key: key.to_string(),
                    value,
                }
                .into());
            }
        }

        if self.pen_up.trim().is_empty() {
            return Err(ConfigError::EmptyCommand("pen_up".to_string()).into());
        }
        if self.pen_down.trim().is_empty() {
            return Err(ConfigError::EmptyCommand("pen_down".to_string()).into());
        }

        Ok(())
    }
}

/// Default location of the settings file: `<config dir>/epsplot/settings.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("epsplot")
        .join("settings.toml")
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
