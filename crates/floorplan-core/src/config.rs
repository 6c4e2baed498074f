//! Editor constants and tunable configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grid cell size in scene units.
pub const GRID_SIZE: f64 = 20.0;

/// Millimeters represented by one scene unit.
pub const SCALE: f64 = 5.0;

/// Minimum allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum allowed zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom increment for toolbar buttons and wheel steps.
pub const ZOOM_STEP: f64 = 0.1;

/// Default wall height in millimeters.
pub const DEFAULT_WALL_HEIGHT_MM: f64 = 2700.0;

/// Default wall thickness in millimeters.
pub const DEFAULT_WALL_THICKNESS_MM: f64 = 100.0;

/// Endpoint snap radius in scene units (multiplied by zoom at lookup).
pub const ENDPOINT_SNAP_THRESHOLD: f64 = GRID_SIZE * 1.5;

/// Number of most recently committed walls scanned for endpoint snapping.
pub const ENDPOINT_SNAP_WINDOW: usize = 20;

/// Delay before a container resize is applied.
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Convert millimeters to scene units.
pub fn mm_to_units(mm: f64) -> f64 {
    mm / SCALE
}

/// Convert scene units to millimeters.
pub fn units_to_mm(units: f64) -> f64 {
    units * SCALE
}

/// How wall directions are constrained while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnglePolicy {
    /// Walls follow the pointer at any angle.
    #[default]
    Free,
    /// Walls are forced onto the dominant axis (0 or 90 degrees).
    Orthogonal,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunable editor parameters. Every field falls back to the crate constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub grid_size: f64,
    pub scale: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub snap_threshold: f64,
    pub snap_window: usize,
    pub default_wall_height_mm: f64,
    pub default_wall_thickness_mm: f64,
    pub resize_debounce_ms: u64,
    pub angle_policy: AnglePolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            scale: SCALE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            snap_threshold: ENDPOINT_SNAP_THRESHOLD,
            snap_window: ENDPOINT_SNAP_WINDOW,
            default_wall_height_mm: DEFAULT_WALL_HEIGHT_MM,
            default_wall_thickness_mm: DEFAULT_WALL_THICKNESS_MM,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            angle_policy: AnglePolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0.0 {
            return Err(ConfigError::Invalid(format!("gridSize must be positive, got {}", self.grid_size)));
        }
        if self.scale <= 0.0 {
            return Err(ConfigError::Invalid(format!("scale must be positive, got {}", self.scale)));
        }
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds must satisfy 0 < minZoom <= maxZoom, got [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((mm_to_units(900.0) - 180.0).abs() < f64::EPSILON);
        assert!((units_to_mm(400.0) - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "maxZoom": 5.0 }"#).unwrap();
        assert!((config.max_zoom - 5.0).abs() < f64::EPSILON);
        assert!((config.grid_size - GRID_SIZE).abs() < f64::EPSILON);
        assert_eq!(config.snap_window, ENDPOINT_SNAP_WINDOW);
        assert_eq!(config.angle_policy, AnglePolicy::Free);
    }

    #[test]
    fn test_invalid_zoom_bounds_rejected() {
        let result = EditorConfig::from_json(r#"{ "minZoom": 4.0, "maxZoom": 2.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_config_rejected() {
        let result = EditorConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
