//! Viewer configuration.

use std::path::Path;

use crate::pane_type::PaneType;

/// Tunables for rendering and zoom behaviour.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Pellet diameter drawn for each shot (mm).
    pub bullet_diameter_mm: f64,
    /// Scale multiplier applied per zoom-in step.
    pub zoom_in_step: f64,
    /// Scale multiplier applied per zoom-out step.
    pub zoom_out_step: f64,
    /// Canvas size [width, height] before the first resize event.
    pub initial_canvas: [f64; 2],
    /// Face selected at startup.
    pub pane_type: PaneType,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bullet_diameter_mm: 4.5,
            zoom_in_step: 1.2,
            zoom_out_step: 0.8,
            initial_canvas: [200.0, 200.0],
            pane_type: PaneType::AirRifle,
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.bullet_diameter_mm.is_finite() || self.bullet_diameter_mm < 0.0 {
            return Err("bullet_diameter_mm must be finite and >= 0".to_string());
        }
        if !self.zoom_in_step.is_finite() || self.zoom_in_step <= 1.0 {
            return Err("zoom_in_step must be finite and > 1".to_string());
        }
        if !self.zoom_out_step.is_finite() || self.zoom_out_step <= 0.0 || self.zoom_out_step >= 1.0
        {
            return Err("zoom_out_step must be in (0, 1)".to_string());
        }
        if self.initial_canvas.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err("initial_canvas dimensions must be finite and > 0".to_string());
        }
        Ok(())
    }
}
