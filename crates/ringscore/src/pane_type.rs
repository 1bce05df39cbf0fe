//! Target face tables for the supported pane types.
//!
//! Ring widths are listed innermost first and measured in millimeters. Their
//! sum is the outer radius of the scoring area; the aiming black covers every
//! ring inside `inner_diameter_mm / 2`.

use serde::{Deserialize, Serialize};

const AIR_RIFLE_RINGS_MM: [f64; 10] = [0.25, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5];
const AIR_PISTOL_RINGS_MM: [f64; 11] = [2.5, 3.25, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0];

const BOUNDARY_EPS_MM: f64 = 1e-9;

/// Supported target faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneType {
    #[default]
    AirRifle,
    AirPistol,
}

/// Marker color band limits, in `factor * 100` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerThresholds {
    /// Below this a marker is drawn in the inner (red) band.
    pub inner: f64,
    /// Below this a marker is drawn in the middle (yellow) band.
    pub outer: f64,
}

impl PaneType {
    pub const ALL: [PaneType; 2] = [PaneType::AirRifle, PaneType::AirPistol];

    /// Ring widths in mm, innermost first.
    pub fn ring_widths_mm(self) -> &'static [f64] {
        match self {
            Self::AirRifle => &AIR_RIFLE_RINGS_MM,
            Self::AirPistol => &AIR_PISTOL_RINGS_MM,
        }
    }

    /// Diameter of the filled aiming black (mm).
    pub fn inner_diameter_mm(self) -> f64 {
        match self {
            Self::AirRifle => 30.5,
            Self::AirPistol => 59.5,
        }
    }

    /// Diameter of the whole face, used when no shots widen the view (mm).
    pub fn default_outer_diameter_mm(self) -> f64 {
        match self {
            Self::AirRifle => 45.5,
            Self::AirPistol => 155.5,
        }
    }

    /// Factor units per ring point. Same scale as the shot factor.
    pub fn scoring_divisor(self) -> f64 {
        match self {
            Self::AirRifle => 250.0,
            Self::AirPistol => 800.0,
        }
    }

    /// Marker coloring bands. These compare against `factor * 100`, not
    /// against `factor`, so they do not share a scale with
    /// [`Self::scoring_divisor`].
    pub fn marker_thresholds(self) -> MarkerThresholds {
        match self {
            Self::AirRifle => MarkerThresholds {
                inner: 250.0,
                outer: 500.0,
            },
            Self::AirPistol => MarkerThresholds {
                inner: 800.0,
                outer: 1600.0,
            },
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::AirRifle => "Luftgewehr",
            Self::AirPistol => "Luftpistole",
        }
    }

    /// Ring boundary radii in mm, innermost first.
    pub fn boundary_radii_mm(self) -> Vec<f64> {
        self.ring_widths_mm()
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect()
    }

    /// Check that the ring table agrees with the face dimensions.
    pub fn validate(self) -> Result<(), String> {
        validate_ring_table(
            self.ring_widths_mm(),
            self.inner_diameter_mm(),
            self.default_outer_diameter_mm(),
        )
        .map_err(|e| format!("{:?}: {}", self, e))
    }
}

/// The rings (innermost first) must add up to half of `outer_diameter_mm` and
/// the aiming black of `inner_diameter_mm` must end exactly on a ring boundary.
pub(crate) fn validate_ring_table(
    widths: &[f64],
    inner_diameter_mm: f64,
    outer_diameter_mm: f64,
) -> Result<(), String> {
    if widths.is_empty() || widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        return Err("ring widths must be finite and > 0".to_string());
    }

    let outer_radius: f64 = widths.iter().sum();
    let expected = outer_diameter_mm / 2.0;
    if (outer_radius - expected).abs() > BOUNDARY_EPS_MM {
        return Err(format!(
            "ring widths sum to {:.4}mm but the outer radius is {:.4}mm",
            outer_radius, expected
        ));
    }

    let inner_radius = inner_diameter_mm / 2.0;
    let mut boundary = 0.0;
    let on_boundary = widths.iter().any(|w| {
        boundary += w;
        (boundary - inner_radius).abs() <= BOUNDARY_EPS_MM
    });
    if !on_boundary {
        return Err(format!(
            "inner diameter {:.4}mm does not end on a ring boundary",
            inner_diameter_mm
        ));
    }

    Ok(())
}

impl std::fmt::Display for PaneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
