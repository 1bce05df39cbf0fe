//! Ring geometry for a target pane at a given scale.
//!
//! The plan is built fresh for every redraw from the pane type, the spatial
//! extent of the current group and the canvas size. Nothing here draws; the
//! caller forwards the primitives to its surface.

use serde::{Deserialize, Serialize};

use crate::geometry::distance_from_origin;
use crate::model::TargetResult;
use crate::pane_type::PaneType;
use crate::primitives::{Circle, Color, Disc, Label, Primitive};

/// Pixels kept free on each side of the face in auto-fit mode.
pub const CANVAS_MARGIN_PX: f64 = 5.0;
/// Only the outermost rings carry score labels.
pub const LABELED_RINGS: usize = 9;

// ── Error type ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Canvas leaves no drawable area after margins.
    NonPositiveCanvas { width: f64, height: f64 },
    /// Outer extent is negative or not finite.
    InvalidOuterExtent(f64),
    /// Explicit resize factor is zero, negative or not finite.
    InvalidResizeFactor(f64),
    /// Ring table disagrees with the face dimensions.
    RingTable(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveCanvas { width, height } => write!(
                f,
                "canvas {}x{} leaves no drawable area (margin {}px per side)",
                width, height, CANVAS_MARGIN_PX
            ),
            Self::InvalidOuterExtent(v) => write!(f, "invalid outer extent: {}", v),
            Self::InvalidResizeFactor(v) => write!(f, "invalid resize factor: {}", v),
            Self::RingTable(msg) => write!(f, "inconsistent ring table: {}", msg),
        }
    }
}

impl std::error::Error for LayoutError {}

// ── Plan ─────────────────────────────────────────────────────────────────

/// Scaled face geometry ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub pane_type: PaneType,
    /// Pixels per millimeter.
    pub resize_factor: f64,
    /// Diameter the auto-fit scale was (or would have been) derived from, in mm.
    pub outer_diameter_mm: f64,
    /// Canvas center in pixels.
    pub center: [f64; 2],
    /// Filled aiming black.
    pub bullseye: Disc,
    /// Ring boundaries, outermost first.
    pub rings: Vec<Circle>,
    /// Score labels, four per labeled ring (N, S, W, E).
    pub labels: Vec<Label>,
}

impl LayoutPlan {
    /// Primitives in paint order.
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut out = Vec::with_capacity(1 + self.rings.len() + self.labels.len());
        out.push(self.bullseye.into());
        out.extend(self.rings.iter().copied().map(Primitive::from));
        out.extend(self.labels.iter().cloned().map(Primitive::from));
        out
    }
}

/// Largest distance of any shot edge from the center, in mm-equivalent
/// units. Zero when nothing is selected.
pub fn compute_outer_extent(result: Option<&TargetResult>, bullet_diameter_mm: f64) -> f64 {
    let Some(result) = result else {
        return 0.0;
    };
    let mut max_offset = 0.0f64;
    for shot in &result.shots {
        let [x, y] = shot.scaled_xy();
        let offset = distance_from_origin(x, y) + bullet_diameter_mm / 2.0;
        if offset.abs() > max_offset {
            max_offset = offset;
        }
    }
    max_offset
}

/// Lay out the rings of `pane_type` on a `canvas_width` x `canvas_height`
/// canvas.
///
/// With `explicit_resize` set the scale is used verbatim; otherwise it is
/// fitted so that a face of diameter `2 * outer_extent` (or the default face
/// diameter when `outer_extent` is 0) fills the canvas minus margins.
pub fn layout(
    pane_type: PaneType,
    outer_extent: f64,
    canvas_width: f64,
    canvas_height: f64,
    explicit_resize: Option<f64>,
) -> Result<LayoutPlan, LayoutError> {
    pane_type.validate().map_err(LayoutError::RingTable)?;

    if !(canvas_width > 0.0 && canvas_height > 0.0) {
        return Err(LayoutError::NonPositiveCanvas {
            width: canvas_width,
            height: canvas_height,
        });
    }
    if !outer_extent.is_finite() || outer_extent < 0.0 {
        return Err(LayoutError::InvalidOuterExtent(outer_extent));
    }

    let outer_diameter_mm = if outer_extent > 0.0 {
        outer_extent * 2.0
    } else {
        pane_type.default_outer_diameter_mm()
    };

    let resize_factor = match explicit_resize {
        Some(f) if f.is_finite() && f > 0.0 => f,
        Some(f) => return Err(LayoutError::InvalidResizeFactor(f)),
        None => fit_resize_factor(outer_diameter_mm, canvas_width, canvas_height)?,
    };

    let center = [canvas_width / 2.0, canvas_height / 2.0];
    let bullseye = Disc {
        center,
        radius: pane_type.inner_diameter_mm() * resize_factor / 2.0,
        fill: Color::Gray75,
        outline: None,
    };

    let widths = pane_type.ring_widths_mm();
    let mut rings = Vec::with_capacity(widths.len());
    let mut labels = Vec::with_capacity(LABELED_RINGS * 4);
    let mut offset: f64 = widths.iter().sum();
    for (i, width) in widths.iter().rev().enumerate() {
        let radius = offset * resize_factor;
        rings.push(Circle {
            center,
            radius,
            stroke: Color::Black,
        });
        if i < LABELED_RINGS {
            let band = radius - width / 2.0 * resize_factor;
            labels.extend(ring_labels(center, band, i + 1));
        }
        offset -= width;
    }

    tracing::debug!(
        "{} layout: resize={:.4} outer={:.2}mm rings={} labels={}",
        pane_type,
        resize_factor,
        outer_diameter_mm,
        rings.len(),
        labels.len(),
    );

    Ok(LayoutPlan {
        pane_type,
        resize_factor,
        outer_diameter_mm,
        center,
        bullseye,
        rings,
        labels,
    })
}

fn fit_resize_factor(
    outer_diameter_mm: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<f64, LayoutError> {
    let usable = (canvas_width - 2.0 * CANVAS_MARGIN_PX).min(canvas_height - 2.0 * CANVAS_MARGIN_PX);
    if usable <= 0.0 {
        return Err(LayoutError::NonPositiveCanvas {
            width: canvas_width,
            height: canvas_height,
        });
    }
    Ok(usable / outer_diameter_mm)
}

fn ring_labels(center: [f64; 2], band_radius: f64, value: usize) -> [Label; 4] {
    let [cx, cy] = center;
    let text = value.to_string();
    let label = |position: [f64; 2]| Label {
        position,
        text: text.clone(),
        color: Color::Black,
    };
    [
        label([cx, cy - band_radius]),
        label([cx, cy + band_radius]),
        label([cx - band_radius, cy]),
        label([cx + band_radius, cy]),
    ]
}
