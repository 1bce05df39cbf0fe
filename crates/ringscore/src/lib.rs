//! ringscore — scoring and target-face layout for electronic shooting targets.
//!
//! Takes shots recorded by an electronic scoring system (offsets from the
//! center in sub-millimeter units) and produces:
//!
//! 1. **Scores** – decimal ring value and distance factor per shot, best shot,
//!    and a root-sum-square dispersion indicator.
//! 2. **Layout** – ring circles, aiming black and score labels for an air
//!    rifle or air pistol face, scaled to fit the canvas or an explicit zoom.
//! 3. **Frames** – layout plus shot markers and zoom controls, assembled from
//!    an explicit [`ViewState`] by [`RenderCoordinator`].
//!
//! # Public API
//! - [`ResultSet`] holds the loaded panes and answers shooter/pane queries.
//! - [`evaluate`] scores one pane; [`MetricsText`] prints the result.
//! - [`layout`] plans the face geometry; [`RenderCoordinator`] drives redraws.
//!
//! Reading competition files and drawing on a real surface are left to the
//! embedding application.

mod config;
pub mod geometry;
mod layout;
mod model;
mod pane_type;
mod primitives;
mod render;
mod report;
mod scoring;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::RenderConfig;
pub use layout::{
    compute_outer_extent, layout, LayoutError, LayoutPlan, CANVAS_MARGIN_PX, LABELED_RINGS,
};
pub use model::{normalize_timestamp, PaneKey, ResultSet, ResultSetError, Shot, TargetResult};
pub use pane_type::{MarkerThresholds, PaneType};
pub use primitives::{Circle, Color, Disc, Label, Primitive, Rect};
pub use render::{
    hit_zoom_control, marker_primitives, render, zoom_control_primitives, Frame, MarkerBand,
    RenderCoordinator, ViewState, ZoomDirection,
};
pub use report::MetricsText;
pub use scoring::{evaluate, ring_value, shot_factor, BestShot, EvaluationReport, ShotScore};
