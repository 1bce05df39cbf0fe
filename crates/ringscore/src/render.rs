//! View state, zoom handling and frame assembly.
//!
//! [`render`] is a pure function of a [`ViewState`], the loaded results and
//! the configuration. [`RenderCoordinator`] owns the state and applies UI
//! events (selection, pane type, resize, zoom) before re-rendering.

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::layout::{compute_outer_extent, layout, LayoutError, LayoutPlan};
use crate::model::{PaneKey, ResultSet, TargetResult};
use crate::pane_type::PaneType;
use crate::primitives::{Color, Disc, Label, Primitive, Rect};
use crate::scoring::{evaluate, shot_factor, EvaluationReport};

const ZOOM_IN_RECT: Rect = Rect {
    min: [5.0, 5.0],
    max: [25.0, 25.0],
    fill: Color::White,
    outline: Color::Black,
};
const ZOOM_OUT_RECT: Rect = Rect {
    min: [5.0, 25.0],
    max: [25.0, 45.0],
    fill: Color::White,
    outline: Color::Black,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

/// Marker color band of a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerBand {
    Inner,
    Middle,
    Outer,
}

impl MarkerBand {
    /// Classify a raw factor. The comparison runs on `factor * 100`.
    pub fn classify(factor: f64, pane_type: PaneType) -> Self {
        let thresholds = pane_type.marker_thresholds();
        let offset = factor * 100.0;
        if offset < thresholds.inner {
            Self::Inner
        } else if offset < thresholds.outer {
            Self::Middle
        } else {
            Self::Outer
        }
    }

    pub fn fill(self) -> Color {
        match self {
            Self::Inner => Color::Red,
            Self::Middle => Color::Yellow,
            Self::Outer => Color::Blue,
        }
    }

    pub fn text_color(self) -> Color {
        match self {
            Self::Inner | Self::Middle => Color::Black,
            Self::Outer => Color::White,
        }
    }
}

/// Everything a redraw depends on besides the loaded results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub selection: Option<PaneKey>,
    /// Explicit scale; `None` means fit to canvas.
    pub zoom: Option<f64>,
    /// Canvas [width, height] in pixels.
    pub canvas: [f64; 2],
    pub pane_type: PaneType,
}

impl ViewState {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            selection: None,
            zoom: None,
            canvas: config.initial_canvas,
            pane_type: config.pane_type,
        }
    }
}

/// Output of one redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub pane_type: PaneType,
    pub canvas: [f64; 2],
    pub resize_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<PaneKey>,
    pub primitives: Vec<Primitive>,
    /// Present only when the selection resolved to a pane.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<EvaluationReport>,
}

/// Build the frame for `state`.
pub fn render(
    state: &ViewState,
    results: &ResultSet,
    config: &RenderConfig,
) -> Result<Frame, LayoutError> {
    let result = state.selection.as_ref().and_then(|key| results.find(key));
    if let (Some(key), None) = (&state.selection, result) {
        tracing::warn!(
            "no pane for '{}' at {}; drawing empty face",
            key.shooter_name,
            key.timestamp
        );
    }

    let outer_extent = compute_outer_extent(result, config.bullet_diameter_mm);
    let plan = layout(
        state.pane_type,
        outer_extent,
        state.canvas[0],
        state.canvas[1],
        state.zoom,
    )?;

    let mut primitives = plan.primitives();
    let report = result.map(|r| {
        primitives.extend(marker_primitives(r, &plan, config.bullet_diameter_mm));
        evaluate(r, state.pane_type)
    });
    primitives.extend(zoom_control_primitives());

    Ok(Frame {
        pane_type: state.pane_type,
        canvas: state.canvas,
        resize_factor: plan.resize_factor,
        selection: state.selection.clone(),
        primitives,
        report,
    })
}

/// Shot discs with their 1-based index, in acquisition order.
pub fn marker_primitives(
    result: &TargetResult,
    plan: &LayoutPlan,
    bullet_diameter_mm: f64,
) -> Vec<Primitive> {
    let s = plan.resize_factor;
    let [cx, cy] = plan.center;
    let radius = bullet_diameter_mm / 2.0 * s;

    let mut out = Vec::with_capacity(result.shots.len() * 2);
    for (i, shot) in result.shots.iter().enumerate() {
        let [x, y] = shot.scaled_xy();
        // Target y points up, canvas y points down.
        let center = [cx + x * s, cy - y * s];
        let band = MarkerBand::classify(shot_factor(shot), plan.pane_type);
        out.push(
            Disc {
                center,
                radius,
                fill: band.fill(),
                outline: Some(Color::Black),
            }
            .into(),
        );
        out.push(
            Label {
                position: center,
                text: (i + 1).to_string(),
                color: band.text_color(),
            }
            .into(),
        );
    }
    out
}

/// The "+" and "-" buttons in the top-left corner.
pub fn zoom_control_primitives() -> Vec<Primitive> {
    [(ZOOM_IN_RECT, "+"), (ZOOM_OUT_RECT, "-")]
        .into_iter()
        .flat_map(|(rect, text)| {
            [
                Primitive::Rect(rect),
                Primitive::Label(Label {
                    position: rect.center(),
                    text: text.to_string(),
                    color: Color::Black,
                }),
            ]
        })
        .collect()
}

/// Zoom control under a canvas point, if any.
pub fn hit_zoom_control(x: f64, y: f64) -> Option<ZoomDirection> {
    if ZOOM_IN_RECT.contains(x, y) {
        Some(ZoomDirection::In)
    } else if ZOOM_OUT_RECT.contains(x, y) {
        Some(ZoomDirection::Out)
    } else {
        None
    }
}

/// Holds the view state and re-renders on every event.
#[derive(Debug, Clone)]
pub struct RenderCoordinator {
    results: ResultSet,
    config: RenderConfig,
    state: ViewState,
    /// Scale used by the most recent frame.
    last_resize: Option<f64>,
}

impl RenderCoordinator {
    /// Start with the default selection of `results`.
    pub fn new(results: ResultSet, config: RenderConfig) -> Self {
        let mut state = ViewState::new(&config);
        state.selection = results.default_selection();
        Self {
            results,
            config,
            state,
            last_resize: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the loaded results and jump to their default selection.
    pub fn load(&mut self, results: ResultSet) -> Result<Frame, LayoutError> {
        self.state.selection = results.default_selection();
        self.results = results;
        self.state.zoom = None;
        self.redraw()
    }

    pub fn select_pane(
        &mut self,
        shooter_name: &str,
        pane_timestamp: &str,
    ) -> Result<Frame, LayoutError> {
        self.state.selection = Some(PaneKey::new(shooter_name, pane_timestamp));
        self.state.zoom = None;
        self.redraw()
    }

    /// Select a shooter's earliest pane.
    pub fn select_shooter(&mut self, shooter_name: &str) -> Result<Frame, LayoutError> {
        let timestamp = self
            .results
            .pane_timestamps(shooter_name)
            .into_iter()
            .next()
            .unwrap_or_default();
        self.select_pane(shooter_name, &timestamp)
    }

    pub fn set_pane_type(&mut self, pane_type: PaneType) -> Result<Frame, LayoutError> {
        self.state.pane_type = pane_type;
        self.state.zoom = None;
        self.redraw()
    }

    /// Canvas resized. The zoom mode is kept.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Result<Frame, LayoutError> {
        self.state.canvas = [width, height];
        self.redraw()
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> Result<Frame, LayoutError> {
        let base = match self.state.zoom.or(self.last_resize) {
            Some(f) => f,
            None => render(&self.state, &self.results, &self.config)?.resize_factor,
        };
        let step = match direction {
            ZoomDirection::In => self.config.zoom_in_step,
            ZoomDirection::Out => self.config.zoom_out_step,
        };
        self.state.zoom = Some(base * step);
        tracing::debug!("zoom {:?}: {:.4} -> {:.4}", direction, base, base * step);
        self.redraw()
    }

    /// Canvas click. Returns a new frame when a zoom control was hit.
    pub fn click(&mut self, x: f64, y: f64) -> Result<Option<Frame>, LayoutError> {
        match hit_zoom_control(x, y) {
            Some(direction) => self.zoom(direction).map(Some),
            None => Ok(None),
        }
    }

    pub fn redraw(&mut self) -> Result<Frame, LayoutError> {
        let frame = render(&self.state, &self.results, &self.config)?;
        self.last_resize = Some(frame.resize_factor);
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::pane;
    use approx::assert_relative_eq;

    const TS1: &str = "2024-03-01 09:00:00";
    const TS2: &str = "2024-03-01 10:00:00";

    fn sample_set() -> ResultSet {
        ResultSet::new(vec![
            pane("Anna Huber", TS1, &[(450, 0), (0, -1200), (-300, 300)]),
            pane("Anna Huber", TS2, &[(100, 100)]),
            pane("Zoe Weber", TS1, &[(2000, 0)]),
        ])
        .expect("valid set")
    }

    fn count<F: Fn(&Primitive) -> bool>(frame: &Frame, f: F) -> usize {
        frame.primitives.iter().filter(|p| f(*p)).count()
    }

    #[test]
    fn coordinator_starts_on_default_selection() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        assert_eq!(
            rc.state().selection,
            Some(PaneKey::new("Anna Huber", TS1))
        );
        let frame = rc.redraw().expect("frame");
        let report = frame.report.expect("report present");
        assert_eq!(report.shots.len(), 3);
    }

    #[test]
    fn frame_contains_face_markers_and_controls() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let frame = rc.redraw().expect("frame");
        // bullseye + 3 markers
        assert_eq!(count(&frame, |p| matches!(p, Primitive::Disc(_))), 4);
        assert_eq!(count(&frame, |p| matches!(p, Primitive::Circle(_))), 10);
        assert_eq!(count(&frame, |p| matches!(p, Primitive::Rect(_))), 2);
        // 36 ring labels + 3 shot indices + 2 control glyphs
        assert_eq!(count(&frame, |p| matches!(p, Primitive::Label(_))), 41);
    }

    #[test]
    fn auto_fit_frames_the_group() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let frame = rc.redraw().expect("frame");
        // farthest shot 12 + bullet radius 2.25 -> diameter 28.5
        assert_relative_eq!(frame.resize_factor, 190.0 / 28.5);
    }

    #[test]
    fn missing_selection_draws_default_face_without_report() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let frame = rc.select_pane("Anna Huber", "1999-01-01 00:00:00").expect("frame");
        assert!(frame.report.is_none());
        assert_relative_eq!(frame.resize_factor, 190.0 / 45.5);
        assert_eq!(count(&frame, |p| matches!(p, Primitive::Disc(_))), 1);
        assert_eq!(count(&frame, |p| matches!(p, Primitive::Rect(_))), 2);
    }

    #[test]
    fn markers_invert_y_axis() {
        let set = ResultSet::new(vec![pane("A", TS1, &[(0, 500)])]).expect("valid set");
        let mut rc = RenderCoordinator::new(set, RenderConfig::default());
        let frame = rc.redraw().expect("frame");
        let s = frame.resize_factor;
        let marker = frame
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Disc(d) if d.outline.is_some() => Some(*d),
                _ => None,
            })
            .next()
            .expect("marker disc");
        assert_relative_eq!(marker.center[0], 100.0);
        assert_relative_eq!(marker.center[1], 100.0 - 5.0 * s);
        assert_relative_eq!(marker.radius, 2.25 * s);
    }

    #[test]
    fn marker_bands_compare_factor_times_hundred() {
        // Rifle: factor 2 -> 200 < 250 is inner, factor 4 -> 400 < 500 is middle.
        assert_eq!(MarkerBand::classify(2.0, PaneType::AirRifle), MarkerBand::Inner);
        assert_eq!(MarkerBand::classify(4.0, PaneType::AirRifle), MarkerBand::Middle);
        assert_eq!(MarkerBand::classify(5.0, PaneType::AirRifle), MarkerBand::Outer);
        assert_eq!(MarkerBand::classify(7.99, PaneType::AirPistol), MarkerBand::Inner);
        assert_eq!(MarkerBand::classify(15.0, PaneType::AirPistol), MarkerBand::Middle);
        assert_eq!(MarkerBand::classify(16.0, PaneType::AirPistol), MarkerBand::Outer);
    }

    #[test]
    fn marker_band_scale_differs_from_scoring_scale() {
        // A rifle factor of 4 scores 10.98, yet its marker is not in the inner
        // band: the color test uses factor * 100 against 250 while scoring
        // divides factor by 250.
        let set = ResultSet::new(vec![pane("A", TS1, &[(450, 0)])]).expect("valid set");
        let mut rc = RenderCoordinator::new(set, RenderConfig::default());
        let frame = rc.redraw().expect("frame");
        let report = frame.report.as_ref().expect("report");
        assert_relative_eq!(report.shots[0].ring_value, 10.98);
        let fills: Vec<Color> = frame
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Disc(d) if d.outline.is_some() => Some(d.fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Color::Yellow]);
    }

    #[test]
    fn outer_band_markers_get_white_index() {
        let set = ResultSet::new(vec![pane("A", TS1, &[(2000, 0)])]).expect("valid set");
        let mut rc = RenderCoordinator::new(set, RenderConfig::default());
        let frame = rc.redraw().expect("frame");
        let index_label = frame
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Label(l) if l.text == "1" && l.color == Color::White => Some(l),
                _ => None,
            });
        assert!(index_label.is_some());
    }

    #[test]
    fn zoom_round_trip_drifts_by_four_percent() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let fit = rc.redraw().expect("frame").resize_factor;
        rc.zoom(ZoomDirection::In).expect("frame");
        let frame = rc.zoom(ZoomDirection::Out).expect("frame");
        assert_relative_eq!(frame.resize_factor, fit * 0.96, max_relative = 1e-12);
        assert!(frame.resize_factor < fit);
    }

    #[test]
    fn zoom_without_prior_frame_seeds_from_fit() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let frame = rc.zoom(ZoomDirection::In).expect("frame");
        assert_relative_eq!(frame.resize_factor, 190.0 / 28.5 * 1.2, max_relative = 1e-12);
    }

    #[test]
    fn resize_keeps_auto_fit_mode() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        rc.redraw().expect("frame");
        let frame = rc.on_resize(400.0, 300.0).expect("frame");
        assert_eq!(rc.state().zoom, None);
        assert_relative_eq!(frame.resize_factor, 290.0 / 28.5);
    }

    #[test]
    fn resize_keeps_explicit_zoom() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let zoomed = rc.zoom(ZoomDirection::Out).expect("frame").resize_factor;
        let frame = rc.on_resize(800.0, 600.0).expect("frame");
        assert_relative_eq!(frame.resize_factor, zoomed);
        assert_eq!(frame.canvas, [800.0, 600.0]);
    }

    #[test]
    fn selection_and_pane_type_reset_zoom() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        rc.zoom(ZoomDirection::In).expect("frame");
        assert!(rc.state().zoom.is_some());
        rc.select_pane("Anna Huber", TS2).expect("frame");
        assert!(rc.state().zoom.is_none());

        rc.zoom(ZoomDirection::In).expect("frame");
        let frame = rc.set_pane_type(PaneType::AirPistol).expect("frame");
        assert!(rc.state().zoom.is_none());
        assert_eq!(count(&frame, |p| matches!(p, Primitive::Circle(_))), 11);
        assert_eq!(frame.report.map(|r| r.pane_type), Some(PaneType::AirPistol));
    }

    #[test]
    fn select_shooter_picks_earliest_pane() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let frame = rc.select_shooter("Zoe Weber").expect("frame");
        assert_eq!(frame.selection, Some(PaneKey::new("Zoe Weber", TS1)));
        assert!(frame.report.is_some());
    }

    #[test]
    fn load_replaces_results_and_selection() {
        let mut rc = RenderCoordinator::new(ResultSet::default(), RenderConfig::default());
        assert!(rc.redraw().expect("frame").report.is_none());
        let frame = rc.load(sample_set()).expect("frame");
        assert_eq!(frame.selection, Some(PaneKey::new("Anna Huber", TS1)));
        assert!(frame.report.is_some());
    }

    #[test]
    fn load_keeps_panes_next_to_an_empty_one() {
        let set = ResultSet::new(vec![
            pane("Anna Huber", TS1, &[]),
            pane("Zoe Weber", TS2, &[(300, 0)]),
        ])
        .expect("empty pane is skipped");
        let mut rc = RenderCoordinator::new(ResultSet::default(), RenderConfig::default());
        let frame = rc.load(set).expect("frame");
        assert_eq!(frame.selection, Some(PaneKey::new("Zoe Weber", TS2)));
        assert_eq!(frame.report.map(|r| r.shots.len()), Some(1));
    }

    #[test]
    fn clicks_on_controls_zoom() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let fit = rc.redraw().expect("frame").resize_factor;
        let frame = rc.click(15.0, 15.0).expect("ok").expect("zoomed");
        assert_relative_eq!(frame.resize_factor, fit * 1.2, max_relative = 1e-12);
        let frame = rc.click(15.0, 40.0).expect("ok").expect("zoomed");
        assert_relative_eq!(frame.resize_factor, fit * 1.2 * 0.8, max_relative = 1e-12);
        assert!(rc.click(100.0, 100.0).expect("ok").is_none());
    }

    #[test]
    fn hit_test_matches_control_rects() {
        assert_eq!(hit_zoom_control(5.0, 5.0), Some(ZoomDirection::In));
        assert_eq!(hit_zoom_control(24.0, 44.0), Some(ZoomDirection::Out));
        assert_eq!(hit_zoom_control(30.0, 10.0), None);
    }

    #[test]
    fn degenerate_canvas_is_an_error() {
        let mut rc = RenderCoordinator::new(sample_set(), RenderConfig::default());
        let err = rc.on_resize(8.0, 8.0).expect_err("no drawable area");
        assert!(matches!(err, LayoutError::NonPositiveCanvas { .. }));
    }

    #[test]
    fn render_is_pure() {
        let set = sample_set();
        let cfg = RenderConfig::default();
        let mut state = ViewState::new(&cfg);
        state.selection = set.default_selection();
        let a = render(&state, &set, &cfg).expect("frame");
        let b = render(&state, &set, &cfg).expect("frame");
        assert_eq!(a, b);
    }
}
