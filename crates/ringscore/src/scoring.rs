//! Shot scoring: ring values, factors, best shot and group-radius indicator.
//!
//! All values leave this module already rounded for display; callers print
//! them as-is.

use serde::{Deserialize, Serialize};

use crate::geometry::{distance_from_origin, round_dp, round_to_int};
use crate::model::{Shot, TargetResult};
use crate::pane_type::PaneType;

const RING_VALUE_BASE: f64 = 11.0;
const DISPLAY_DECIMALS: u32 = 2;

/// Score of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotScore {
    /// 1-based position in acquisition order.
    pub index: usize,
    /// Distance from center, rounded to 2 decimals.
    pub factor: f64,
    /// Decimal ring value, rounded to 2 decimals.
    pub ring_value: f64,
}

/// Highest-scoring shot of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestShot {
    pub index: usize,
    pub ring_value: f64,
    pub factor: f64,
}

/// Scoring output for one pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub pane_type: PaneType,
    pub shots: Vec<ShotScore>,
    /// Unset when no shot scored above 0 (including an empty pane).
    pub best_shot: Option<BestShot>,
    /// `round(sqrt(sum(factor^2)))`. A dispersion hint, not a group diameter.
    pub group_radius_indicator: i64,
}

/// Unrounded distance of a shot from the center, in resolution-divided units.
pub fn shot_factor(shot: &Shot) -> f64 {
    let [x, y] = shot.scaled_xy();
    distance_from_origin(x, y)
}

/// Decimal ring value for a raw factor.
pub fn ring_value(factor: f64, pane_type: PaneType) -> f64 {
    round_dp(
        RING_VALUE_BASE - factor / pane_type.scoring_divisor(),
        DISPLAY_DECIMALS,
    )
}

/// Score every shot of `result` against `pane_type`.
pub fn evaluate(result: &TargetResult, pane_type: PaneType) -> EvaluationReport {
    let mut shots = Vec::with_capacity(result.shots.len());
    let mut best: Option<BestShot> = None;
    let mut best_value = 0.0;
    let mut sum_sq = 0.0;

    for (i, shot) in result.shots.iter().enumerate() {
        let factor = shot_factor(shot);
        let score = ShotScore {
            index: i + 1,
            factor: round_dp(factor, DISPLAY_DECIMALS),
            ring_value: ring_value(factor, pane_type),
        };
        sum_sq += factor * factor;

        // Strict comparison keeps the earliest shot on ties.
        if score.ring_value > best_value {
            best_value = score.ring_value;
            best = Some(BestShot {
                index: score.index,
                ring_value: score.ring_value,
                factor: score.factor,
            });
        }
        shots.push(score);
    }

    let report = EvaluationReport {
        pane_type,
        shots,
        best_shot: best,
        group_radius_indicator: round_to_int(sum_sq.sqrt()),
    };
    tracing::debug!(
        "evaluated {} shots on {}: best={:?} indicator={}",
        report.shots.len(),
        pane_type,
        report.best_shot.map(|b| b.index),
        report.group_radius_indicator,
    );
    report
}
