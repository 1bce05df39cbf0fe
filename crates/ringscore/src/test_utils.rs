//! Shared fixtures for unit tests.

use crate::model::{Shot, TargetResult};

pub(crate) const TEST_RESOLUTION: u32 = 100;

/// A shot at `(x, y)` in resolution-100 units.
pub(crate) fn shot_at(timestamp: &str, x: i64, y: i64) -> Shot {
    Shot {
        timestamp: timestamp.to_string(),
        resolution: TEST_RESOLUTION,
        x,
        y,
    }
}

/// A pane whose first shot carries `timestamp`; later shots get
/// consecutive seconds appended to keep timestamps distinct.
pub(crate) fn pane(shooter: &str, timestamp: &str, xy: &[(i64, i64)]) -> TargetResult {
    let shots = xy
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            if i == 0 {
                shot_at(timestamp, x, y)
            } else {
                shot_at(&format!("{timestamp}+{i}"), x, y)
            }
        })
        .collect();
    TargetResult {
        shooter_name: shooter.to_string(),
        target_id: "1".to_string(),
        gender: String::new(),
        match_class: String::new(),
        club: String::new(),
        shots,
    }
}
