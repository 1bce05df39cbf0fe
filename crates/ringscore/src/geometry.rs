//! Distance and rounding primitives shared by scoring and layout.
//!
//! Coordinates are truncated toward zero before use, so a shot at
//! `(4.5, 0.0)` sits at distance `4.0` from the center.

/// Euclidean distance between `(x1, y1)` and `(x2, y2)` after truncating
/// every input to an integer.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1.trunc() - x2.trunc();
    let dy = y1.trunc() - y2.trunc();
    (dx * dx + dy * dy).sqrt()
}

/// Distance of a point from the origin, with the same truncation as [`distance`].
#[inline]
pub fn distance_from_origin(x: f64, y: f64) -> f64 {
    distance(0.0, 0.0, x, y)
}

/// Round to `dp` decimal places on the exact decimal value of the double.
///
/// Scaling by `10^dp` first can turn `10.99499..` into an exact `1099.5`,
/// so the fixed-precision formatter does the rounding instead.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", dp as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Round half to even to the nearest integer.
pub fn round_to_int(value: f64) -> i64 {
    value.round_ties_even() as i64
}
