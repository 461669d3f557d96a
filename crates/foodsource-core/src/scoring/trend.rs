// Normalized least-squares trend over an ordered series of game results.

/// Fewer points than this produce a flat trend.
pub const MIN_TREND_POINTS: usize = 3;

/// Divisor mapping raw slope (units per game) onto the [-1, 1] trend scale.
const SLOPE_SCALE: f64 = 10.0;

/// Ordinary least-squares slope of `(index, value)` pairs.
///
/// Returns `None` for fewer than [`MIN_TREND_POINTS`] values.
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    if values.len() < MIN_TREND_POINTS {
        return None;
    }
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    Some((n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x))
}

/// Trend strength in [-1, 1]: the OLS slope divided by 10 and clamped.
///
/// Returns 0.0 for short series and for non-finite input.
pub fn trend_estimate(values: &[f64]) -> f64 {
    match ols_slope(values) {
        Some(slope) if slope.is_finite() => (slope / SLOPE_SCALE).clamp(-1.0, 1.0),
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
