//! Progress reporter: position/duration to a 0-100 percentage.

use std::time::Duration;

/// Percentage of `position` within `duration`, in `[0, 100]`.
///
/// A zero, negative, or non-finite duration yields 0.
pub fn report(position_secs: f64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0.0;
    }
    let pct = position_secs / duration_secs * 100.0;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// `report` for output positions; an unknown duration yields 0.
pub fn percent(position: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(total) => report(position.as_secs_f64(), total.as_secs_f64()),
        None => 0.0,
    }
}
