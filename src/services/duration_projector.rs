use crate::domain::analysis::{DayRange, DurationAnalysis, RemainingDuration};
use crate::domain::parameters::{EffectiveParameters, non_negative};
use crate::domain::snapshot::EstimationSnapshot;

/// Spreads `points / velocity` into a low/high band of days.
///
/// Returns `None` for a non-finite result (e.g. huge point figures).
pub fn project_days(points: f64, velocity: f64, estimate_uncertainty: f64) -> Option<DayRange> {
    let central = points / velocity;
    if !central.is_finite() {
        return None;
    }
    let spread = estimate_uncertainty / 100.0;
    let low = (central * (1.0 - spread)).max(0.0);
    let high = (central * (1.0 + spread)).max(0.0);
    if !high.is_finite() {
        return None;
    }
    if low > high {
        Some(DayRange([high, low]))
    } else {
        Some(DayRange([low, high]))
    }
}

/// Projects the total and the remaining duration for a snapshot.
///
/// Without `remaining_points` the remaining band equals the total band,
/// i.e. no progress is assumed yet.
pub fn project_duration(
    snapshot: &EstimationSnapshot,
    velocity: f64,
    settings: &EffectiveParameters,
) -> Option<DurationAnalysis> {
    let total_points = snapshot
        .point_estimate
        .and_then(non_negative)
        .or(settings.default_estimate)?;
    let projected = project_days(total_points, velocity, settings.estimate_uncertainty)?;

    let remaining = match snapshot.remaining_points.and_then(non_negative) {
        Some(points) => project_days(points, velocity, settings.estimate_uncertainty)?,
        None => projected,
    };

    Some(DurationAnalysis {
        velocity,
        projected,
        remaining: RemainingDuration {
            projected: remaining,
        },
    })
}
