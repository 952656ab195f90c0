use chrono::{DateTime, Utc};

use crate::domain::analysis::{DayRange, ProgressAnalysis, RiskLevel};
use crate::domain::snapshot::StatusTransition;
use crate::domain::workflow::InProgressPolicy;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Measures time spent in progress and classifies it against `projected`.
///
/// Returns `None` if no transition ever entered an in-progress status.
pub fn analyze_progress<P: InProgressPolicy + ?Sized>(
    transitions: &[StatusTransition],
    projected: DayRange,
    policy: &P,
    now: DateTime<Utc>,
) -> Option<ProgressAnalysis> {
    let mut transitions = transitions.to_vec();
    // Stable, so same-instant transitions keep their reported order.
    transitions.sort_by_key(|transition| transition.entered_at);

    let time_in_progress = time_in_progress(&transitions, policy, now)?;
    Some(ProgressAnalysis {
        transitions,
        time_in_progress,
        risk: classify_risk(time_in_progress, projected),
    })
}

/// Days from the first in-progress transition until the record left its last
/// in-progress status, or until `now` while it is still in progress.
pub fn time_in_progress<P: InProgressPolicy + ?Sized>(
    sorted_transitions: &[StatusTransition],
    policy: &P,
    now: DateTime<Utc>,
) -> Option<f64> {
    let first = sorted_transitions
        .iter()
        .position(|transition| policy.is_in_progress(&transition.status))?;
    let last = sorted_transitions
        .iter()
        .rposition(|transition| policy.is_in_progress(&transition.status))?;

    let started = sorted_transitions[first].entered_at;
    let ended = sorted_transitions
        .get(last + 1)
        .map(|transition| transition.entered_at)
        .unwrap_or(now);

    let seconds = (ended - started).num_milliseconds() as f64 / 1000.0;
    Some((seconds / SECONDS_PER_DAY).max(0.0))
}

pub fn classify_risk(time_in_progress: f64, projected: DayRange) -> RiskLevel {
    if time_in_progress <= projected.low() {
        RiskLevel::OnTrack
    } else if time_in_progress <= projected.high() {
        RiskLevel::AtRisk
    } else {
        RiskLevel::OverProjected
    }
}
