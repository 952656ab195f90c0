use std::collections::BTreeSet;

use crate::domain::parameters::EffectiveParameters;
use crate::domain::snapshot::VelocitySample;

/// Fraction of the sample standard deviation subtracted in fancy mode.
const DISPERSION_PENALTY: f64 = 0.5;
/// Fancy mode never drops below this fraction of the plain mean.
const MIN_CONSERVATIVE_FRACTION: f64 = 0.25;

/// Reduces velocity samples to points per day.
///
/// Returns `None` when nothing resolves to a positive, finite velocity.
pub fn estimate_velocity(samples: &[VelocitySample], settings: &EffectiveParameters) -> Option<f64> {
    let valid: Vec<&VelocitySample> = samples
        .iter()
        .filter(|sample| sample.points_per_day.is_finite() && sample.points_per_day >= 0.0)
        .collect();

    let base = if valid.is_empty() {
        settings.default_velocity?
    } else {
        let values: Vec<f64> = valid.iter().map(|sample| sample.points_per_day).collect();
        if settings.fancy_math {
            conservative_mean(&values)
        } else {
            mean(&values)
        }
    };

    let velocity = base * assignee_factor(&valid, settings.total_assignees);
    if velocity.is_finite() && velocity > 0.0 {
        Some(velocity)
    } else {
        None
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn conservative_mean(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return mean(values);
    }
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (values.len() as f64 - 1.0);
    let adjusted = mean - DISPERSION_PENALTY * variance.sqrt();
    adjusted.max(mean * MIN_CONSERVATIVE_FRACTION)
}

fn assignee_factor(samples: &[&VelocitySample], total_assignees: u32) -> f64 {
    if total_assignees <= 1 {
        return 1.0;
    }
    let assignees: BTreeSet<&str> = samples
        .iter()
        .filter_map(|sample| sample.assignee.as_deref())
        .collect();
    // Aggregate samples say nothing about how many people worked in parallel.
    let parallelism = if assignees.is_empty() {
        total_assignees as usize
    } else {
        assignees.len().min(total_assignees as usize)
    };
    parallelism.max(1) as f64
}
