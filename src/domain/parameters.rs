use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ESTIMATE_UNCERTAINTY: f64 = 25.0;
pub const MAX_ESTIMATE_UNCERTAINTY: f64 = 1000.0;

/// Tunable assumptions for one analysis run.
///
/// Values are taken as typed by the user and may be out of range while a
/// field is being edited. [`AnalysisParameters::resolve`] clamps them into
/// the [`EffectiveParameters`] the engine actually uses.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisParameters {
    /// Percentage applied symmetrically around the central estimate.
    pub estimate_uncertainty: f64,
    pub total_assignees: u32,
    pub fancy_math: bool,
    pub default_estimate: Option<f64>,
    pub default_velocity: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub analyze_progress: bool,
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        Self {
            estimate_uncertainty: DEFAULT_ESTIMATE_UNCERTAINTY,
            total_assignees: 1,
            fancy_math: false,
            default_estimate: None,
            default_velocity: None,
            start_date: None,
            analyze_progress: true,
        }
    }
}

/// Parameters after defaulting and clamping, echoed back as `settings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveParameters {
    pub estimate_uncertainty: f64,
    pub total_assignees: u32,
    pub fancy_math: bool,
    pub default_estimate: Option<f64>,
    pub default_velocity: Option<f64>,
    pub start_date: DateTime<Utc>,
    pub analyze_progress: bool,
}

impl AnalysisParameters {
    pub fn resolve(&self, now: DateTime<Utc>) -> EffectiveParameters {
        EffectiveParameters {
            estimate_uncertainty: clamp_uncertainty(self.estimate_uncertainty),
            total_assignees: self.total_assignees.max(1),
            fancy_math: self.fancy_math,
            default_estimate: self.default_estimate.and_then(non_negative),
            default_velocity: self.default_velocity.and_then(non_negative),
            start_date: self.start_date.unwrap_or(now),
            analyze_progress: self.analyze_progress,
        }
    }
}

fn clamp_uncertainty(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_ESTIMATE_UNCERTAINTY
    } else {
        value.clamp(0.0, MAX_ESTIMATE_UNCERTAINTY)
    }
}

/// Negative numbers clamp to zero, non-finite ones count as absent.
pub(crate) fn non_negative(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value.max(0.0))
    } else {
        None
    }
}
