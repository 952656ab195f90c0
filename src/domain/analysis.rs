use serde::Serialize;

use crate::domain::parameters::EffectiveParameters;
use crate::domain::snapshot::StatusTransition;

/// A low/high pair of fractional days. `low <= high` and both are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayRange(pub [f64; 2]);

impl DayRange {
    pub fn low(&self) -> f64 {
        self.0[0]
    }

    pub fn high(&self) -> f64 {
        self.0[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemainingDuration {
    pub projected: DayRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationAnalysis {
    /// Points per day after assignee scaling.
    pub velocity: f64,
    pub projected: DayRange,
    pub remaining: RemainingDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    OnTrack,
    AtRisk,
    OverProjected,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::OnTrack => "On track",
            RiskLevel::AtRisk => "At risk",
            RiskLevel::OverProjected => "Over projection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressAnalysis {
    /// Chronologically sorted.
    pub transitions: Vec<StatusTransition>,
    pub time_in_progress: f64,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordAnalysis {
    pub settings: EffectiveParameters,
    pub duration: DurationAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressAnalysis>,
}

/// Either a finished analysis or the signal that the snapshot and parameters
/// together do not resolve a velocity or a point figure.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Analyzed(RecordAnalysis),
    InsufficientData,
}

impl AnalysisOutcome {
    pub fn analysis(&self) -> Option<&RecordAnalysis> {
        match self {
            AnalysisOutcome::Analyzed(analysis) => Some(analysis),
            AnalysisOutcome::InsufficientData => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, AnalysisOutcome::InsufficientData)
    }
}
