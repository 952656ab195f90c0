use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTransition {
    pub status: String,
    pub entered_at: DateTime<Utc>,
}

/// Points completed per elapsed day, optionally attributed to one assignee.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocitySample {
    pub points_per_day: f64,
    pub assignee: Option<String>,
}

impl VelocitySample {
    pub fn new(points_per_day: f64) -> Self {
        Self {
            points_per_day,
            assignee: None,
        }
    }

    pub fn for_assignee(points_per_day: f64, assignee: impl Into<String>) -> Self {
        Self {
            points_per_day,
            assignee: Some(assignee.into()),
        }
    }
}

/// Historical data for one record, fetched once and analyzed many times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimationSnapshot {
    pub status_transitions: Vec<StatusTransition>,
    pub velocity_samples: Vec<VelocitySample>,
    pub point_estimate: Option<f64>,
    pub remaining_points: Option<f64>,
}

impl EstimationSnapshot {
    pub fn new() -> Self {
        Self::default()
    }
}
