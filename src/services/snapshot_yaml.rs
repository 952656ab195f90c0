use std::io::{self, Write};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::snapshot::{EstimationSnapshot, StatusTransition, VelocitySample};

#[derive(Error, Debug)]
pub enum SnapshotYamlError {
    #[error("failed to read snapshot yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse snapshot yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid timestamp: {0} (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidTimestamp(String),
}

/// Wire shape shared by snapshot files and HTTP responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SnapshotRecord {
    #[serde(default)]
    status_transitions: Vec<TransitionRecord>,
    #[serde(default)]
    velocity_samples: Vec<VelocitySampleRecord>,
    point_estimate: Option<f64>,
    remaining_points: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TransitionRecord {
    status: String,
    entered_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct VelocitySampleRecord {
    points_per_day: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,
}

pub async fn load_snapshot_from_yaml_file(path: &str) -> Result<EstimationSnapshot, SnapshotYamlError> {
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_snapshot_from_yaml_str(&contents)
}

pub fn deserialize_snapshot_from_yaml_str(input: &str) -> Result<EstimationSnapshot, SnapshotYamlError> {
    let record: SnapshotRecord = serde_yaml::from_str(input)?;
    snapshot_from_record(record)
}

pub fn serialize_snapshot_to_yaml<W: Write>(
    writer: &mut W,
    snapshot: &EstimationSnapshot,
) -> io::Result<()> {
    let record = snapshot_to_record(snapshot);
    let yaml = serde_yaml::to_string(&record).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

pub(crate) fn snapshot_from_record(
    record: SnapshotRecord,
) -> Result<EstimationSnapshot, SnapshotYamlError> {
    let status_transitions = record
        .status_transitions
        .into_iter()
        .map(|transition| {
            Ok(StatusTransition {
                entered_at: parse_timestamp(&transition.entered_at)?,
                status: transition.status,
            })
        })
        .collect::<Result<Vec<_>, SnapshotYamlError>>()?;

    let velocity_samples = record
        .velocity_samples
        .into_iter()
        .map(|sample| VelocitySample {
            points_per_day: sample.points_per_day,
            assignee: sample.assignee,
        })
        .collect();

    Ok(EstimationSnapshot {
        status_transitions,
        velocity_samples,
        point_estimate: record.point_estimate,
        remaining_points: record.remaining_points,
    })
}

fn snapshot_to_record(snapshot: &EstimationSnapshot) -> SnapshotRecord {
    SnapshotRecord {
        status_transitions: snapshot
            .status_transitions
            .iter()
            .map(|transition| TransitionRecord {
                status: transition.status.clone(),
                entered_at: transition
                    .entered_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            })
            .collect(),
        velocity_samples: snapshot
            .velocity_samples
            .iter()
            .map(|sample| VelocitySampleRecord {
                points_per_day: sample.points_per_day,
                assignee: sample.assignee.clone(),
            })
            .collect(),
        point_estimate: snapshot.point_estimate,
        remaining_points: snapshot.remaining_points,
    }
}

/// Accepts full RFC 3339 timestamps or bare dates (taken as midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SnapshotYamlError> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
        .ok_or_else(|| SnapshotYamlError::InvalidTimestamp(value.to_string()))
}
