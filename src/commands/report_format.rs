use serde::Serialize;

use crate::domain::analysis::{DayRange, RecordAnalysis};
use crate::domain::record::Record;
use crate::services::delivery_forecast::DeliveryWindow;
use crate::services::record_session::SessionView;

/// The YAML document written by `analyze --output`.
#[derive(Serialize, Debug, Clone)]
pub struct ForecastReport {
    pub record: String,
    pub analysis: RecordAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryWindow>,
}

pub fn format_day_range(range: DayRange) -> String {
    format!("{:.1}d — {:.1}d", range.low(), range.high())
}

pub fn format_velocity_tooltip(analysis: &RecordAnalysis) -> String {
    format!(
        "Based on velocity of {:.2}p / day and {}% estimate uncertainty.",
        analysis.duration.velocity, analysis.settings.estimate_uncertainty
    )
}

pub fn format_analysis_report(
    record: &Record,
    analysis: &RecordAnalysis,
    delivery: Option<&DeliveryWindow>,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Forecast for {record}"));
    lines.push(format!(
        "Projected duration: {}",
        format_day_range(analysis.duration.projected)
    ));
    lines.push(format_velocity_tooltip(analysis));
    lines.push(format!(
        "Remaining duration: {}",
        format_day_range(analysis.duration.remaining.projected)
    ));
    if let Some(delivery) = delivery {
        lines.push(format!(
            "Delivery window: {} — {}",
            delivery.earliest.format("%Y-%m-%d"),
            delivery.latest.format("%Y-%m-%d")
        ));
    }

    if let Some(progress) = &analysis.progress {
        lines.push(format!(
            "Time in progress: {:.1}d [{}]",
            progress.time_in_progress,
            progress.risk.label()
        ));
        lines.push(String::new());
        lines.push("Status | Entered".to_string());
        lines.push("-------|--------".to_string());
        for transition in &progress.transitions {
            lines.push(format!(
                "{} | {}",
                transition.status,
                transition.entered_at.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    lines.join("\n")
}

pub fn format_session_view(
    record: &Record,
    view: &SessionView,
    delivery: Option<&DeliveryWindow>,
) -> String {
    match view {
        SessionView::Idle => "No record selected".to_string(),
        SessionView::Loading => format!("Loading estimation data for {record}"),
        SessionView::NoData => format!("No estimation data for {record}"),
        SessionView::InsufficientData => "Insufficient data".to_string(),
        SessionView::Analyzed(analysis) => format_analysis_report(record, analysis, delivery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{
        DurationAnalysis, ProgressAnalysis, RemainingDuration, RiskLevel,
    };
    use crate::domain::parameters::AnalysisParameters;
    use crate::domain::record::RecordId;
    use crate::test_support::{at, now, on_date, transition};

    fn record() -> Record {
        Record::Feature(RecordId::new("FEAT-12"))
    }

    fn build_analysis() -> RecordAnalysis {
        RecordAnalysis {
            settings: AnalysisParameters::default().resolve(now()),
            duration: DurationAnalysis {
                velocity: 2.0,
                projected: DayRange([7.5, 12.5]),
                remaining: RemainingDuration {
                    projected: DayRange([3.0, 5.0]),
                },
            },
            progress: Some(ProgressAnalysis {
                transitions: vec![
                    transition("Ready", at(2026, 2, 20, 9)),
                    transition("In progress", at(2026, 2, 27, 9)),
                ],
                time_in_progress: 3.0,
                risk: RiskLevel::OnTrack,
            }),
        }
    }

    #[test]
    fn format_analysis_report_includes_ranges_tooltip_and_risk() {
        let delivery = DeliveryWindow {
            earliest: on_date(2026, 3, 5),
            latest: on_date(2026, 3, 9),
        };
        let output = format_analysis_report(&record(), &build_analysis(), Some(&delivery));

        assert!(output.contains("Forecast for FEAT-12"));
        assert!(output.contains("Projected duration: 7.5d — 12.5d"));
        assert!(output.contains("Based on velocity of 2.00p / day and 25% estimate uncertainty."));
        assert!(output.contains("Remaining duration: 3.0d — 5.0d"));
        assert!(output.contains("Delivery window: 2026-03-05 — 2026-03-09"));
        assert!(output.contains("Time in progress: 3.0d [On track]"));
        assert!(output.contains("In progress | 2026-02-27 09:00"));
    }

    #[test]
    fn format_analysis_report_leaves_out_missing_progress() {
        let mut analysis = build_analysis();
        analysis.progress = None;

        let output = format_analysis_report(&record(), &analysis, None);
        assert!(!output.contains("Time in progress"));
        assert!(!output.contains("Delivery window"));
    }

    #[test]
    fn insufficient_and_missing_data_render_differently() {
        assert_eq!(
            format_session_view(&record(), &SessionView::InsufficientData, None),
            "Insufficient data"
        );
        assert_eq!(
            format_session_view(&record(), &SessionView::NoData, None),
            "No estimation data for FEAT-12"
        );
    }

    #[test]
    fn forecast_report_serializes_nested_ranges() {
        let report = ForecastReport {
            record: "FEAT-12".to_string(),
            analysis: build_analysis(),
            delivery: None,
        };
        let yaml = serde_yaml::to_string(&report).unwrap();

        assert!(yaml.contains("record: FEAT-12"));
        assert!(yaml.contains("velocity: 2.0"));
        assert!(yaml.contains("risk: on_track"));
        assert!(!yaml.contains("delivery:"));
    }
}
