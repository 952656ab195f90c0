use chrono::{DateTime, Utc};

use crate::domain::analysis::{AnalysisOutcome, RecordAnalysis};
use crate::domain::parameters::AnalysisParameters;
use crate::domain::snapshot::EstimationSnapshot;
use crate::domain::workflow::InProgressPolicy;
use crate::services::duration_projector::project_duration;
use crate::services::progress_analyzer::analyze_progress;
use crate::services::velocity_estimator::estimate_velocity;

/// Forecasts duration and risk for a single record.
///
/// Pure: the same snapshot, parameters, policy and `now` always produce the
/// same outcome. `now` anchors an unset start date and open-ended
/// in-progress intervals.
pub fn analyze_single_record<P: InProgressPolicy + ?Sized>(
    snapshot: &EstimationSnapshot,
    parameters: &AnalysisParameters,
    policy: &P,
    now: DateTime<Utc>,
) -> AnalysisOutcome {
    let settings = parameters.resolve(now);

    let Some(velocity) = estimate_velocity(&snapshot.velocity_samples, &settings) else {
        return AnalysisOutcome::InsufficientData;
    };
    let Some(duration) = project_duration(snapshot, velocity, &settings) else {
        return AnalysisOutcome::InsufficientData;
    };

    let progress = if settings.analyze_progress {
        analyze_progress(&snapshot.status_transitions, duration.projected, policy, now)
    } else {
        None
    };

    AnalysisOutcome::Analyzed(RecordAnalysis {
        settings,
        duration,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{DayRange, RiskLevel};
    use crate::domain::workflow::StatusSet;
    use crate::test_support::{at, now, samples, transition};

    fn policy() -> StatusSet {
        StatusSet::new(["In progress"])
    }

    fn scenario_a_snapshot() -> EstimationSnapshot {
        EstimationSnapshot {
            velocity_samples: samples(&[2.0, 2.0, 2.0]),
            point_estimate: Some(20.0),
            ..EstimationSnapshot::new()
        }
    }

    #[test]
    fn steady_velocity_projects_a_symmetric_band() {
        let parameters = AnalysisParameters {
            estimate_uncertainty: 25.0,
            total_assignees: 1,
            fancy_math: false,
            ..AnalysisParameters::default()
        };

        let outcome = analyze_single_record(&scenario_a_snapshot(), &parameters, &policy(), now());
        let analysis = outcome.analysis().unwrap();

        assert_eq!(analysis.duration.velocity, 2.0);
        assert_eq!(analysis.duration.projected, DayRange([7.5, 12.5]));
        assert_eq!(analysis.duration.remaining.projected, DayRange([7.5, 12.5]));
        assert_eq!(analysis.settings.estimate_uncertainty, 25.0);
        assert_eq!(analysis.settings.start_date, now());
    }

    #[test]
    fn no_samples_and_no_default_velocity_is_insufficient() {
        let snapshot = EstimationSnapshot {
            point_estimate: Some(20.0),
            ..EstimationSnapshot::new()
        };
        let outcome =
            analyze_single_record(&snapshot, &AnalysisParameters::default(), &policy(), now());
        assert_eq!(outcome, AnalysisOutcome::InsufficientData);
    }

    #[test]
    fn no_point_figures_is_insufficient() {
        let snapshot = EstimationSnapshot {
            velocity_samples: samples(&[1.0]),
            ..EstimationSnapshot::new()
        };
        let outcome =
            analyze_single_record(&snapshot, &AnalysisParameters::default(), &policy(), now());
        assert!(outcome.is_insufficient());
    }

    #[test]
    fn missing_remaining_points_reuse_the_projected_band() {
        let snapshot = EstimationSnapshot {
            velocity_samples: samples(&[5.0]),
            point_estimate: Some(10.0),
            ..EstimationSnapshot::new()
        };
        let outcome =
            analyze_single_record(&snapshot, &AnalysisParameters::default(), &policy(), now());
        let duration = outcome.analysis().unwrap().duration;
        assert_eq!(duration.velocity, 5.0);
        assert_eq!(duration.remaining.projected, duration.projected);
    }

    #[test]
    fn disabled_progress_analysis_omits_progress() {
        let snapshot = EstimationSnapshot {
            status_transitions: vec![transition("In progress", at(2026, 2, 25, 9))],
            ..scenario_a_snapshot()
        };
        let parameters = AnalysisParameters {
            analyze_progress: false,
            ..AnalysisParameters::default()
        };

        let outcome = analyze_single_record(&snapshot, &parameters, &policy(), now());
        assert_eq!(outcome.analysis().unwrap().progress, None);
    }

    #[test]
    fn progress_is_classified_against_the_projected_band() {
        let snapshot = EstimationSnapshot {
            status_transitions: vec![
                transition("Ready", at(2026, 2, 10, 9)),
                transition("In progress", at(2026, 2, 20, 9)),
            ],
            ..scenario_a_snapshot()
        };

        let outcome =
            analyze_single_record(&snapshot, &AnalysisParameters::default(), &policy(), now());
        let progress = outcome.analysis().unwrap().progress.clone().unwrap();
        // 2026-02-20 09:00 until now() 2026-03-02 09:00
        assert!((progress.time_in_progress - 10.0).abs() < 1e-9);
        assert_eq!(progress.risk, RiskLevel::AtRisk);
        assert_eq!(progress.transitions.len(), 2);
    }

    #[test]
    fn closure_policies_are_accepted() {
        let snapshot = EstimationSnapshot {
            status_transitions: vec![transition("Doing", at(2026, 3, 1, 9))],
            ..scenario_a_snapshot()
        };
        let doing = |status: &str| status == "Doing";

        let outcome =
            analyze_single_record(&snapshot, &AnalysisParameters::default(), &doing, now());
        let progress = outcome.analysis().unwrap().progress.clone().unwrap();
        assert_eq!(progress.risk, RiskLevel::OnTrack);
    }

    #[test]
    fn repeated_calls_yield_identical_outcomes() {
        let snapshot = EstimationSnapshot {
            status_transitions: vec![transition("In progress", at(2026, 2, 25, 9))],
            remaining_points: Some(4.0),
            ..scenario_a_snapshot()
        };
        let parameters = AnalysisParameters {
            fancy_math: true,
            total_assignees: 2,
            ..AnalysisParameters::default()
        };

        let first = analyze_single_record(&snapshot, &parameters, &policy(), now());
        let second = analyze_single_record(&snapshot, &parameters, &policy(), now());
        assert_eq!(first, second);
    }
}
