use chrono::{DateTime, Utc};

use crate::commands::base_commands::AnalyzeArgs;
use crate::commands::report_format::{ForecastReport, format_session_view};
use crate::domain::calendar::WorkCalendar;
use crate::domain::parameters::AnalysisParameters;
use crate::services::calendar_yaml::load_work_calendar_from_yaml_file;
use crate::services::data_source::{DataSourceError, SnapshotSource, YamlSnapshotProvider};
use crate::services::delivery_forecast::forecast_delivery;
use crate::services::estimation_api::{AuthData, HttpSnapshotProvider};
use crate::services::forecast_config::{ConfigError, ForecastConfig};
use crate::services::record_session::{RecordSession, SessionView};
use crate::services::snapshot_yaml::{SnapshotYamlError, parse_timestamp};

pub async fn analyze_command(args: AnalyzeArgs) {
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load forecast config: {e}");
            return;
        }
    };

    let now = match args.as_of.as_deref().map(parse_timestamp).transpose() {
        Ok(as_of) => as_of.unwrap_or_else(Utc::now),
        Err(e) => {
            eprintln!("Invalid --as-of value: {e}");
            return;
        }
    };

    let parameters = match merge_parameters(&config.parameters, &args) {
        Ok(parameters) => parameters,
        Err(e) => {
            eprintln!("Invalid --start-date value: {e}");
            return;
        }
    };

    let snapshot_dir = args.snapshot_dir.as_deref();
    let source = match select_source(&config, snapshot_dir, args.base_url.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to set up estimation data source: {e}");
            return;
        }
    };

    let calendar_path = args.calendar.as_deref().or(config.calendar_file.as_deref());
    let calendar = match calendar_path {
        Some(path) => match load_work_calendar_from_yaml_file(path) {
            Ok(calendar) => calendar,
            Err(e) => {
                eprintln!("Failed to load work calendar: {e}");
                return;
            }
        },
        None => WorkCalendar::new(),
    };

    let record = args.record.to_record();
    let mut session = RecordSession::new(source, config.in_progress_policy());
    session.load_record(record.clone()).await;
    let view = session.view(&parameters, now);

    let delivery = match &view {
        SessionView::Analyzed(analysis) => forecast_delivery(
            analysis.duration.remaining.projected,
            analysis.settings.start_date,
            &calendar,
        ),
        _ => None,
    };
    println!("{}", format_session_view(&record, &view, delivery.as_ref()));

    if let (Some(output), SessionView::Analyzed(analysis)) = (args.output.as_deref(), view) {
        let report = ForecastReport {
            record: record.id().to_string(),
            analysis,
            delivery,
        };
        let yaml = match serde_yaml::to_string(&report) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize analysis: {e:?}");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(output, yaml).await {
            eprintln!("Failed to write analysis output: {e:?}");
        } else {
            println!("Analysis written to {output}");
        }
    }
}

fn load_config(path: Option<&str>) -> Result<ForecastConfig, ConfigError> {
    match path {
        Some(path) => ForecastConfig::from_yaml_file(path),
        None => Ok(ForecastConfig::default()),
    }
}

/// Command-line flags win over config values.
pub(crate) fn merge_parameters(
    base: &AnalysisParameters,
    args: &AnalyzeArgs,
) -> Result<AnalysisParameters, SnapshotYamlError> {
    let start_date: Option<DateTime<Utc>> =
        args.start_date.as_deref().map(parse_timestamp).transpose()?;

    Ok(AnalysisParameters {
        estimate_uncertainty: args.uncertainty.unwrap_or(base.estimate_uncertainty),
        total_assignees: args.assignees.unwrap_or(base.total_assignees),
        fancy_math: toggle(args.fancy_math, args.no_fancy_math).unwrap_or(base.fancy_math),
        default_estimate: args.default_estimate.or(base.default_estimate),
        default_velocity: args.default_velocity.or(base.default_velocity),
        start_date: start_date.or(base.start_date),
        analyze_progress: toggle(args.analyze_progress, args.skip_progress)
            .unwrap_or(base.analyze_progress),
    })
}

/// Resolves an on/off flag pair; `None` keeps the config value.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Snapshot directories take precedence over HTTP, flags over config.
pub(crate) fn select_source(
    config: &ForecastConfig,
    snapshot_dir: Option<&str>,
    base_url: Option<&str>,
) -> Result<SnapshotSource, DataSourceError> {
    if let Some(dir) = snapshot_dir {
        return Ok(SnapshotSource::Files(YamlSnapshotProvider::new(dir)));
    }
    if let Some(url) = base_url {
        return http_source(url);
    }
    if let Some(dir) = &config.snapshot_dir {
        return Ok(SnapshotSource::Files(YamlSnapshotProvider::new(dir)));
    }
    if let Some(url) = &config.base_url {
        return http_source(url);
    }
    Err(DataSourceError::Other(
        "no snapshot_dir or base_url configured".to_string(),
    ))
}

fn http_source(base_url: &str) -> Result<SnapshotSource, DataSourceError> {
    let provider = HttpSnapshotProvider::new(base_url, AuthData::from_env().ok())?;
    Ok(SnapshotSource::Http(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::base_commands::{CliArgs, Commands};
    use crate::test_support::at;
    use clap::Parser;

    fn analyze_args(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["projected-duration", "analyze", "-r", "FEAT-1"];
        argv.extend_from_slice(extra);
        match CliArgs::parse_from(argv).command {
            Commands::Analyze(args) => args,
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn flags_override_config_parameters() {
        let base = AnalysisParameters {
            estimate_uncertainty: 40.0,
            total_assignees: 2,
            default_estimate: Some(3.0),
            ..AnalysisParameters::default()
        };
        let args = analyze_args(&["-u", "10", "--skip-progress", "-s", "2026-03-09"]);

        let merged = merge_parameters(&base, &args).unwrap();
        assert_eq!(merged.estimate_uncertainty, 10.0);
        assert_eq!(merged.total_assignees, 2);
        assert_eq!(merged.default_estimate, Some(3.0));
        assert!(!merged.analyze_progress);
        assert_eq!(merged.start_date, Some(at(2026, 3, 9, 0)));
    }

    #[test]
    fn flags_can_undo_config_toggles() {
        let base = AnalysisParameters {
            fancy_math: true,
            analyze_progress: false,
            ..AnalysisParameters::default()
        };

        let merged = merge_parameters(&base, &analyze_args(&[])).unwrap();
        assert!(merged.fancy_math);
        assert!(!merged.analyze_progress);

        let args = analyze_args(&["--no-fancy-math", "--analyze-progress"]);
        let merged = merge_parameters(&base, &args).unwrap();
        assert!(!merged.fancy_math);
        assert!(merged.analyze_progress);
    }

    #[test]
    fn invalid_start_date_is_rejected() {
        let args = analyze_args(&["-s", "next week"]);
        assert!(merge_parameters(&AnalysisParameters::default(), &args).is_err());
    }

    #[test]
    fn snapshot_dir_flag_wins_over_config_url() {
        let config = ForecastConfig {
            base_url: Some("http://localhost:1".to_string()),
            ..ForecastConfig::default()
        };
        let source = select_source(&config, Some("snapshots"), None).unwrap();
        assert!(matches!(source, SnapshotSource::Files(_)));
    }

    #[test]
    fn config_url_is_used_without_flags() {
        let config = ForecastConfig {
            base_url: Some("http://localhost:1".to_string()),
            ..ForecastConfig::default()
        };
        let source = select_source(&config, None, None).unwrap();
        assert!(matches!(source, SnapshotSource::Http(_)));
    }

    #[test]
    fn missing_source_is_an_error() {
        let result = select_source(&ForecastConfig::default(), None, None);
        assert!(matches!(result, Err(DataSourceError::Other(_))));
    }
}
