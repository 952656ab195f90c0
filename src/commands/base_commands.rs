use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::record::{Record, RecordId};

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast duration, delivery window and risk for one record
    Analyze(AnalyzeArgs),
    /// Fetch a record's estimation data from the API and serialize to YAML
    GetSnapshot {
        #[command(flatten)]
        record: RecordArgs,
        /// Path to forecast config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Estimation API root URL (overrides the config)
        #[arg(short, long)]
        base_url: Option<String>,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Record id, e.g. FEAT-12
    #[arg(short, long)]
    pub record: String,
    /// Kind of record
    #[arg(short, long, value_enum, default_value_t = RecordKind::Feature)]
    pub kind: RecordKind,
}

impl RecordArgs {
    pub fn to_record(&self) -> Record {
        let id = RecordId::new(self.record.trim());
        match self.kind {
            RecordKind::Feature => Record::Feature(id),
            RecordKind::Requirement => Record::Requirement(id),
            RecordKind::Epic => Record::Epic(id),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Feature,
    Requirement,
    Epic,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub record: RecordArgs,
    /// Path to forecast config YAML
    #[arg(short, long)]
    pub config: Option<String>,
    /// Directory with <record id>.yaml snapshots (overrides the config)
    #[arg(short = 'd', long)]
    pub snapshot_dir: Option<String>,
    /// Estimation API root URL (overrides the config)
    #[arg(short, long)]
    pub base_url: Option<String>,
    /// Estimate uncertainty in percent
    #[arg(short, long, allow_negative_numbers = true)]
    pub uncertainty: Option<f64>,
    /// Number of people working on the record
    #[arg(short, long)]
    pub assignees: Option<u32>,
    /// Discount velocity by its historical volatility
    #[arg(long, conflicts_with = "no_fancy_math")]
    pub fancy_math: bool,
    /// Use the plain mean velocity even if the config enables fancy math
    #[arg(long)]
    pub no_fancy_math: bool,
    /// Points assumed when the record is unestimated
    #[arg(long, allow_negative_numbers = true)]
    pub default_estimate: Option<f64>,
    /// Points per day assumed when there is no velocity history
    #[arg(long, allow_negative_numbers = true)]
    pub default_velocity: Option<f64>,
    /// Delivery forecast start (YYYY-MM-DD or RFC 3339), defaults to now
    #[arg(short, long)]
    pub start_date: Option<String>,
    /// Only project durations, skip time-in-progress and risk
    #[arg(long, conflicts_with = "analyze_progress")]
    pub skip_progress: bool,
    /// Analyze time in progress even if the config disables it
    #[arg(long)]
    pub analyze_progress: bool,
    /// Evaluate as if the current time were this timestamp
    #[arg(long)]
    pub as_of: Option<String>,
    /// Work calendar YAML (overrides the config)
    #[arg(long)]
    pub calendar: Option<String>,
    /// Also write the analysis to this YAML file
    #[arg(short, long)]
    pub output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults_to_feature_records() {
        let args = CliArgs::parse_from(["projected-duration", "analyze", "-r", "FEAT-1", "-d", "data"]);

        if let Commands::Analyze(analyze) = args.command {
            assert_eq!(analyze.record.kind, RecordKind::Feature);
            assert_eq!(
                analyze.record.to_record(),
                Record::Feature(RecordId::new("FEAT-1"))
            );
            assert_eq!(analyze.snapshot_dir.as_deref(), Some("data"));
            assert_eq!(analyze.uncertainty, None);
            assert!(!analyze.fancy_math);
            assert!(!analyze.skip_progress);
        } else {
            panic!("expected analyze command");
        }
    }

    #[test]
    fn analyze_accepts_parameter_flags() {
        let args = CliArgs::parse_from([
            "projected-duration",
            "analyze",
            "-r",
            "EPIC-4",
            "-k",
            "epic",
            "-u",
            "-5",
            "-a",
            "3",
            "--fancy-math",
            "--skip-progress",
            "--default-velocity",
            "1.5",
        ]);

        if let Commands::Analyze(analyze) = args.command {
            assert_eq!(analyze.record.to_record(), Record::Epic(RecordId::new("EPIC-4")));
            assert_eq!(analyze.uncertainty, Some(-5.0));
            assert_eq!(analyze.assignees, Some(3));
            assert!(analyze.fancy_math);
            assert!(analyze.skip_progress);
            assert_eq!(analyze.default_velocity, Some(1.5));
        } else {
            panic!("expected analyze command");
        }
    }

    #[test]
    fn opposing_toggle_flags_conflict() {
        let fancy = CliArgs::try_parse_from([
            "projected-duration",
            "analyze",
            "-r",
            "FEAT-1",
            "--fancy-math",
            "--no-fancy-math",
        ]);
        assert!(fancy.is_err());

        let progress = CliArgs::try_parse_from([
            "projected-duration",
            "analyze",
            "-r",
            "FEAT-1",
            "--skip-progress",
            "--analyze-progress",
        ]);
        assert!(progress.is_err());
    }

    #[test]
    fn get_snapshot_requires_an_output_file() {
        let result = CliArgs::try_parse_from(["projected-duration", "get-snapshot", "-r", "FEAT-1"]);
        assert!(result.is_err());
    }
}
