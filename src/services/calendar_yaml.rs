use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::calendar::{Holiday, WorkCalendar};

#[derive(Error, Debug)]
pub enum CalendarYamlError {
    #[error("failed to read calendar yaml file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse calendar yaml file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid weekday value in {path}: {value}")]
    InvalidWeekday { path: PathBuf, value: String },
    #[error("invalid date format in {path}: {value} (expected YYYY-MM-DD)")]
    InvalidDate { path: PathBuf, value: String },
    #[error("invalid holiday in {path}: start_date {start_date} is after end_date {end_date}")]
    InvalidHoliday {
        path: PathBuf,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

#[derive(Debug, Deserialize)]
struct CalendarRecord {
    free_weekdays: Option<Vec<String>>,
    #[serde(default)]
    holidays: Vec<HolidayRecord>,
}

/// A holiday is either a single date or a `start_date`/`end_date` range.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HolidayRecord {
    Day(String),
    Range { start_date: String, end_date: String },
}

/// Loads a [`WorkCalendar`] from a YAML file.
///
/// `free_weekdays` replaces the Saturday/Sunday default when present.
pub fn load_work_calendar_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<WorkCalendar, CalendarYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| CalendarYamlError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_work_calendar_from_yaml_str(&contents, path)
}

pub fn deserialize_work_calendar_from_yaml_str(
    input: &str,
    origin_path: &Path,
) -> Result<WorkCalendar, CalendarYamlError> {
    let record: CalendarRecord =
        serde_yaml::from_str(input).map_err(|source| CalendarYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        })?;

    let mut calendar = WorkCalendar::new();
    if let Some(free_weekdays) = record.free_weekdays {
        calendar.free_weekdays = free_weekdays
            .into_iter()
            .map(|value| {
                parse_weekday(&value).ok_or_else(|| CalendarYamlError::InvalidWeekday {
                    path: origin_path.to_path_buf(),
                    value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
    }

    calendar.holidays = record
        .holidays
        .into_iter()
        .map(|value| holiday_from_record(value, origin_path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(calendar)
}

fn holiday_from_record(
    value: HolidayRecord,
    origin_path: &Path,
) -> Result<Holiday, CalendarYamlError> {
    let (start_date, end_date) = match value {
        HolidayRecord::Day(date) => {
            let date = parse_date(&date, origin_path)?;
            (date, date)
        }
        HolidayRecord::Range {
            start_date,
            end_date,
        } => (
            parse_date(&start_date, origin_path)?,
            parse_date(&end_date, origin_path)?,
        ),
    };
    if start_date > end_date {
        return Err(CalendarYamlError::InvalidHoliday {
            path: origin_path.to_path_buf(),
            start_date,
            end_date,
        });
    }
    Ok(Holiday {
        start_date,
        end_date,
    })
}

fn parse_date(value: &str, origin_path: &Path) -> Result<NaiveDate, CalendarYamlError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CalendarYamlError::InvalidDate {
        path: origin_path.to_path_buf(),
        value: value.to_string(),
    })
}

fn parse_weekday(value: &str) -> Option<Weekday> {
    match value.trim().to_ascii_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
