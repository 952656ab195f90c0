use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::snapshot::{StatusTransition, VelocitySample};

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

// Fixed clock for analyses: Monday 2026-03-02 09:00 UTC.
pub fn now() -> DateTime<Utc> {
    at(2026, 3, 2, 9)
}

pub fn transition(status: &str, entered_at: DateTime<Utc>) -> StatusTransition {
    StatusTransition {
        status: status.to_string(),
        entered_at,
    }
}

pub fn samples(values: &[f64]) -> Vec<VelocitySample> {
    values.iter().copied().map(VelocitySample::new).collect()
}
