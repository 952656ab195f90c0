use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::analysis::DayRange;
use crate::domain::calendar::WorkCalendar;

/// Roughly four centuries; longer forecasts are not dated.
const MAX_FORECAST_BUSINESS_DAYS: f64 = 100_000.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Advances `start_date` by the remaining band, rounded up to whole business days.
pub fn forecast_delivery(
    remaining: DayRange,
    start_date: DateTime<Utc>,
    calendar: &WorkCalendar,
) -> Option<DeliveryWindow> {
    let start = start_date.date_naive();
    Some(DeliveryWindow {
        earliest: calendar.add_business_days(start, whole_days(remaining.low())?)?,
        latest: calendar.add_business_days(start, whole_days(remaining.high())?)?,
    })
}

fn whole_days(days: f64) -> Option<u32> {
    let days = days.ceil().max(0.0);
    if days <= MAX_FORECAST_BUSINESS_DAYS {
        Some(days as u32)
    } else {
        None
    }
}
