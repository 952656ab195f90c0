use chrono::Datelike;
use chrono::NaiveDate;
use chrono::Weekday;

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Holiday {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Which days count as business days when forecasting delivery dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkCalendar {
    pub free_weekdays: Vec<Weekday>,
    pub holidays: Vec<Holiday>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            free_weekdays: vec![Weekday::Sat, Weekday::Sun],
            holidays: Vec::new(),
        }
    }
}

impl WorkCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        if self.free_weekdays.contains(&date.weekday()) {
            return false;
        }
        !self.holidays.iter().any(|holiday| holiday.contains(date))
    }

    /// Moves `business_days` business days past `start`. Zero returns `start`.
    ///
    /// Returns `None` if the calendar has no business days at all or the
    /// date range overflows.
    pub fn add_business_days(&self, start: NaiveDate, business_days: u32) -> Option<NaiveDate> {
        if ALL_WEEKDAYS
            .iter()
            .all(|weekday| self.free_weekdays.contains(weekday))
        {
            return None;
        }
        let mut date = start;
        for _ in 0..business_days {
            date = self.next_business_day(date)?;
        }
        Some(date)
    }

    fn next_business_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut next = date.succ_opt()?;
        while !self.is_business_day(next) {
            next = next.succ_opt()?;
        }
        Some(next)
    }
}
