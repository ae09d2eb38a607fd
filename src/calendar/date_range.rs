use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    Month,
    Week,
    Day,
    Agenda,
}

impl ViewType {
    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Month => "Month",
            ViewType::Week => "Week",
            ViewType::Day => "Day",
            ViewType::Agenda => "Agenda",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" | "m" => Ok(ViewType::Month),
            "week" | "w" => Ok(ViewType::Week),
            "day" | "d" => Ok(ViewType::Day),
            "agenda" | "a" => Ok(ViewType::Agenda),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}

/// Half-open range of local dates `[start, end)` that the calendar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn resolve(anchor: NaiveDate, view: ViewType, week_start: Weekday) -> Self {
        match view {
            ViewType::Month | ViewType::Agenda => Self::month_of(anchor),
            ViewType::Week => Self::week_of(anchor, week_start),
            ViewType::Day => Self::day_of(anchor),
        }
    }

    pub fn month_of(anchor: NaiveDate) -> Self {
        let start = first_of_month(anchor);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn week_of(anchor: NaiveDate, week_start: Weekday) -> Self {
        let start = week_start_of(anchor, week_start);
        let end = start.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn day_of(anchor: NaiveDate) -> Self {
        let end = anchor.succ_opt().unwrap_or(NaiveDate::MAX);
        Self { start: anchor, end }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }

    /// Local midnight of `start` and `end` in `tz`, as UTC instants.
    pub fn utc_bounds<Tz: TimeZone>(&self, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        (local_midnight(self.start, tz), local_midnight(self.end, tz))
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let offset = offset as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        // Midnight skipped by a DST jump; the first hour that exists.
        None => (1..=3)
            .filter_map(|h| naive.checked_add_signed(chrono::Duration::hours(h)))
            .find_map(|n| tz.from_local_datetime(&n).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc()),
    }
}
