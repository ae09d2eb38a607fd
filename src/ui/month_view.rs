use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::app::AppState;
use crate::calendar::date_range::{first_of_month, week_start_of};
use crate::calendar::DateWindow;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weekdays: Vec<Weekday>,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub event_count: usize,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

/// Column headers starting at `week_start`.
pub fn weekday_headers(week_start: Weekday) -> Vec<Weekday> {
    std::iter::successors(Some(week_start), |d| Some(d.succ()))
        .take(7)
        .collect()
}

/// Whole weeks covering the selected month. Leading and trailing days of
/// neighbouring months are included but flagged.
pub fn calculate_layout(state: &AppState) -> MonthLayout {
    let month = DateWindow::month_of(state.selected_date);
    let today = chrono::Local::now().date_naive();
    let grid_start = week_start_of(first_of_month(state.selected_date), state.week_start);

    let mut weeks = Vec::new();
    let mut week_start = grid_start;
    while week_start < month.end {
        let days = (0..7u64)
            .filter_map(|offset| week_start.checked_add_days(Days::new(offset)))
            .map(|date| DayCell {
                date,
                is_selected: date == state.selected_date,
                is_today: date == today,
                event_count: state.get_events_for_date(date).len(),
                is_current_month: month.contains(date),
            })
            .collect();
        weeks.push(Week { days });

        let Some(next) = week_start.checked_add_days(Days::new(7)) else { break };
        week_start = next;
    }

    MonthLayout {
        year: state.selected_date.year(),
        month: state.selected_date.month(),
        weekdays: weekday_headers(state.week_start),
        weeks,
    }
}
