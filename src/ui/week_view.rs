use chrono::{Local, NaiveDate, Timelike};

use crate::app::AppState;
use crate::calendar::{DateWindow, Event};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub events: Vec<EventBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: String,
    pub title: String,
    pub start_hour: u32,
    pub start_minute: u32,
    pub duration_minutes: i64,
    pub all_day: bool,
}

impl EventBlock {
    pub fn from_event(event: &Event) -> Self {
        let start = event.start.with_timezone(&Local);
        Self {
            event_id: event.id.clone(),
            title: event.title.clone(),
            start_hour: start.hour(),
            start_minute: start.minute(),
            duration_minutes: event.duration_minutes(),
            all_day: event.is_all_day(),
        }
    }

    pub fn time_label(&self) -> String {
        if self.all_day {
            "all day".to_string()
        } else {
            format!("{:02}:{:02}", self.start_hour, self.start_minute)
        }
    }
}

pub fn calculate_layout(state: &AppState) -> WeekLayout {
    let week = DateWindow::week_of(state.selected_date, state.week_start);
    let today = chrono::Local::now().date_naive();

    let days = week
        .iter_days()
        .map(|date| DayColumn {
            date,
            is_selected: date == state.selected_date,
            is_today: date == today,
            events: state
                .get_events_for_date(date)
                .into_iter()
                .map(EventBlock::from_event)
                .collect(),
        })
        .collect();

    WeekLayout {
        week_start: week.start,
        days,
    }
}
