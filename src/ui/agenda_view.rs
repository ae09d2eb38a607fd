use chrono::{Local, NaiveDate};

use crate::app::{local_date, AppState};
use crate::calendar::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaLayout {
    pub days: Vec<AgendaDay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub entries: Vec<AgendaEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaEntry {
    pub event_id: String,
    pub time_range: String,
    pub title: String,
    pub location: String,
    pub is_selected: bool,
}

pub fn time_range(event: &Event) -> String {
    if event.is_all_day() {
        return "all day".to_string();
    }

    let start = event.start.with_timezone(&Local);
    let end = event.end.with_timezone(&Local);
    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
}

/// Window events grouped by local start date; days without events are
/// omitted. Events that began before the window sit under its first day.
pub fn calculate_layout(state: &AppState) -> AgendaLayout {
    let today = Local::now().date_naive();
    let selected_id = state.get_selected_event().map(|e| e.id.clone());
    let mut days: Vec<AgendaDay> = Vec::new();

    for event in state.get_events_in_window() {
        let date = local_date(&event.start).max(state.window.start);
        let entry = AgendaEntry {
            event_id: event.id.clone(),
            time_range: time_range(event),
            title: event.title.clone(),
            location: event.location.clone(),
            is_selected: selected_id.as_deref() == Some(event.id.as_str()),
        };

        match days.last_mut() {
            Some(day) if day.date == date => day.entries.push(entry),
            _ => days.push(AgendaDay {
                date,
                is_today: date == today,
                entries: vec![entry],
            }),
        }
    }

    AgendaLayout { days }
}
