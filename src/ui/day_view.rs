use chrono::{Local, NaiveDate, Timelike};

use crate::app::AppState;
use crate::calendar::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub is_today: bool,
    pub all_day: Vec<EventEntry>,
    pub hours: Vec<HourBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourBlock {
    pub hour: u32,
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
    pub event_id: String,
    pub title: String,
    pub start_minute: u32,
    pub duration_minutes: i64,
    pub location: Option<String>,
    pub organizer: String,
    pub attendee_count: usize,
}

impl EventEntry {
    fn from_event(event: &Event) -> Self {
        Self {
            event_id: event.id.clone(),
            title: event.title.clone(),
            start_minute: event.start.with_timezone(&Local).minute(),
            duration_minutes: event.duration_minutes(),
            location: (!event.location.is_empty()).then(|| event.location.clone()),
            organizer: event.organizer.name.clone(),
            attendee_count: event.attendees.len(),
        }
    }
}

/// Events carried over from an earlier day open the day at midnight.
fn start_hour_on(event: &Event, date: NaiveDate) -> u32 {
    let start = event.start.with_timezone(&Local);
    if start.date_naive() < date { 0 } else { start.hour() }
}

/// All 24 local hours of the selected day; all-day events sit apart.
pub fn calculate_layout(state: &AppState) -> DayLayout {
    let date = state.selected_date;
    let today = chrono::Local::now().date_naive();
    let events = state.get_events_for_date(date);

    let (all_day, timed): (Vec<&Event>, Vec<&Event>) = events.into_iter().partition(|e| e.is_all_day());

    let hours = (0..24)
        .map(|hour| HourBlock {
            hour,
            events: timed
                .iter()
                .filter(|e| start_hour_on(e, date) == hour)
                .map(|e| EventEntry::from_event(e))
                .collect(),
        })
        .collect();

    DayLayout {
        date,
        is_today: date == today,
        all_day: all_day.into_iter().map(EventEntry::from_event).collect(),
        hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::fixtures::event_at;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state_on(anchor: NaiveDate) -> AppState {
        let mut state = AppState::new();
        state.navigate_to(anchor);
        state
    }

    #[test]
    fn day_layout_has_24_hours() {
        let layout = calculate_layout(&state_on(date(2025, 1, 15)));

        assert_eq!(layout.date, date(2025, 1, 15));
        assert_eq!(layout.hours.len(), 24);
        assert_eq!(layout.hours[23].hour, 23);
    }

    #[test]
    fn events_are_placed_in_their_hour() {
        let mut state = state_on(date(2025, 1, 15));
        let mut event = event_at("e1", date(2025, 1, 15), 14, 30, 90);
        event.location = "Room 2".to_string();
        state.add_event(event);

        let layout = calculate_layout(&state);

        let entry = &layout.hours[14].events[0];
        assert_eq!(entry.event_id, "e1");
        assert_eq!(entry.start_minute, 30);
        assert_eq!(entry.duration_minutes, 90);
        assert_eq!(entry.location.as_deref(), Some("Room 2"));
        assert!(layout.hours[13].events.is_empty());
    }

    #[test]
    fn all_day_events_are_listed_separately() {
        let mut state = state_on(date(2025, 1, 15));
        let mut event = event_at("holiday", date(2025, 1, 15), 0, 0, 24 * 60);
        event.all_day = Some(true);
        state.add_event(event);

        let layout = calculate_layout(&state);

        assert_eq!(layout.all_day.len(), 1);
        assert!(layout.hours.iter().all(|h| h.events.is_empty()));
    }

    #[test]
    fn other_days_are_excluded() {
        let mut state = state_on(date(2025, 1, 15));
        state.add_event(event_at("tomorrow", date(2025, 1, 16), 9, 0, 30));

        let layout = calculate_layout(&state);

        assert!(layout.hours.iter().all(|h| h.events.is_empty()));
    }

    #[test]
    fn event_from_previous_day_opens_at_midnight() {
        let mut state = state_on(date(2025, 1, 15));
        state.add_event(event_at("overnight", date(2025, 1, 14), 22, 0, 4 * 60));

        let layout = calculate_layout(&state);

        assert_eq!(layout.hours[0].events[0].event_id, "overnight");
        assert!(layout.hours[22].events.is_empty());
    }
}
