use chrono::{Days, Months};
use crossterm::event::KeyCode;

use crate::app::{AppState, Mode, ViewType};
use crate::calendar::date_range::first_of_month;

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') => shift_days(state, -1),
        KeyCode::Char('l') => shift_days(state, 1),
        KeyCode::Char('j') => {
            if uses_event_list(state) {
                state.move_event_selection_down();
            } else {
                shift_days(state, 7);
            }
        }
        KeyCode::Char('k') => {
            if uses_event_list(state) {
                state.move_event_selection_up();
            } else {
                shift_days(state, -7);
            }
        }
        KeyCode::Char('t') => state.navigate_to(chrono::Local::now().date_naive()),
        KeyCode::Char('g') => state.navigate_to(first_of_month(state.selected_date)),
        KeyCode::Char('G') => move_to_end_of_month(state),
        KeyCode::Char('{') => shift_months(state, -1),
        KeyCode::Char('}') => shift_months(state, 1),
        KeyCode::Char('[') => shift_period(state, false),
        KeyCode::Char(']') => shift_period(state, true),
        KeyCode::Char('m') => state.set_view(ViewType::Month),
        KeyCode::Char('w') => state.set_view(ViewType::Week),
        KeyCode::Char('d') => state.set_view(ViewType::Day),
        KeyCode::Char('A') => state.set_view(ViewType::Agenda),
        KeyCode::Char('a') => state.open_new_event_form(None),
        KeyCode::Char('E') => state.open_selected_event(),
        KeyCode::Enter => handle_enter_key(state),
        KeyCode::Char('x') => state.export_selected_event(),
        KeyCode::Char('X') => state.export_visible_range(),
        KeyCode::Char('r') => state.request_events(),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => {
            state.show_help = true;
            state.help_scroll = 0;
        }
        _ => {}
    }
}

fn uses_event_list(state: &AppState) -> bool {
    matches!(state.view, ViewType::Day | ViewType::Agenda) || !state.listed_events().is_empty()
}

fn shift_days(state: &mut AppState, days: i64) {
    let moved = if days >= 0 {
        state.selected_date.checked_add_days(Days::new(days as u64))
    } else {
        state.selected_date.checked_sub_days(Days::new(days.unsigned_abs()))
    };

    if let Some(date) = moved {
        state.navigate_to(date);
    }
}

/// Same day of month in the neighbouring month, clamped to its length.
fn shift_months(state: &mut AppState, months: i32) {
    let moved = if months >= 0 {
        state.selected_date.checked_add_months(Months::new(months as u32))
    } else {
        state.selected_date.checked_sub_months(Months::new(months.unsigned_abs()))
    };

    if let Some(date) = moved {
        state.navigate_to(date);
    }
}

fn shift_period(state: &mut AppState, forward: bool) {
    let sign = if forward { 1 } else { -1 };
    match state.view {
        ViewType::Month | ViewType::Agenda => shift_months(state, sign),
        ViewType::Week => shift_days(state, 7 * sign as i64),
        ViewType::Day => shift_days(state, sign as i64),
    }
}

fn move_to_end_of_month(state: &mut AppState) {
    let first = first_of_month(state.selected_date);
    if let Some(last) = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
    {
        state.navigate_to(last);
    }
}

fn handle_enter_key(state: &mut AppState) {
    match state.view {
        ViewType::Month | ViewType::Week if state.get_selected_event().is_none() => {
            state.set_view(ViewType::Day);
        }
        _ => state.open_selected_event(),
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Effect;
    use crate::calendar::event::fixtures::event_at;
    use crate::calendar::DateWindow;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state_on(anchor: NaiveDate) -> AppState {
        let mut state = AppState::new();
        state.navigate_to(anchor);
        state.take_effects();
        state
    }

    #[test]
    fn h_key_moves_to_previous_day() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('h'), &mut state);

        assert_eq!(state.selected_date, date(2025, 1, 14));
    }

    #[test]
    fn l_key_moves_to_next_day() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('l'), &mut state);

        assert_eq!(state.selected_date, date(2025, 1, 16));
    }

    #[test]
    fn l_key_across_month_end_fetches_next_month() {
        let mut state = state_on(date(2025, 1, 31));

        handle_key(KeyCode::Char('l'), &mut state);

        assert_eq!(
            state.take_effects(),
            vec![Effect::FetchEvents {
                window: DateWindow::new(date(2025, 2, 1), date(2025, 3, 1)),
                generation: state.fetch_generation(),
            }]
        );
    }

    #[test]
    fn j_key_moves_down_one_week_when_no_events() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('j'), &mut state);

        assert_eq!(state.selected_date, date(2025, 1, 22));
    }

    #[test]
    fn k_key_moves_up_one_week_when_no_events() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('k'), &mut state);

        assert_eq!(state.selected_date, date(2025, 1, 8));
    }

    #[test]
    fn j_key_selects_next_event_when_day_has_events() {
        let mut state = state_on(date(2025, 1, 15));
        state.add_event(event_at("a", date(2025, 1, 15), 9, 0, 30));
        state.add_event(event_at("b", date(2025, 1, 15), 11, 0, 30));

        handle_key(KeyCode::Char('j'), &mut state);

        assert_eq!(state.selected_date, date(2025, 1, 15));
        assert_eq!(state.get_selected_event().unwrap().id, "b");
    }

    #[test]
    fn t_key_jumps_to_today() {
        let mut state = state_on(date(2025, 1, 1));

        handle_key(KeyCode::Char('t'), &mut state);

        assert_eq!(state.selected_date, chrono::Local::now().date_naive());
    }

    #[test]
    fn g_key_moves_to_first_day_of_month() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('g'), &mut state);

        assert_eq!(state.selected_date, date(2025, 1, 1));
    }

    #[test]
    fn shift_g_moves_to_last_day_of_month() {
        let mut state = state_on(date(2025, 2, 15));

        handle_key(KeyCode::Char('G'), &mut state);

        assert_eq!(state.selected_date, date(2025, 2, 28));
    }

    #[test]
    fn left_brace_moves_to_previous_month() {
        let mut state = state_on(date(2025, 2, 15));

        handle_key(KeyCode::Char('{'), &mut state);

        assert_eq!(state.selected_date, date(2025, 1, 15));
    }

    #[test]
    fn right_brace_clamps_to_shorter_month() {
        let mut state = state_on(date(2025, 1, 31));

        handle_key(KeyCode::Char('}'), &mut state);

        assert_eq!(state.selected_date, date(2025, 2, 28));
    }

    #[test]
    fn bracket_moves_by_visible_period() {
        let mut state = state_on(date(2025, 1, 15));
        state.set_view(ViewType::Week);

        handle_key(KeyCode::Char(']'), &mut state);
        assert_eq!(state.selected_date, date(2025, 1, 22));

        state.set_view(ViewType::Day);
        handle_key(KeyCode::Char('['), &mut state);
        assert_eq!(state.selected_date, date(2025, 1, 21));
    }

    #[test]
    fn view_keys_switch_views() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('w'), &mut state);
        assert_eq!(state.view, ViewType::Week);
        handle_key(KeyCode::Char('d'), &mut state);
        assert_eq!(state.view, ViewType::Day);
        handle_key(KeyCode::Char('A'), &mut state);
        assert_eq!(state.view, ViewType::Agenda);
        handle_key(KeyCode::Char('m'), &mut state);
        assert_eq!(state.view, ViewType::Month);
    }

    #[test]
    fn a_key_opens_blank_form() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('a'), &mut state);

        assert_eq!(state.mode, Mode::Insert);
        let form = state.event_form.as_ref().unwrap();
        assert!(!form.is_editing());
        assert_eq!(form.heading(), "Add new event");
    }

    #[test]
    fn enter_on_event_opens_edit_form() {
        let mut state = state_on(date(2025, 1, 15));
        state.add_event(event_at("e1", date(2025, 1, 15), 9, 0, 30));

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.event_form.as_ref().unwrap().heading(), "Event e1");
    }

    #[test]
    fn enter_on_empty_day_zooms_into_day_view() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.view, ViewType::Day);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn r_key_refetches_current_window() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('r'), &mut state);

        assert_eq!(state.take_effects().len(), 1);
    }

    #[test]
    fn question_mark_opens_help() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('?'), &mut state);

        assert!(state.show_help);
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char(':'), &mut state);

        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.command_buffer, ":");
    }
}
