use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppState;
use crate::editor::FormField;

pub fn handle_key(key: KeyEvent, state: &mut AppState) {
    let Some(form) = state.event_form.as_mut() else {
        return;
    };

    if form.save_in_progress {
        if key.code == KeyCode::Esc {
            state.notice = Some("Save in progress".to_string());
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => state.submit_form(),
            KeyCode::Char('e') if form.is_editing() => state.export_selected_event(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            state.close_form();
        }
        KeyCode::Enter => state.submit_form(),
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        code if form.active_field == FormField::Attendees => match code {
            KeyCode::Char('j') | KeyCode::Down => form.move_attendee_cursor_down(state.users.len()),
            KeyCode::Char('k') | KeyCode::Up => form.move_attendee_cursor_up(),
            KeyCode::Char(' ') => form.toggle_attendee(&state.users),
            _ => {}
        },
        KeyCode::Backspace => {
            if let Some(text) = form.active_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = form.active_text_mut() {
                text.push(c);
            }
        }
        _ => {}
    }
}
