use chrono::{DateTime, Local, NaiveDate, TimeZone, Weekday};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::calendar::{DateWindow, Event, NewEvent, SaveAck, User};
use crate::editor::EventForm;
use crate::sync::event_api::ApiError;
use crate::sync::sync_engine::SyncError;
use crate::ui::theme::Theme;

pub use crate::calendar::ViewType;

const DROPPED_ATTENDEES: &str = "Dropped unknown attendees: ";

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Server,
    Rejected,
    Validation,
    Local,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Network => "network error",
            ErrorKind::Server => "server error",
            ErrorKind::Rejected => "rejected",
            ErrorKind::Validation => "invalid input",
            ErrorKind::Local => "local error",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Error { kind: ErrorKind, message: String },
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Synced => f.write_str("synced"),
            SyncStatus::Syncing => f.write_str("syncing…"),
            SyncStatus::Error { kind, message } => write!(f, "{}: {}", kind, message),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportTarget {
    Event(String),
    Range(DateWindow),
}

/// Work the UI asks the sync engine to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchEvents { window: DateWindow, generation: u64 },
    FetchUsers,
    SaveEvent { event_id: Option<String>, payload: NewEvent },
    Export(ExportTarget),
}

/// Result of an [`Effect`], delivered back to the UI loop.
#[derive(Debug)]
pub enum SyncOutcome {
    EventsLoaded { generation: u64, result: Result<Vec<Event>, ApiError> },
    UsersLoaded(Result<Vec<User>, ApiError>),
    Saved(Result<SaveAck, ApiError>),
    Exported(Result<PathBuf, SyncError>),
}

pub struct AppState {
    pub mode: Mode,
    pub view: ViewType,
    pub selected_date: NaiveDate,
    pub week_start: Weekday,
    pub window: DateWindow,
    pub events: HashMap<String, Event>,
    pub users: Vec<User>,
    pub sync_status: SyncStatus,
    pub notice: Option<String>,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub event_form: Option<EventForm>,
    pub selected_event_index: usize,
    fetch_generation: u64,
    effects: Vec<Effect>,
}

impl AppState {
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            mode: Mode::Normal,
            view: ViewType::Month,
            selected_date: today,
            week_start: Weekday::Mon,
            window: DateWindow::resolve(today, ViewType::Month, Weekday::Mon),
            events: HashMap::new(),
            users: Vec::new(),
            sync_status: SyncStatus::Synced,
            notice: None,
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            event_form: None,
            selected_event_index: 0,
            fetch_generation: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self.window = self.resolve_window();
        self
    }

    pub fn with_view(mut self, view: ViewType) -> Self {
        self.view = view;
        self.window = self.resolve_window();
        self
    }

    /// Queues the start-up loads: directory snapshot and the first window.
    pub fn start(&mut self) {
        self.effects.push(Effect::FetchUsers);
        self.request_events();
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    fn resolve_window(&self) -> DateWindow {
        DateWindow::resolve(self.selected_date, self.view, self.week_start)
    }

    pub fn request_events(&mut self) {
        self.fetch_generation += 1;
        self.sync_status = SyncStatus::Syncing;
        self.effects.push(Effect::FetchEvents {
            window: self.window,
            generation: self.fetch_generation,
        });
    }

    /// Moves the anchor; refetches only when the visible window changes.
    pub fn navigate_to(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.reset_event_selection();

        let window = self.resolve_window();
        if window != self.window {
            tracing::info!("Window moved to {}", window);
            self.window = window;
            self.request_events();
        }
    }

    /// Switching to a different view always recomputes and refetches once.
    pub fn set_view(&mut self, view: ViewType) {
        if view == self.view {
            return;
        }

        self.view = view;
        self.window = self.resolve_window();
        self.reset_event_selection();
        tracing::info!("Switched to {} view, window {}", view, self.window);
        self.request_events();
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.insert(event.id.clone(), event);
    }

    pub fn replace_events(&mut self, events: Vec<Event>) {
        self.events = events.into_iter().map(|e| (e.id.clone(), e)).collect();
        let listed = self.listed_events().len();
        if self.selected_event_index >= listed {
            self.selected_event_index = listed.saturating_sub(1);
        }
    }

    /// Events overlapping the local day, including ones that started earlier.
    pub fn get_events_for_date(&self, date: NaiveDate) -> Vec<&Event> {
        let (start, end) = DateWindow::day_of(date).utc_bounds(&Local);
        let mut events: Vec<&Event> = self
            .events
            .values()
            .filter(|event| event.overlaps(start, end))
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        events
    }

    pub fn get_events_in_window(&self) -> Vec<&Event> {
        let (start, end) = self.window.utc_bounds(&Local);
        let mut events: Vec<&Event> = self
            .events
            .values()
            .filter(|event| event.overlaps(start, end))
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        events
    }

    /// Events in the side list: the whole window in agenda view, otherwise
    /// the selected day.
    pub fn listed_events(&self) -> Vec<&Event> {
        if self.view == ViewType::Agenda {
            self.get_events_in_window()
        } else {
            self.get_events_for_date(self.selected_date)
        }
    }

    pub fn get_selected_event(&self) -> Option<&Event> {
        self.listed_events().get(self.selected_event_index).copied()
    }

    pub fn move_event_selection_down(&mut self) {
        let event_count = self.listed_events().len();
        if event_count > 0 && self.selected_event_index < event_count - 1 {
            self.selected_event_index += 1;
        }
    }

    pub fn move_event_selection_up(&mut self) {
        if self.selected_event_index > 0 {
            self.selected_event_index -= 1;
        }
    }

    pub fn reset_event_selection(&mut self) {
        self.selected_event_index = 0;
    }

    pub fn open_new_event_form(&mut self, title: Option<String>) {
        let form = EventForm::blank(Local::now().naive_local()).with_title(title.unwrap_or_default());
        self.event_form = Some(form);
        self.mode = Mode::Insert;
    }

    pub fn open_selected_event(&mut self) {
        self.open_selected_event_in(&Local);
    }

    pub fn open_selected_event_in<Tz: TimeZone>(&mut self, tz: &Tz)
    where
        Tz::Offset: fmt::Display,
    {
        let Some(event) = self.get_selected_event() else {
            return;
        };

        tracing::info!("Editing event {}", event.id);
        let form = EventForm::for_event(event, &self.users, tz);
        self.event_form = Some(form);
        self.mode = Mode::Insert;
    }

    /// Closes the modal unless a save is still in flight.
    pub fn close_form(&mut self) -> bool {
        if self.event_form.as_ref().is_some_and(|f| f.save_in_progress) {
            return false;
        }

        self.event_form = None;
        self.mode = Mode::Normal;
        true
    }

    pub fn submit_form(&mut self) {
        self.submit_form_in(&Local);
    }

    pub fn submit_form_in<Tz: TimeZone>(&mut self, tz: &Tz) {
        let Some(form) = self.event_form.as_mut() else {
            return;
        };

        if form.save_in_progress {
            return;
        }

        let input = match form.validate(tz) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!("Form rejected: {}", e);
                form.error = Some(e.to_string());
                self.sync_status = SyncStatus::Error {
                    kind: ErrorKind::Validation,
                    message: e.to_string(),
                };
                return;
            }
        };

        let submission = input.into_submission(&self.users);
        self.notice = None;
        if !submission.unresolved_attendees.is_empty() {
            tracing::warn!(
                "Dropping attendees not in directory: {:?}",
                submission.unresolved_attendees
            );
            self.notice = Some(format!(
                "{}{}",
                DROPPED_ATTENDEES,
                submission
                    .unresolved_attendees
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        form.error = None;
        form.save_in_progress = true;
        self.sync_status = SyncStatus::Syncing;
        self.effects.push(Effect::SaveEvent {
            event_id: form.event_id.clone(),
            payload: submission.payload,
        });
    }

    /// Exports the event being edited, or the one selected in the list.
    pub fn export_selected_event(&mut self) {
        let event_id = self
            .event_form
            .as_ref()
            .and_then(|form| form.event_id.clone())
            .or_else(|| self.get_selected_event().map(|e| e.id.clone()));

        match event_id {
            Some(id) => {
                self.sync_status = SyncStatus::Syncing;
                self.effects.push(Effect::Export(ExportTarget::Event(id)));
            }
            None => self.notice = Some("No event selected".to_string()),
        }
    }

    pub fn export_visible_range(&mut self) {
        self.sync_status = SyncStatus::Syncing;
        self.effects.push(Effect::Export(ExportTarget::Range(self.window)));
    }

    pub fn apply(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::EventsLoaded { generation, result } => {
                if generation != self.fetch_generation {
                    tracing::warn!(
                        "Discarding events of superseded fetch {} (current {})",
                        generation,
                        self.fetch_generation
                    );
                    return;
                }

                match result {
                    Ok(events) => {
                        self.replace_events(events);
                        self.sync_status = SyncStatus::Synced;
                    }
                    Err(e) => self.fail(e.kind(), format!("Failed to load events: {}", e)),
                }
            }
            SyncOutcome::UsersLoaded(result) => match result {
                Ok(users) => self.users = users,
                Err(e) => {
                    tracing::error!("Failed to load directory: {}", e);
                    self.notice = Some(format!("Directory unavailable ({}): {}", e.kind(), e));
                }
            },
            SyncOutcome::Saved(result) => match result {
                Ok(_) => {
                    self.event_form = None;
                    self.mode = Mode::Normal;
                    self.notice = Some(match self.notice.take() {
                        Some(dropped) if dropped.starts_with(DROPPED_ATTENDEES) => {
                            format!("Event saved. {}", dropped)
                        }
                        _ => "Event saved".to_string(),
                    });
                    self.request_events();
                }
                Err(e) => {
                    if let Some(form) = self.event_form.as_mut() {
                        form.save_in_progress = false;
                        form.error = Some(e.to_string());
                    }
                    self.fail(e.kind(), format!("Failed to save: {}", e));
                }
            },
            SyncOutcome::Exported(result) => match result {
                Ok(path) => {
                    self.notice = Some(format!("Exported to {}", path.display()));
                    self.sync_status = SyncStatus::Synced;
                }
                Err(e) => self.fail(e.kind(), format!("Export failed: {}", e)),
            },
        }
    }

    fn fail(&mut self, kind: ErrorKind, message: String) {
        tracing::error!("{}", message);
        self.sync_status = SyncStatus::Error { kind, message };
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn local_date(instant: &DateTime<chrono::Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}
