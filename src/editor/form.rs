use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use thiserror::Error;

use crate::calendar::{Event, NewEvent, Organizer, User};
use crate::editor::attendees::{attendee_ids_for, resolve_attendees};

pub const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid {field} '{value}', expected YYYY-MM-DDTHH:MM")]
    InvalidDateTime { field: &'static str, value: String },
    #[error("End time is before start time")]
    EndBeforeStart,
    #[error("Invalid organizer email '{0}'")]
    InvalidEmail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Location,
    Description,
    Start,
    End,
    OrganizerName,
    OrganizerEmail,
    Attendees,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Location => "Location",
            FormField::Description => "Agenda",
            FormField::Start => "Start",
            FormField::End => "End",
            FormField::OrganizerName => "Organizer name",
            FormField::OrganizerEmail => "Organizer email",
            FormField::Attendees => "Attendees",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub location: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub organizer_name: String,
    pub organizer_email: String,
    pub attendee_ids: Vec<u64>,
    pub attendee_cursor: usize,
    pub active_field: FormField,
    pub event_id: Option<String>,
    pub event_title: Option<String>,
    pub save_in_progress: bool,
    pub error: Option<String>,
}

/// Form contents after validation, ready to be turned into a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub organizer: Organizer,
    pub attendee_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub payload: NewEvent,
    pub unresolved_attendees: Vec<u64>,
}

impl EventForm {
    /// Empty form; start at `now`, end an hour later.
    pub fn blank(now: NaiveDateTime) -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            description: String::new(),
            start: now.format(FORM_DATETIME_FORMAT).to_string(),
            end: (now + Duration::hours(1)).format(FORM_DATETIME_FORMAT).to_string(),
            organizer_name: String::new(),
            organizer_email: String::new(),
            attendee_ids: Vec::new(),
            attendee_cursor: 0,
            active_field: FormField::Title,
            event_id: None,
            event_title: None,
            save_in_progress: false,
            error: None,
        }
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn for_event<Tz: TimeZone>(event: &Event, directory: &[User], tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            title: event.title.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
            start: event.start.with_timezone(tz).format(FORM_DATETIME_FORMAT).to_string(),
            end: event.end.with_timezone(tz).format(FORM_DATETIME_FORMAT).to_string(),
            organizer_name: event.organizer.name.clone(),
            organizer_email: event.organizer.email.clone(),
            attendee_ids: attendee_ids_for(&event.attendees, directory),
            attendee_cursor: 0,
            active_field: FormField::Title,
            event_id: Some(event.id.clone()),
            event_title: Some(event.title.clone()),
            save_in_progress: false,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.event_id.is_some()
    }

    pub fn heading(&self) -> &str {
        self.event_title.as_deref().unwrap_or("Add new event")
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Title => FormField::Location,
            FormField::Location => FormField::Description,
            FormField::Description => FormField::Start,
            FormField::Start => FormField::End,
            FormField::End => FormField::OrganizerName,
            FormField::OrganizerName => FormField::OrganizerEmail,
            FormField::OrganizerEmail => FormField::Attendees,
            FormField::Attendees => FormField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Title => FormField::Attendees,
            FormField::Location => FormField::Title,
            FormField::Description => FormField::Location,
            FormField::Start => FormField::Description,
            FormField::End => FormField::Start,
            FormField::OrganizerName => FormField::End,
            FormField::OrganizerEmail => FormField::OrganizerName,
            FormField::Attendees => FormField::OrganizerEmail,
        };
    }

    /// Text buffer behind the active field; `None` on the attendee picker.
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.active_field {
            FormField::Title => Some(&mut self.title),
            FormField::Location => Some(&mut self.location),
            FormField::Description => Some(&mut self.description),
            FormField::Start => Some(&mut self.start),
            FormField::End => Some(&mut self.end),
            FormField::OrganizerName => Some(&mut self.organizer_name),
            FormField::OrganizerEmail => Some(&mut self.organizer_email),
            FormField::Attendees => None,
        }
    }

    pub fn move_attendee_cursor_down(&mut self, directory_len: usize) {
        if directory_len > 0 && self.attendee_cursor < directory_len - 1 {
            self.attendee_cursor += 1;
        }
    }

    pub fn move_attendee_cursor_up(&mut self) {
        self.attendee_cursor = self.attendee_cursor.saturating_sub(1);
    }

    pub fn toggle_attendee(&mut self, directory: &[User]) {
        let Some(user) = directory.get(self.attendee_cursor) else {
            return;
        };

        if let Some(pos) = self.attendee_ids.iter().position(|id| *id == user.id) {
            self.attendee_ids.remove(pos);
        } else {
            self.attendee_ids.push(user.id);
        }
    }

    pub fn is_attendee_selected(&self, user: &User) -> bool {
        self.attendee_ids.contains(&user.id)
    }

    pub fn validate<Tz: TimeZone>(&self, tz: &Tz) -> Result<EventInput, ValidationError> {
        let title = required("Title", &self.title)?;
        let start_text = required("Start", &self.start)?;
        let end_text = required("End", &self.end)?;
        let organizer_name = required("Organizer name", &self.organizer_name)?;
        let organizer_email = required("Organizer email", &self.organizer_email)?;

        let start = parse_local_datetime("start", start_text, tz)?;
        let end = parse_local_datetime("end", end_text, tz)?;
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }

        if !email_pattern().is_match(organizer_email) {
            return Err(ValidationError::InvalidEmail(organizer_email.to_string()));
        }

        Ok(EventInput {
            title: title.to_string(),
            start,
            end,
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            organizer: Organizer {
                name: organizer_name.to_string(),
                email: organizer_email.to_string(),
            },
            attendee_ids: self.attendee_ids.clone(),
        })
    }
}

impl EventInput {
    pub fn into_submission(self, directory: &[User]) -> Submission {
        let (attendees, unresolved_attendees) = resolve_attendees(&self.attendee_ids, directory);

        Submission {
            payload: NewEvent {
                title: self.title,
                start: self.start,
                end: self.end,
                location: self.location,
                description: self.description,
                organizer: self.organizer,
                attendees,
            },
            unresolved_attendees,
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_local_datetime<Tz: TimeZone>(
    field: &'static str,
    value: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, ValidationError> {
    let invalid = || ValidationError::InvalidDateTime {
        field,
        value: value.to_string(),
    };

    let naive = ACCEPTED_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(invalid)?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(invalid)
}

fn email_pattern() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
    })
}
