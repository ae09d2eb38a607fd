use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::iso;

pub const ATTENDEE_ROLE: &str = "REQ-PARTICIPANT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "allDay", default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<serde_json::Value>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub organizer: Organizer,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partstat: Option<String>,
    pub role: String,
}

/// Body of a create or update request. The server assigns identifiers,
/// so this never carries one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(with = "iso")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso")]
    pub end: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub organizer: Organizer,
    pub attendees: Vec<Attendee>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaveAck {
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(rename = "insertedId", default)]
    pub inserted_id: Option<String>,
    #[serde(rename = "modifiedCount", default)]
    pub modified_count: Option<u64>,
}

impl Event {
    pub fn is_all_day(&self) -> bool {
        self.all_day.unwrap_or(false)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether the event touches the half-open span `[start, end)`.
    /// Zero-length events count when their instant falls inside it.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && (start < self.end || self.start >= start)
    }
}

impl Attendee {
    pub fn required(name: String, email: String) -> Self {
        Self {
            name,
            email,
            rsvp: None,
            partstat: None,
            role: ATTENDEE_ROLE.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{Local, NaiveDate, TimeZone};

    pub fn local_instant(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        Local
            .from_local_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    pub fn event_at(id: &str, date: NaiveDate, hour: u32, minute: u32, duration_minutes: i64) -> Event {
        let start = local_instant(date, hour, minute);
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            start,
            end: start + chrono::Duration::minutes(duration_minutes),
            all_day: None,
            resource: None,
            location: String::new(),
            description: String::new(),
            organizer: Organizer {
                name: "Organizer".to_string(),
                email: "organizer@example.com".to_string(),
            },
            attendees: vec![],
        }
    }
}
