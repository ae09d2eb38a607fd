use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_DISPOSITION;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::app::ErrorKind;
use crate::calendar::{iso, Event, NewEvent, SaveAck};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Server returned {status}: {body}")]
    StatusError { status: u16, body: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Save was not acknowledged by the server")]
    Rejected,
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::HttpError(_) => ErrorKind::Network,
            ApiError::StatusError { .. } | ApiError::NotFound(_) | ApiError::ParseError(_) => ErrorKind::Server,
            ApiError::Rejected => ErrorKind::Rejected,
        }
    }
}

/// Downloaded export body and the file name the server suggested for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn list_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, ApiError>;

    async fn create_event(&self, event: &NewEvent) -> Result<SaveAck, ApiError>;

    async fn update_event(&self, event_id: &str, event: &NewEvent) -> Result<SaveAck, ApiError>;

    async fn export_event(&self, event_id: &str) -> Result<ExportFile, ApiError>;

    async fn export_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ExportFile, ApiError>;
}

pub struct HttpCalendarClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCalendarClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_event(&self, url: String, event: &NewEvent) -> Result<SaveAck, ApiError> {
        tracing::debug!("POST {} with payload: {:?}", url, event);

        let response = self.client.post(&url).json(event).send().await?;
        let ack: SaveAck = read_json(response, &url).await?;

        if !ack.acknowledged {
            tracing::warn!("Save to {} was not acknowledged", url);
            return Err(ApiError::Rejected);
        }

        Ok(ack)
    }

    async fn download(&self, url: String, query: &[(&str, String)]) -> Result<ExportFile, ApiError> {
        let response = self.client.get(&url).query(query).send().await?;
        let response = check_status(response, &url).await?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(crate::storage::downloads::file_name_from_disposition);
        let bytes = response.bytes().await?.to_vec();

        tracing::info!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(ExportFile { file_name, bytes })
    }
}

async fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    tracing::info!("{} responded with {}", url, status);

    if status == reqwest::StatusCode::NOT_FOUND {
        tracing::error!("Not found: {}", url);
        return Err(ApiError::NotFound(url.to_string()));
    }

    if !status.is_success() {
        let body = response.text().await?;
        tracing::error!("Request to {} failed. Status: {}, Body: {}", url, status, body);
        return Err(ApiError::StatusError {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<T, ApiError> {
    let response = check_status(response, url).await?;
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Malformed response from {}: {}", url, e);
        ApiError::ParseError(e.to_string())
    })
}

#[async_trait]
impl CalendarApi for HttpCalendarClient {
    async fn list_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, ApiError> {
        let url = self.url("/events");
        tracing::info!("Fetching events from {} to {}", start, end);

        let response = self
            .client
            .get(&url)
            .query(&[("start", iso::format(&start)), ("end", iso::format(&end))])
            .send()
            .await?;

        let events: Vec<Event> = read_json(response, &url).await?;
        tracing::info!("Fetched {} events successfully", events.len());
        Ok(events)
    }

    async fn create_event(&self, event: &NewEvent) -> Result<SaveAck, ApiError> {
        tracing::info!("Creating event: {} on {}", event.title, event.start);
        let ack = self.post_event(self.url("/events"), event).await?;
        tracing::info!("Event created: {:?}", ack.inserted_id);
        Ok(ack)
    }

    async fn update_event(&self, event_id: &str, event: &NewEvent) -> Result<SaveAck, ApiError> {
        tracing::info!("Updating event {}: {}", event_id, event.title);
        let ack = self.post_event(self.url(&format!("/events/{}", event_id)), event).await?;
        tracing::info!("Event {} updated", event_id);
        Ok(ack)
    }

    async fn export_event(&self, event_id: &str) -> Result<ExportFile, ApiError> {
        tracing::info!("Exporting event {}", event_id);
        self.download(self.url("/events/export"), &[("id", event_id.to_string())])
            .await
    }

    async fn export_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ExportFile, ApiError> {
        tracing::info!("Exporting events from {} to {}", start, end);
        self.download(
            self.url("/events/export/all"),
            &[("start", iso::format(&start)), ("end", iso::format(&end))],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Attendee, Organizer};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    fn client_for(server: &MockServer) -> HttpCalendarClient {
        HttpCalendarClient::new(format!("{}/api/calendar", server.uri()))
    }

    fn sync_payload() -> NewEvent {
        NewEvent {
            title: "Sync".to_string(),
            start: utc(2024, 1, 1, 10),
            end: utc(2024, 1, 1, 11),
            location: String::new(),
            description: String::new(),
            organizer: Organizer { name: "A".to_string(), email: "a@x.com".to_string() },
            attendees: vec![],
        }
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = HttpCalendarClient::new("http://localhost:5000/api/calendar/".to_string());
        assert_eq!(client.url("/events"), "http://localhost:5000/api/calendar/events");
    }

    #[tokio::test]
    async fn list_events_sends_iso_window_and_parses_dates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar/events"))
            .and(query_param("start", "2024-01-01T00:00:00.000Z"))
            .and(query_param("end", "2024-02-01T00:00:00.000Z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "_id": "e1",
                    "title": "Standup",
                    "start": "2024-01-03T09:00:00.000Z",
                    "end": "2024-01-03T09:15:00.000Z",
                    "location": "",
                    "description": "",
                    "organizer": {"name": "A", "email": "a@x.com"},
                    "attendees": []
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let events = client_for(&server)
            .list_events(utc(2024, 1, 1, 0), utc(2024, 2, 1, 0))
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, utc(2024, 1, 3, 9));
    }

    #[tokio::test]
    async fn list_events_reports_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_events(utc(2024, 1, 1, 0), utc(2024, 2, 1, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::ParseError(_)));
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[tokio::test]
    async fn list_events_reports_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar/events"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_events(utc(2024, 1, 1, 0), utc(2024, 2, 1, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::StatusError { status: 500, .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client = HttpCalendarClient::new("http://127.0.0.1:9/api/calendar".to_string());

        let err = client
            .list_events(utc(2024, 1, 1, 0), utc(2024, 2, 1, 0))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn create_event_posts_payload_to_collection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/calendar/events"))
            .and(body_json(json!({
                "title": "Sync",
                "start": "2024-01-01T10:00:00.000Z",
                "end": "2024-01-01T11:00:00.000Z",
                "location": "",
                "description": "",
                "organizer": {"name": "A", "email": "a@x.com"},
                "attendees": []
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "acknowledged": true,
                "insertedId": "65a0"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server).create_event(&sync_payload()).await.unwrap();

        assert!(ack.acknowledged);
        assert_eq!(ack.inserted_id.as_deref(), Some("65a0"));
    }

    #[tokio::test]
    async fn update_event_posts_to_event_path() {
        let server = MockServer::start().await;
        let mut payload = sync_payload();
        payload.attendees = vec![Attendee::required("B C".to_string(), "b@x.com".to_string())];

        Mock::given(method("POST"))
            .and(path("/api/calendar/events/65a0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "acknowledged": true,
                "modifiedCount": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server).update_event("65a0", &payload).await.unwrap();

        assert_eq!(ack.modified_count, Some(1));
    }

    #[tokio::test]
    async fn unacknowledged_save_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/calendar/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": false})))
            .mount(&server)
            .await;

        let err = client_for(&server).create_event(&sync_payload()).await.unwrap_err();

        assert!(matches!(err, ApiError::Rejected));
        assert_eq!(err.kind(), ErrorKind::Rejected);
    }

    #[tokio::test]
    async fn export_event_is_keyed_by_id_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar/events/export"))
            .and(query_param("id", "65a0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-disposition", "attachment; filename=\"standup.ics\"")
                    .set_body_bytes(b"BEGIN:VCALENDAR".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let file = client_for(&server).export_event("65a0").await.unwrap();

        assert_eq!(file.file_name.as_deref(), Some("standup.ics"));
        assert_eq!(file.bytes, b"BEGIN:VCALENDAR".to_vec());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("id=65a0"));
    }

    #[tokio::test]
    async fn export_range_is_keyed_by_window_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar/events/export/all"))
            .and(query_param("start", "2024-01-01T00:00:00.000Z"))
            .and(query_param("end", "2024-02-01T00:00:00.000Z"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ICS".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let file = client_for(&server)
            .export_range(utc(2024, 1, 1, 0), utc(2024, 2, 1, 0))
            .await
            .unwrap();

        assert_eq!(file.file_name, None);
        assert_eq!(file.bytes, b"ICS".to_vec());

        let requests = server.received_requests().await.unwrap();
        let keys: Vec<String> = requests[0].url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, vec!["start".to_string(), "end".to_string()]);
    }

    #[tokio::test]
    async fn export_of_missing_event_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar/events/export"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).export_event("nope").await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
