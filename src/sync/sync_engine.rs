use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::app::{Effect, ErrorKind, ExportTarget, SyncOutcome};
use crate::calendar::{DateWindow, Event};
use crate::storage::config::{Config, ExportConfig};
use crate::storage::downloads::{open_with_system, save_export, ExportError};
use crate::sync::directory::{DirectoryApi, HttpDirectoryClient};
use crate::sync::event_api::{ApiError, CalendarApi, HttpCalendarClient};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::ApiError(e) => e.kind(),
            SyncError::ExportError(_) => ErrorKind::Local,
        }
    }
}

/// Runs effects as background tasks and reports each result as a
/// [`SyncOutcome`] on the channel returned by [`SyncEngine::new`].
pub struct SyncEngine {
    calendar: Arc<dyn CalendarApi>,
    directory: Arc<dyn DirectoryApi>,
    directory_limit: u32,
    export: ExportConfig,
    outcomes: mpsc::UnboundedSender<SyncOutcome>,
    fetch_task: Option<AbortHandle>,
}

impl SyncEngine {
    pub fn new(
        calendar: Arc<dyn CalendarApi>,
        directory: Arc<dyn DirectoryApi>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<SyncOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        let engine = Self {
            calendar,
            directory,
            directory_limit: config.api.directory_limit,
            export: config.export.clone(),
            outcomes,
            fetch_task: None,
        };
        (engine, receiver)
    }

    pub fn from_config(config: &Config) -> Result<(Self, mpsc::UnboundedReceiver<SyncOutcome>), ApiError> {
        let timeout = Duration::from_secs(config.api.timeout_seconds);
        let calendar = HttpCalendarClient::with_timeout(config.api.base_url.clone(), timeout)?;
        let directory = HttpDirectoryClient::with_timeout(config.api.directory_url.clone(), timeout)?;

        Ok(Self::new(Arc::new(calendar), Arc::new(directory), config))
    }

    pub fn dispatch(&mut self, effect: Effect) {
        match effect {
            Effect::FetchEvents { window, generation } => self.fetch_events(window, generation),
            Effect::FetchUsers => self.fetch_users(),
            Effect::SaveEvent { event_id, payload } => {
                let calendar = Arc::clone(&self.calendar);
                let outcomes = self.outcomes.clone();
                tokio::spawn(async move {
                    let result = match event_id {
                        Some(id) => {
                            tracing::info!("Updating event {}", id);
                            calendar.update_event(&id, &payload).await
                        }
                        None => {
                            tracing::info!("Creating event '{}'", payload.title);
                            calendar.create_event(&payload).await
                        }
                    };
                    let _ = outcomes.send(SyncOutcome::Saved(result));
                });
            }
            Effect::Export(target) => {
                let calendar = Arc::clone(&self.calendar);
                let export = self.export.clone();
                let outcomes = self.outcomes.clone();
                tokio::spawn(async move {
                    let result = run_export(calendar.as_ref(), &target, &export).await;
                    let _ = outcomes.send(SyncOutcome::Exported(result));
                });
            }
        }
    }

    /// Starts a window fetch, aborting any fetch still in flight.
    fn fetch_events(&mut self, window: DateWindow, generation: u64) {
        if let Some(previous) = self.fetch_task.take() {
            previous.abort();
        }

        let calendar = Arc::clone(&self.calendar);
        let outcomes = self.outcomes.clone();
        let task = tokio::spawn(async move {
            let result = fetch_window(calendar.as_ref(), window).await;
            let _ = outcomes.send(SyncOutcome::EventsLoaded { generation, result });
        });
        self.fetch_task = Some(task.abort_handle());
    }

    fn fetch_users(&self) {
        let directory = Arc::clone(&self.directory);
        let limit = self.directory_limit;
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = directory.list_users(limit).await;
            let _ = outcomes.send(SyncOutcome::UsersLoaded(result));
        });
    }

    pub async fn fetch_window(&self, window: DateWindow) -> Result<Vec<Event>, ApiError> {
        fetch_window(self.calendar.as_ref(), window).await
    }

    pub async fn export_window(&self, window: DateWindow) -> Result<PathBuf, SyncError> {
        run_export(self.calendar.as_ref(), &ExportTarget::Range(window), &self.export).await
    }
}

async fn fetch_window(calendar: &dyn CalendarApi, window: DateWindow) -> Result<Vec<Event>, ApiError> {
    let (start, end) = window.utc_bounds(&Local);
    tracing::info!("Fetching events for {}", window);
    let events = calendar.list_events(start, end).await?;
    tracing::info!("Fetched {} events for {}", events.len(), window);
    Ok(events)
}

pub fn fallback_file_name(target: &ExportTarget) -> String {
    match target {
        ExportTarget::Event(id) => format!("event-{}.ics", id),
        ExportTarget::Range(window) => format!(
            "events-{}_{}.ics",
            window.start.format("%Y-%m-%d"),
            window.end.format("%Y-%m-%d")
        ),
    }
}

async fn run_export(
    calendar: &dyn CalendarApi,
    target: &ExportTarget,
    export: &ExportConfig,
) -> Result<PathBuf, SyncError> {
    let file = match target {
        ExportTarget::Event(id) => calendar.export_event(id).await?,
        ExportTarget::Range(window) => {
            let (start, end) = window.utc_bounds(&Local);
            calendar.export_range(start, end).await?
        }
    };

    let file_name = file.file_name.unwrap_or_else(|| fallback_file_name(target));
    let path = save_export(&export.download_dir, &file_name, &file.bytes)?;

    if export.open_after_export
        && let Err(e) = open_with_system(&path)
    {
        tracing::warn!("{}", e);
    }

    Ok(path)
}
