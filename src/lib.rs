pub mod app;
pub mod calendar;
pub mod editor;
pub mod input;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::{AppState, Effect, Mode, SyncOutcome, SyncStatus, ViewType};
pub use calendar::{DateWindow, Event};

pub use input::{command_mode, insert_mode, normal_mode};
