pub mod directory;
pub mod event_api;
pub mod sync_engine;
