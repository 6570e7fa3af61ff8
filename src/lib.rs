pub mod api;
pub mod audio_system;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod messaging;
pub mod playback;
pub mod preferences;
pub mod state;
pub mod ui;
