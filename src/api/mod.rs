/// Bedroom server API
///
/// Typed models for every endpoint the dashboard reads or writes, and the
/// `DashboardApi` seam the poller, preferences store and UI depend on.
pub mod client;
pub mod models;

pub use client::{DashboardApi, HttpApiClient};
pub use models::{
    DailySleep, EnvironmentControl, EnvironmentPreferencesUpdate, OptimalConditions,
    Preferences, SensorReading, SleepHistoryRecord, SleepQuality, SleepStats,
    SoundPreferencesUpdate, WeeklySleep,
};
