//! Fakes for driving the dashboard without a server or a sound device

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use bedroom_dashboard::api::{
    DashboardApi, EnvironmentControl, EnvironmentPreferencesUpdate, OptimalConditions,
    Preferences, SensorReading, SleepHistoryRecord, SleepStats, SoundPreferencesUpdate,
};
use bedroom_dashboard::audio_system::{AudioBackend, SoundClip};
use bedroom_dashboard::config::SoundCard;
use bedroom_dashboard::dashboard::{DashboardPoller, PollerSettings};
use bedroom_dashboard::error::{ApiError, AudioError};
use bedroom_dashboard::messaging::EventBus;
use bedroom_dashboard::playback::SoundPlaybackController;
use bedroom_dashboard::preferences::PreferencesStore;
use bedroom_dashboard::state::{AlertCenter, SharedViewModel, ViewModel};
use bedroom_dashboard::ui::UiController;

fn offline(endpoint: &str) -> ApiError {
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        source: "connection refused".into(),
    }
}

/// Scripted server. `None` fields answer with a transport error.
#[derive(Default)]
pub struct FakeApi {
    pub reading: Mutex<Option<SensorReading>>,
    pub prefs: Mutex<Option<Preferences>>,
    pub conditions: Mutex<Option<OptimalConditions>>,
    pub control: Mutex<Option<EnvironmentControl>>,
    pub stats: Mutex<Option<SleepStats>>,
    pub history: Mutex<Option<Vec<SleepHistoryRecord>>>,
    /// Status code returned by both save endpoints
    pub save_status: Mutex<Option<u16>>,
    pub saved_sound: Mutex<Vec<SoundPreferencesUpdate>>,
    pub saved_environment: Mutex<Vec<EnvironmentPreferencesUpdate>>,
}

impl FakeApi {
    fn save_result(&self, endpoint: &str) -> Result<(), ApiError> {
        match *self.save_status.lock() {
            Some(status) => Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
            }),
            None => Ok(()),
        }
    }
}

impl DashboardApi for FakeApi {
    fn current_data(&self) -> Result<SensorReading, ApiError> {
        self.reading
            .lock()
            .clone()
            .ok_or_else(|| offline("/api/current-data"))
    }

    fn preferences(&self) -> Result<Preferences, ApiError> {
        self.prefs
            .lock()
            .clone()
            .ok_or_else(|| offline("/api/preferences"))
    }

    fn optimal_conditions(&self) -> Result<OptimalConditions, ApiError> {
        (*self.conditions.lock()).ok_or_else(|| offline("/api/optimal-conditions"))
    }

    fn sleep_stats(&self) -> Result<SleepStats, ApiError> {
        self.stats
            .lock()
            .clone()
            .ok_or_else(|| offline("/api/sleep-stats"))
    }

    fn sleep_history(&self, _days: u32) -> Result<Vec<SleepHistoryRecord>, ApiError> {
        self.history
            .lock()
            .clone()
            .ok_or_else(|| offline("/api/sleep-history"))
    }

    fn environment_control(&self) -> Result<EnvironmentControl, ApiError> {
        (*self.control.lock()).ok_or_else(|| offline("/api/environment-control"))
    }

    fn save_sound_preferences(&self, update: &SoundPreferencesUpdate) -> Result<(), ApiError> {
        self.saved_sound.lock().push(update.clone());
        self.save_result("/api/preferences/sound")
    }

    fn save_environment_preferences(
        &self,
        update: &EnvironmentPreferencesUpdate,
    ) -> Result<(), ApiError> {
        self.saved_environment.lock().push(update.clone());
        self.save_result("/api/preferences/environment")
    }
}

/// Records what would have reached the speakers
#[derive(Default)]
pub struct FakeAudio {
    pub started: Mutex<Vec<(String, bool)>>,
    pub halts: Mutex<usize>,
    pub missing: Mutex<Vec<String>>,
    /// Makes `start` fail as if the output device refused the sound
    pub reject_start: Mutex<bool>,
}

impl AudioBackend for FakeAudio {
    fn load(&self, sound_id: &str) -> Result<SoundClip, AudioError> {
        if self.missing.lock().iter().any(|id| id == sound_id) {
            return Err(AudioError::LoadFailed {
                sound_id: sound_id.to_string(),
                source: "404 Not Found".into(),
            });
        }
        Ok(SoundClip::new(sound_id, vec![0xFF, 0xFB, 0x90]))
    }

    fn start(&self, clip: &SoundClip, looped: bool) -> Result<(), AudioError> {
        if *self.reject_start.lock() {
            return Err(AudioError::PlaybackFailed("no output device".into()));
        }
        self.started.lock().push((clip.sound_id.clone(), looped));
        Ok(())
    }

    fn halt(&self) {
        *self.halts.lock() += 1;
    }
}

pub fn sound_cards() -> Vec<SoundCard> {
    vec![
        SoundCard::new("rain", "Gentle Rain"),
        SoundCard::new("ocean", "Ocean Waves"),
        SoundCard::new("forest", "Forest Night"),
        SoundCard::new("custom", "Custom Sound"),
    ]
}

/// Fully wired dashboard over fakes
pub struct Harness {
    pub api: Arc<FakeApi>,
    pub audio: Arc<FakeAudio>,
    pub bus: EventBus,
    pub alerts: AlertCenter,
    pub view: SharedViewModel,
    pub playback: SoundPlaybackController,
    pub preferences: PreferencesStore,
    pub poller: DashboardPoller,
    pub ui: UiController,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_preview(Duration::from_secs(5))
    }

    pub fn with_preview(preview: Duration) -> Self {
        let api = Arc::new(FakeApi::default());
        let audio = Arc::new(FakeAudio::default());
        let bus = EventBus::new();
        let alerts = AlertCenter::new(bus.clone(), Duration::from_secs(3));
        let view = ViewModel::shared(sound_cards());

        let playback = SoundPlaybackController::new(
            audio.clone(),
            alerts.clone(),
            bus.clone(),
            preview,
            Duration::from_secs(30),
        );
        let dyn_api: Arc<dyn DashboardApi> = api.clone();
        let preferences =
            PreferencesStore::new(dyn_api.clone(), view.clone(), alerts.clone(), bus.clone());
        let poller = DashboardPoller::new(
            dyn_api,
            playback.clone(),
            view.clone(),
            alerts.clone(),
            bus.clone(),
            PollerSettings {
                interval: Duration::from_millis(50),
                occupancy_threshold: 0.0,
                history_days: 7,
            },
        );
        let ui = UiController::new(
            view.clone(),
            playback.clone(),
            preferences.clone(),
            poller.clone(),
            alerts.clone(),
            bus.clone(),
            preview,
        );

        Self {
            api,
            audio,
            bus,
            alerts,
            view,
            playback,
            preferences,
            poller,
            ui,
        }
    }

    pub fn banner_messages(&self) -> Vec<String> {
        self.alerts
            .visible()
            .into_iter()
            .map(|alert| alert.message)
            .collect()
    }
}
