/// Fixed-interval dashboard refresh
///
/// Each tick runs in order: fetch reading, render badges and control status,
/// then check whether a sleep sound should start. Ticks run one after another
/// on a single worker thread; ticks missed while one is slow are dropped.
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{select, tick, Receiver};

use crate::api::DashboardApi;
use crate::messaging::{Event, EventBus};
use crate::playback::SoundPlaybackController;
use crate::state::{AlertCenter, ControlView, ReadingView, SharedViewModel};

pub const SLEEP_SOUND_NOTICE: &str = "Sleep conditions are optimal. Playing sleep sound.";

#[derive(Debug, Clone, Copy)]
pub struct PollerSettings {
    pub interval: Duration,
    pub occupancy_threshold: f64,
    pub history_days: u32,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Sensor fetch failed; nothing rendered
    Skipped,
    Rendered { sleep_sound_started: bool },
}

#[derive(Clone)]
pub struct DashboardPoller {
    api: Arc<dyn DashboardApi>,
    playback: SoundPlaybackController,
    view: SharedViewModel,
    alerts: AlertCenter,
    bus: EventBus,
    settings: PollerSettings,
}

impl DashboardPoller {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        playback: SoundPlaybackController,
        view: SharedViewModel,
        alerts: AlertCenter,
        bus: EventBus,
        settings: PollerSettings,
    ) -> Self {
        Self {
            api,
            playback,
            view,
            alerts,
            bus,
            settings,
        }
    }

    /// Run one polling cycle
    pub fn tick(&self) -> TickOutcome {
        let reading = match self.api.current_data() {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!("Error fetching sensor data: {}", e);
                return TickOutcome::Skipped;
            }
        };

        let rendered = ReadingView::from_reading(&reading, self.settings.occupancy_threshold);
        let in_bed = rendered.occupancy.is_in_bed();
        tracing::debug!(
            "Reading: {:.1}°C ({}), {:.0}% ({}), {}",
            rendered.temperature,
            rendered.temperature_status.label(),
            rendered.light,
            rendered.light_status.label(),
            rendered.occupancy.label()
        );
        self.view.write().dashboard.reading = Some(rendered);

        self.update_environment_controls();
        self.bus.publish(Event::DashboardUpdated);

        TickOutcome::Rendered {
            sleep_sound_started: self.check_sleep_sound(in_bed),
        }
    }

    fn update_environment_controls(&self) {
        match self.api.environment_control() {
            Ok(control) => {
                self.view.write().dashboard.control = Some(ControlView::from_control(&control));
            }
            Err(e) => tracing::warn!("Error fetching environment control data: {}", e),
        }
    }

    /// Start the preferred sound when conditions are optimal and the bed is occupied
    fn check_sleep_sound(&self, in_bed: bool) -> bool {
        let prefs = match self.api.preferences() {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Error fetching preferences: {}", e);
                return false;
            }
        };
        if !prefs.sleep_notifications {
            return false;
        }

        let conditions = match self.api.optimal_conditions() {
            Ok(conditions) => conditions,
            Err(e) => {
                tracing::warn!("Error fetching optimal conditions: {}", e);
                return false;
            }
        };

        if !(conditions.overall_optimal && in_bed) || self.playback.is_playing() {
            return false;
        }
        if prefs.sound_id.is_empty() {
            tracing::warn!("Sleep conditions are optimal but no sound is configured");
            return false;
        }

        tracing::info!("Playing sleep sound: {}", prefs.sound_id);
        match self
            .playback
            .start_sleep_session(&prefs.sound_id, prefs.sound_duration)
        {
            Ok(()) => {
                self.alerts.info(SLEEP_SOUND_NOTICE);
                true
            }
            // The playback controller already raised a banner
            Err(_) => false,
        }
    }

    /// Load the sleep chart and history table
    pub fn load_sleep_data(&self) {
        match self.api.sleep_stats() {
            Ok(stats) => {
                let mut view = self.view.write();
                view.dashboard.sleep_chart = stats.daily;
                view.dashboard.weekly = Some(stats.weekly);
            }
            Err(e) => tracing::warn!("Error fetching sleep stats: {}", e),
        }

        match self.api.sleep_history(self.settings.history_days) {
            Ok(history) => self.view.write().dashboard.history = history,
            Err(e) => tracing::warn!("Error fetching sleep history: {}", e),
        }

        self.bus.publish(Event::SleepHistoryLoaded);
    }

    /// Run on a worker thread until `shutdown` fires or is dropped
    pub fn spawn(self, shutdown: Receiver<()>) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("dashboard-poller".to_string())
            .spawn(move || {
                tracing::info!(
                    "Dashboard poller started ({}ms interval)",
                    self.settings.interval.as_millis()
                );

                self.load_sleep_data();
                self.tick();

                let ticker = tick(self.settings.interval);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            self.tick();
                        }
                        recv(shutdown) -> _ => break,
                    }
                }

                tracing::info!("Dashboard poller stopped");
            })
    }
}
