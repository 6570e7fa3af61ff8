/// Preferences load/save
///
/// The server owns preferences; the client only copies them into the
/// settings form and posts edits back. Nothing is cached or retried.
use std::sync::Arc;

use crate::api::{DashboardApi, EnvironmentPreferencesUpdate, Preferences, SoundPreferencesUpdate};
use crate::error::ApiError;
use crate::messaging::{Event, EventBus};
use crate::state::{AlertCenter, SharedViewModel};

#[derive(Clone)]
pub struct PreferencesStore {
    api: Arc<dyn DashboardApi>,
    view: SharedViewModel,
    alerts: AlertCenter,
    bus: EventBus,
}

impl PreferencesStore {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        view: SharedViewModel,
        alerts: AlertCenter,
        bus: EventBus,
    ) -> Self {
        Self {
            api,
            view,
            alerts,
            bus,
        }
    }

    /// Fill the settings form from the server; failures only reach the log
    pub fn load_preferences(&self) -> Option<Preferences> {
        match self.api.preferences() {
            Ok(prefs) => {
                self.view.write().settings.apply(&prefs);
                tracing::debug!("Preferences loaded: {:?}", prefs);
                self.bus.publish(Event::PreferencesLoaded);
                Some(prefs)
            }
            Err(e) => {
                tracing::warn!("Error loading preferences: {}", e);
                None
            }
        }
    }

    pub fn save_sound_preferences(&self, update: &SoundPreferencesUpdate) -> Result<(), ApiError> {
        tracing::info!("Saving sound preferences: {:?}", update);
        let result = self.api.save_sound_preferences(update);
        self.report(result, "Sound")
    }

    pub fn save_environment_preferences(
        &self,
        update: &EnvironmentPreferencesUpdate,
    ) -> Result<(), ApiError> {
        tracing::info!("Saving environment preferences: {:?}", update);
        let result = self.api.save_environment_preferences(update);
        self.report(result, "Environment")
    }

    fn report(&self, result: Result<(), ApiError>, kind: &str) -> Result<(), ApiError> {
        match &result {
            Ok(()) => {
                self.alerts
                    .success(format!("{} preferences saved successfully!", kind));
            }
            Err(e) if e.is_status() => {
                tracing::error!("Saving {} preferences failed: {}", kind.to_lowercase(), e);
                self.alerts.danger(format!(
                    "Failed to save {} preferences.",
                    kind.to_lowercase()
                ));
            }
            Err(e) => {
                tracing::error!("Saving {} preferences failed: {}", kind.to_lowercase(), e);
                self.alerts
                    .danger(format!("Error saving preferences: {}", e));
            }
        }
        result
    }
}
