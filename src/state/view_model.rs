/// In-memory view state
///
/// The poller and UI controller write here; the terminal view reads it.
use std::sync::Arc;

use parking_lot::RwLock;

use super::status::{
    EnvironmentStatus, LightControlStatus, LightStatus, Occupancy, TemperatureControlStatus,
    TemperatureStatus,
};
use crate::api::{
    DailySleep, EnvironmentControl, EnvironmentPreferencesUpdate, Preferences, SensorReading,
    SleepHistoryRecord, WeeklySleep,
};
use crate::config::SoundCard;

pub type SharedViewModel = Arc<RwLock<ViewModel>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Settings,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Settings => "Settings",
        }
    }
}

/// Latest reading with its derived badges
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingView {
    pub temperature: f64,
    pub light: f64,
    pub pressure: f64,
    pub timestamp: String,
    pub temperature_status: TemperatureStatus,
    pub light_status: LightStatus,
    pub occupancy: Occupancy,
    pub environment: EnvironmentStatus,
    /// Minutes asleep so far, when the server tracks an open session
    pub sleeping_minutes: Option<u64>,
}

impl ReadingView {
    pub fn from_reading(reading: &SensorReading, occupancy_threshold: f64) -> Self {
        let temperature = reading.temperature();
        let light = reading.light();
        let pressure = reading.pressure();

        Self {
            temperature,
            light,
            pressure,
            timestamp: reading.timestamp(),
            temperature_status: TemperatureStatus::classify(temperature),
            light_status: LightStatus::classify(light),
            occupancy: Occupancy::from_pressure(pressure, occupancy_threshold),
            environment: EnvironmentStatus::classify(temperature, light),
            sleeping_minutes: reading.current_sleep_duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub temperature: TemperatureControlStatus,
    pub light: LightControlStatus,
}

impl ControlView {
    pub fn from_control(control: &EnvironmentControl) -> Self {
        Self {
            temperature: TemperatureControlStatus::from_control(control),
            light: LightControlStatus::from_control(control),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardPanel {
    pub reading: Option<ReadingView>,
    pub control: Option<ControlView>,
    pub sleep_chart: Vec<DailySleep>,
    pub weekly: Option<WeeklySleep>,
    pub history: Vec<SleepHistoryRecord>,
}

/// Settings section form fields
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub ideal_temp: f64,
    pub max_light: f64,
    pub adaptive_light: bool,
    pub auto_temp: bool,
    pub sleep_notifications: bool,
    pub sound_duration: u64,
    pub sounds: Vec<SoundCard>,
    pub selected_sound: Option<String>,
}

impl SettingsForm {
    pub fn new(sounds: Vec<SoundCard>) -> Self {
        let defaults = Preferences::default();
        Self {
            ideal_temp: defaults.ideal_temp,
            max_light: defaults.max_light,
            adaptive_light: defaults.adaptive_light,
            auto_temp: defaults.auto_temp,
            sleep_notifications: defaults.sleep_notifications,
            sound_duration: defaults.sound_duration,
            sounds,
            selected_sound: None,
        }
    }

    /// Copy server preferences into the form fields
    pub fn apply(&mut self, prefs: &Preferences) {
        self.ideal_temp = prefs.ideal_temp;
        self.max_light = prefs.max_light;
        self.adaptive_light = prefs.adaptive_light;
        self.auto_temp = prefs.auto_temp;
        self.sleep_notifications = prefs.sleep_notifications;
        self.sound_duration = prefs.sound_duration;
        // Server ids outside the catalog leave no card selected
        self.selected_sound = None;
        self.select_sound(&prefs.sound_id);
    }

    /// Select the card with `sound_id`; unknown ids keep the current selection
    pub fn select_sound(&mut self, sound_id: &str) -> bool {
        if !self.sounds.iter().any(|card| card.id == sound_id) {
            return false;
        }
        self.selected_sound = Some(sound_id.to_string());
        true
    }

    /// Re-point the custom card (the last one when none is named "custom")
    pub fn set_custom_sound(&mut self, sound_id: &str) {
        let index = self
            .sounds
            .iter()
            .position(|card| card.id == "custom" || card.name == "Custom Sound")
            .or_else(|| self.sounds.len().checked_sub(1));

        match index {
            Some(index) => self.sounds[index].id = sound_id.to_string(),
            None => self.sounds.push(SoundCard::new(sound_id, "Custom Sound")),
        }
        self.selected_sound = Some(sound_id.to_string());
    }

    pub fn temp_label(&self) -> String {
        format!("{}°C", self.ideal_temp)
    }

    pub fn light_label(&self) -> String {
        format!("{}%", self.max_light)
    }

    pub fn environment_update(&self) -> EnvironmentPreferencesUpdate {
        EnvironmentPreferencesUpdate {
            ideal_temp: self.ideal_temp,
            max_light: self.max_light,
            adaptive_light: self.adaptive_light,
            auto_temp: self.auto_temp,
            sleep_notifications: self.sleep_notifications,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewModel {
    pub section: Section,
    pub dashboard: DashboardPanel,
    pub settings: SettingsForm,
    /// Command line being typed at the prompt
    pub input: String,
}

impl ViewModel {
    pub fn new(sounds: Vec<SoundCard>) -> Self {
        Self {
            section: Section::Dashboard,
            dashboard: DashboardPanel::default(),
            settings: SettingsForm::new(sounds),
            input: String::new(),
        }
    }

    pub fn shared(sounds: Vec<SoundCard>) -> SharedViewModel {
        Arc::new(RwLock::new(Self::new(sounds)))
    }
}
