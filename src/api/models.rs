/// Wire models for the bedroom server API
///
/// The server answers `{"message": ...}` instead of data when it has nothing
/// to report, and stores form values as they were posted (often strings), so
/// most fields are optional and numbers are parsed leniently.
use serde::{Deserialize, Deserializer, Serialize};

/// Values shown when a reading is missing a field
pub const FALLBACK_TEMPERATURE: f64 = 20.5;
pub const FALLBACK_LIGHT: f64 = 45.0;
pub const FALLBACK_PRESSURE: f64 = 0.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Flag(bool),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        Some(NumberOrText::Flag(b)) => Some(if b { 1.0 } else { 0.0 }),
        None => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Flag(b)) => b,
        Some(NumberOrText::Number(n)) => n != 0.0,
        Some(NumberOrText::Text(s)) => matches!(s.trim(), "1" | "true" | "on"),
        None => false,
    })
}

/// Latest sensor sample from `/api/current-data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SensorReading {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub light: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub sleeping: Option<bool>,
    /// Minutes since the open sleep session began
    #[serde(default)]
    pub current_sleep_duration: Option<u64>,
}

impl SensorReading {
    pub fn new(temperature: f64, light: f64, pressure: f64) -> Self {
        Self {
            temperature: Some(temperature),
            light: Some(light),
            pressure: Some(pressure),
            ..Default::default()
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(FALLBACK_TEMPERATURE)
    }

    pub fn light(&self) -> f64 {
        self.light.unwrap_or(FALLBACK_LIGHT)
    }

    pub fn pressure(&self) -> f64 {
        self.pressure.unwrap_or(FALLBACK_PRESSURE)
    }

    /// Server timestamp, or the local time when the reading has none
    pub fn timestamp(&self) -> String {
        self.timestamp
            .clone()
            .unwrap_or_else(|| chrono::Local::now().to_rfc3339())
    }
}

fn default_ideal_temp() -> f64 {
    18.5
}

fn default_max_light() -> f64 {
    10.0
}

fn default_sound_duration() -> u64 {
    5
}

fn lenient_ideal_temp<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(lenient_f64(d)?.unwrap_or_else(default_ideal_temp))
}

fn lenient_max_light<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(lenient_f64(d)?.unwrap_or_else(default_max_light))
}

fn lenient_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(lenient_f64(d)?
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.round() as u64)
        .unwrap_or_else(default_sound_duration))
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// User preferences from `/api/preferences`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_ideal_temp", deserialize_with = "lenient_ideal_temp")]
    pub ideal_temp: f64,
    #[serde(default = "default_max_light", deserialize_with = "lenient_max_light")]
    pub max_light: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub adaptive_light: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub auto_temp: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub sleep_notifications: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sound_id: String,
    #[serde(default = "default_sound_duration", deserialize_with = "lenient_seconds")]
    pub sound_duration: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            ideal_temp: default_ideal_temp(),
            max_light: default_max_light(),
            adaptive_light: false,
            auto_temp: false,
            sleep_notifications: false,
            sound_id: String::new(),
            sound_duration: default_sound_duration(),
        }
    }
}

/// Body of `POST /api/preferences/sound`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundPreferencesUpdate {
    pub sound_id: String,
    pub duration: u64,
}

/// Body of `POST /api/preferences/environment`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPreferencesUpdate {
    pub ideal_temp: f64,
    pub max_light: f64,
    pub adaptive_light: bool,
    pub auto_temp: bool,
    pub sleep_notifications: bool,
}

/// Server-side evaluation from `/api/optimal-conditions`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OptimalConditions {
    #[serde(default)]
    pub overall_optimal: bool,
    #[serde(default)]
    pub temperature_optimal: bool,
    #[serde(default)]
    pub light_optimal: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailySleep {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub light: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeeklySleep {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_light: Option<f64>,
    #[serde(default)]
    pub session_count: u32,
}

/// Chart data from `/api/sleep-stats`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SleepStats {
    #[serde(default)]
    pub daily: Vec<DailySleep>,
    #[serde(default)]
    pub weekly: WeeklySleep,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    #[default]
    Unknown,
}

impl SleepQuality {
    pub fn parse(value: &str) -> Self {
        match value {
            "Excellent" => SleepQuality::Excellent,
            "Good" => SleepQuality::Good,
            "Fair" => SleepQuality::Fair,
            "Poor" => SleepQuality::Poor,
            _ => SleepQuality::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SleepQuality::Excellent => "Excellent",
            SleepQuality::Good => "Good",
            SleepQuality::Fair => "Fair",
            SleepQuality::Poor => "Poor",
            SleepQuality::Unknown => "Unknown",
        }
    }
}

fn quality_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<SleepQuality, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .map(|q| SleepQuality::parse(&q))
        .unwrap_or_default())
}

/// One finished sleep session from `/api/sleep-history`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SleepHistoryRecord {
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub light: Option<f64>,
    #[serde(default, deserialize_with = "quality_or_unknown")]
    pub quality: SleepQuality,
}

/// Actuator state from `/api/environment-control`
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct EnvironmentControl {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub auto_temp: bool,
    #[serde(default, deserialize_with = "lenient_adjust")]
    pub temp_adjust: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub adaptive_light: bool,
    #[serde(default, deserialize_with = "lenient_adjust")]
    pub light_adjust: f64,
}

fn lenient_adjust<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(lenient_f64(d)?.unwrap_or(0.0))
}
