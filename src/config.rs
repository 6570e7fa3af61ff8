use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "BedroomDashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundCard {
    /// Sound id, addressed on the server as `/sounds/{id}.mp3`
    pub id: String,
    pub name: String,
}

impl SoundCard {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

fn default_sounds() -> Vec<SoundCard> {
    vec![
        SoundCard::new("rain", "Gentle Rain"),
        SoundCard::new("ocean", "Ocean Waves"),
        SoundCard::new("forest", "Forest Night"),
        SoundCard::new("white-noise", "White Noise"),
        SoundCard::new("custom", "Custom Sound"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the bedroom server
    pub server_url: String,

    /// Dashboard refresh interval in milliseconds
    pub poll_interval_ms: u64,

    /// Per-request HTTP timeout in milliseconds
    pub request_timeout_ms: u64,

    /// How long a banner stays visible
    pub alert_dismiss_ms: u64,

    /// Preview length used when neither the caller nor the form gives one
    pub default_preview_secs: u64,

    /// Sleep sessions at least this long loop until stopped
    pub sleep_loop_threshold_secs: u64,

    /// Bed counts as occupied when pressure is strictly above this
    pub occupancy_threshold: f64,

    /// Days of sleep history to request
    pub history_days: u32,

    /// Playback volume (0.0-1.0)
    pub volume: f32,

    /// Fallback log filter when RUST_LOG is unset
    pub log_level: String,

    /// Sound cards shown in the settings section
    pub sounds: Vec<SoundCard>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            poll_interval_ms: 5000,
            request_timeout_ms: 10_000,
            alert_dismiss_ms: 3000,
            default_preview_secs: 5,
            sleep_loop_threshold_secs: 30,
            occupancy_threshold: 0.0,
            history_days: 7,
            volume: 1.0,
            log_level: "info".to_string(),
            sounds: default_sounds(),
        }
    }
}

impl Config {
    /// Load configuration from the platform-specific config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path, writing defaults there when missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!("Created default config at: {}", path.display());
            return Ok(config);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        config.validate()?;

        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Check values that would make the dashboard misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("server_url is empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "server_url must start with http:// or https://, got {}",
                url
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be > 0".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::Invalid(format!(
                "volume must be 0.0-1.0, got {}",
                self.volume
            )));
        }
        Ok(())
    }

    /// Get the config file path (in the user's config directory)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::app_dir()?.join("config.json"))
    }

    /// Directory holding config and logs
    pub fn app_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn alert_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("bedroom-dashboard-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.alert_dismiss_ms, 3000);
        assert_eq!(config.default_preview_secs, 5);
        assert_eq!(config.sleep_loop_threshold_secs, 30);
        assert_eq!(config.occupancy_threshold, 0.0);
        assert!(config.sounds.iter().any(|s| s.id == "rain"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(config.server_url, deserialized.server_url);
        assert_eq!(config.sounds, deserialized.sounds);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"server_url": "http://bedroom.local:5000"}"#).unwrap();
        assert_eq!(config.server_url, "http://bedroom.local:5000");
        assert_eq!(config.poll_interval_ms, 5000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server_url = "bedroom.local".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.volume = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let path = temp_config_path("create");
        let _ = fs::remove_file(&path);

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.poll_interval_ms, 5000);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.server_url, config.server_url);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let path = temp_config_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"poll_interval_ms": 0}"#).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid(_))
        ));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
