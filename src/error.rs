use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur while the
/// dashboard talks to the bedroom server or the audio device. They provide
/// context and can be chained with anyhow.

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// True when the server answered, but not with a 2xx status
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load sound: {sound_id}")]
    LoadFailed {
        sound_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode audio format")]
    DecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Audio playback failed")]
    PlaybackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Audio thread is not running")]
    PlayerGone,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the platform config directory")]
    NoConfigDir,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),

    #[error("Invalid value for '{command}': {value}")]
    InvalidValue { command: &'static str, value: String },
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            endpoint: "/api/preferences/sound".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "/api/preferences/sound returned status 500");
        assert!(err.is_status());

        let err = CommandError::Unknown("dance".to_string());
        assert_eq!(err.to_string(), "Unknown command: dance");
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let config_err = ConfigError::LoadFailed {
            path: "/test/config.json".to_string(),
            source: Box::new(io_err),
        };

        assert!(config_err.source().is_some());
        assert_eq!(
            config_err.to_string(),
            "Failed to load configuration from /test/config.json"
        );
    }

    #[test]
    fn test_audio_error_keeps_sound_id() {
        let err = AudioError::LoadFailed {
            sound_id: "rain".to_string(),
            source: "404".into(),
        };
        assert_eq!(err.to_string(), "Failed to load sound: rain");
        assert!(err.source().is_some());
    }
}
