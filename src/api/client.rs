/// HTTP client for the bedroom server
///
/// Every call goes through one `ureq::Agent`; non-2xx replies, transport
/// failures and undecodable bodies are normalized into `ApiError`.
use std::io::Read;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::{
    EnvironmentControl, EnvironmentPreferencesUpdate, OptimalConditions, Preferences,
    SensorReading, SleepHistoryRecord, SleepStats, SoundPreferencesUpdate,
};
use crate::error::ApiError;

pub const CURRENT_DATA: &str = "/api/current-data";
pub const PREFERENCES: &str = "/api/preferences";
pub const SOUND_PREFERENCES: &str = "/api/preferences/sound";
pub const ENVIRONMENT_PREFERENCES: &str = "/api/preferences/environment";
pub const OPTIMAL_CONDITIONS: &str = "/api/optimal-conditions";
pub const SLEEP_STATS: &str = "/api/sleep-stats";
pub const SLEEP_HISTORY: &str = "/api/sleep-history";
pub const ENVIRONMENT_CONTROL: &str = "/api/environment-control";

/// Everything the dashboard asks of the server
pub trait DashboardApi: Send + Sync {
    fn current_data(&self) -> Result<SensorReading, ApiError>;
    fn preferences(&self) -> Result<Preferences, ApiError>;
    fn optimal_conditions(&self) -> Result<OptimalConditions, ApiError>;
    fn sleep_stats(&self) -> Result<SleepStats, ApiError>;
    fn sleep_history(&self, days: u32) -> Result<Vec<SleepHistoryRecord>, ApiError>;
    fn environment_control(&self) -> Result<EnvironmentControl, ApiError>;
    fn save_sound_preferences(&self, update: &SoundPreferencesUpdate) -> Result<(), ApiError>;
    fn save_environment_preferences(
        &self,
        update: &EnvironmentPreferencesUpdate,
    ) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct HttpApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let user_agent = format!("bedroom-dashboard/{}", env!("CARGO_PKG_VERSION"));
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", endpoint);
        let response = self
            .agent
            .get(&self.url(endpoint))
            .call()
            .map_err(|e| classify(endpoint, e))?;

        response.into_json::<T>().map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source: Box::new(e),
        })
    }

    fn post_json<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<(), ApiError> {
        tracing::debug!("POST {}", endpoint);
        self.agent
            .post(&self.url(endpoint))
            .send_json(body)
            .map_err(|e| classify(endpoint, e))?;
        Ok(())
    }

    /// Download raw bytes, e.g. a sound file
    pub fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        tracing::debug!("GET {}", path);
        let response = self
            .agent
            .get(&self.url(path))
            .call()
            .map_err(|e| classify(path, e))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| ApiError::Transport {
                endpoint: path.to_string(),
                source: Box::new(e),
            })?;
        Ok(bytes)
    }
}

fn classify(endpoint: &str, error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(status, _) => ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => ApiError::Transport {
            endpoint: endpoint.to_string(),
            source: Box::new(transport),
        },
    }
}

impl DashboardApi for HttpApiClient {
    fn current_data(&self) -> Result<SensorReading, ApiError> {
        self.get_json(CURRENT_DATA)
    }

    fn preferences(&self) -> Result<Preferences, ApiError> {
        self.get_json(PREFERENCES)
    }

    fn optimal_conditions(&self) -> Result<OptimalConditions, ApiError> {
        self.get_json(OPTIMAL_CONDITIONS)
    }

    fn sleep_stats(&self) -> Result<SleepStats, ApiError> {
        self.get_json(SLEEP_STATS)
    }

    fn sleep_history(&self, days: u32) -> Result<Vec<SleepHistoryRecord>, ApiError> {
        self.get_json(&format!("{}?days={}", SLEEP_HISTORY, days))
    }

    fn environment_control(&self) -> Result<EnvironmentControl, ApiError> {
        self.get_json(ENVIRONMENT_CONTROL)
    }

    fn save_sound_preferences(&self, update: &SoundPreferencesUpdate) -> Result<(), ApiError> {
        self.post_json(SOUND_PREFERENCES, update)
    }

    fn save_environment_preferences(
        &self,
        update: &EnvironmentPreferencesUpdate,
    ) -> Result<(), ApiError> {
        self.post_json(ENVIRONMENT_PREFERENCES, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpApiClient::new("http://127.0.0.1:5000/", Duration::from_secs(1));
        assert_eq!(
            client.url(CURRENT_DATA),
            "http://127.0.0.1:5000/api/current-data"
        );
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Nothing listens on port 1 on loopback
        let client = HttpApiClient::new("http://127.0.0.1:1", Duration::from_secs(2));
        match client.current_data() {
            Err(ApiError::Transport { endpoint, .. }) => assert_eq!(endpoint, CURRENT_DATA),
            other => panic!("expected transport error, got {:?}", other.map(|_| ())),
        }
    }
}
