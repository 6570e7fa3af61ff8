/// Sound assets
///
/// Sounds live on the server at `/sounds/{id}.mp3`. Downloaded bytes are
/// kept in memory so replaying a sound does not hit the network again.
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::HttpApiClient;
use crate::error::AudioError;

/// Encoded sound bytes ready for decoding
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub sound_id: String,
    pub data: Arc<Vec<u8>>,
}

impl SoundClip {
    pub fn new(sound_id: &str, data: Vec<u8>) -> Self {
        Self {
            sound_id: sound_id.to_string(),
            data: Arc::new(data),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Server path of a sound
pub fn sound_path(sound_id: &str) -> String {
    format!("/sounds/{}.mp3", sound_id)
}

fn is_valid_sound_id(sound_id: &str) -> bool {
    !sound_id.is_empty()
        && sound_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Downloads sounds from the bedroom server
pub struct SoundSource {
    client: HttpApiClient,
    cache: Mutex<HashMap<String, Arc<Vec<u8>>>>,
}

impl SoundSource {
    pub fn new(client: HttpApiClient) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn fetch(&self, sound_id: &str) -> Result<SoundClip, AudioError> {
        if !is_valid_sound_id(sound_id) {
            return Err(AudioError::LoadFailed {
                sound_id: sound_id.to_string(),
                source: format!("invalid sound id '{}'", sound_id).into(),
            });
        }

        if let Some(data) = self.cache.lock().get(sound_id) {
            tracing::debug!("Sound {} served from cache", sound_id);
            return Ok(SoundClip {
                sound_id: sound_id.to_string(),
                data: Arc::clone(data),
            });
        }

        let bytes = self
            .client
            .get_bytes(&sound_path(sound_id))
            .map_err(|e| AudioError::LoadFailed {
                sound_id: sound_id.to_string(),
                source: Box::new(e),
            })?;

        if bytes.is_empty() {
            return Err(AudioError::LoadFailed {
                sound_id: sound_id.to_string(),
                source: "empty response".into(),
            });
        }

        tracing::info!("✓ Downloaded sound {} ({} bytes)", sound_id, bytes.len());
        let clip = SoundClip::new(sound_id, bytes);
        self.cache
            .lock()
            .insert(sound_id.to_string(), Arc::clone(&clip.data));
        Ok(clip)
    }
}
