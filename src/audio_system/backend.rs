/// Playback backend seam
///
/// The playback controller only needs to load a sound, start it and halt it.
/// `RodioBackend` does that against the server and the local audio device;
/// tests plug in their own implementation.
use super::player::AudioPlayer;
use super::source::{SoundClip, SoundSource};
use crate::api::HttpApiClient;
use crate::error::AudioError;

pub trait AudioBackend: Send + Sync {
    /// Fetch and prepare a sound; may block on the network
    fn load(&self, sound_id: &str) -> Result<SoundClip, AudioError>;

    /// Start `clip`, replacing anything already audible
    fn start(&self, clip: &SoundClip, looped: bool) -> Result<(), AudioError>;

    /// Silence output; safe to call when nothing plays
    fn halt(&self);
}

pub struct RodioBackend {
    source: SoundSource,
    player: AudioPlayer,
}

impl RodioBackend {
    pub fn new(client: HttpApiClient, volume: f32) -> Result<Self, AudioError> {
        Ok(Self {
            source: SoundSource::new(client),
            player: AudioPlayer::spawn(volume)?,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn load(&self, sound_id: &str) -> Result<SoundClip, AudioError> {
        self.source.fetch(sound_id)
    }

    fn start(&self, clip: &SoundClip, looped: bool) -> Result<(), AudioError> {
        self.player.play(clip.clone(), looped)
    }

    fn halt(&self) {
        self.player.stop();
    }
}
