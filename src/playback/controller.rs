use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::session::{AutoStopTimer, PlaybackMode, PlaybackSession, SessionInfo};
use crate::audio_system::AudioBackend;
use crate::error::AudioError;
use crate::messaging::{Event, EventBus};
use crate::state::AlertCenter;

/// Owns the single playback session.
///
/// Every start tears the previous session down first (timer cancelled, sink
/// halted), so there is never more than one audible sound or pending timer.
/// Clones share the same session.
#[derive(Clone)]
pub struct SoundPlaybackController {
    inner: Arc<ControllerInner>,
}

pub(crate) struct ControllerInner {
    backend: Arc<dyn AudioBackend>,
    slot: Mutex<SessionSlot>,
    alerts: AlertCenter,
    bus: EventBus,
    default_preview: Duration,
    sleep_loop_threshold: Duration,
}

#[derive(Default)]
struct SessionSlot {
    next_id: u64,
    current: Option<PlaybackSession>,
    /// Duration field of the settings form
    ui_duration: Option<Duration>,
}

impl SoundPlaybackController {
    pub fn new(
        backend: Arc<dyn AudioBackend>,
        alerts: AlertCenter,
        bus: EventBus,
        default_preview: Duration,
        sleep_loop_threshold: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                backend,
                slot: Mutex::new(SessionSlot::default()),
                alerts,
                bus,
                default_preview,
                sleep_loop_threshold,
            }),
        }
    }

    /// Timed preview. Without an explicit duration the form value is used,
    /// then the configured default.
    pub fn play(&self, sound_id: &str, duration: Option<Duration>) -> Result<(), AudioError> {
        let duration = {
            let slot = self.inner.slot.lock();
            duration
                .or(slot.ui_duration)
                .unwrap_or(self.inner.default_preview)
        };
        self.begin(sound_id, PlaybackMode::Preview { duration })
    }

    /// Sleep sound; loops without a timer when at least the loop threshold long
    pub fn start_sleep_session(&self, sound_id: &str, duration_secs: u64) -> Result<(), AudioError> {
        let duration = Duration::from_secs(duration_secs);
        let looping = duration >= self.inner.sleep_loop_threshold;
        self.begin(sound_id, PlaybackMode::SleepSession { duration, looping })
    }

    /// Cancel the timer and release the audio; no-op when idle
    pub fn stop(&self) {
        let ended = {
            let mut slot = self.inner.slot.lock();
            self.inner.teardown_locked(&mut slot)
        };
        if let Some(sound_id) = ended {
            tracing::info!("Sound stopped: {}", sound_id);
            self.inner.bus.publish(Event::PlaybackStopped { sound_id });
        }
    }

    pub fn is_playing(&self) -> bool {
        self.inner.slot.lock().current.is_some()
    }

    pub fn current(&self) -> Option<SessionInfo> {
        self.inner.slot.lock().current.as_ref().map(|s| s.info())
    }

    /// Mirror of the settings form's sound-duration field
    pub fn set_ui_duration(&self, secs: Option<u64>) {
        self.inner.slot.lock().ui_duration = secs.map(Duration::from_secs);
    }

    fn begin(&self, sound_id: &str, mode: PlaybackMode) -> Result<(), AudioError> {
        self.stop();

        let clip = match self.inner.backend.load(sound_id) {
            Ok(clip) => clip,
            Err(e) => return Err(self.fail(sound_id, e)),
        };

        let (started, replaced) = {
            let mut slot = self.inner.slot.lock();
            // Another caller may have started a sound while we were loading
            let replaced = self.inner.teardown_locked(&mut slot);

            match self.inner.backend.start(&clip, mode.is_looping()) {
                Ok(()) => {
                    slot.next_id += 1;
                    let id = slot.next_id;
                    let timer = mode
                        .auto_stop_after()
                        .and_then(|after| AutoStopTimer::schedule(Arc::downgrade(&self.inner), id, after));

                    slot.current = Some(PlaybackSession {
                        id,
                        sound_id: sound_id.to_string(),
                        mode,
                        started_at: Instant::now(),
                        timer,
                    });
                    (Ok(()), replaced)
                }
                Err(e) => (Err(e), replaced),
            }
        };

        if let Some(previous) = replaced {
            self.inner
                .bus
                .publish(Event::PlaybackStopped { sound_id: previous });
        }

        match started {
            Ok(()) => {
                tracing::info!("Playing sound: {} ({})", sound_id, mode);
                self.inner.bus.publish(Event::PlaybackStarted {
                    sound_id: sound_id.to_string(),
                    mode,
                });
                Ok(())
            }
            Err(e) => Err(self.fail(sound_id, e)),
        }
    }

    fn fail(&self, sound_id: &str, error: AudioError) -> AudioError {
        tracing::error!("Error playing sound {}: {}", sound_id, error);
        let message = match &error {
            AudioError::LoadFailed { .. } => "Error playing sound. File may not exist.".to_string(),
            other => format!("Error playing sound: {}", other),
        };
        self.inner.alerts.danger(message);
        error
    }
}

impl ControllerInner {
    /// Remove the live session, returning its sound id
    fn teardown_locked(&self, slot: &mut SessionSlot) -> Option<String> {
        let session = slot.current.take()?;
        let sound_id = session.teardown();
        self.backend.halt();
        Some(sound_id)
    }

    /// Auto-stop entry point; ignores sessions that were already replaced
    pub(crate) fn stop_session(&self, session_id: u64) {
        let ended = {
            let mut slot = self.slot.lock();
            match &slot.current {
                Some(session) if session.id == session_id => self.teardown_locked(&mut slot),
                _ => None,
            }
        };

        if let Some(sound_id) = ended {
            tracing::info!("Auto-stopped sound: {}", sound_id);
            self.bus.publish(Event::PlaybackStopped { sound_id });
        }
    }
}
