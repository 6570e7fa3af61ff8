/// Playback session and its auto-stop timer
use std::fmt;
use std::sync::Weak;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};

use super::controller::ControllerInner;

/// How a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// User-initiated, always stops after `duration`
    Preview { duration: Duration },

    /// Started by the poller; loops until stopped when `looping`
    SleepSession { duration: Duration, looping: bool },
}

impl PlaybackMode {
    /// Delay before the session stops itself, `None` for endless loops
    pub fn auto_stop_after(&self) -> Option<Duration> {
        match *self {
            PlaybackMode::Preview { duration } => Some(duration),
            PlaybackMode::SleepSession { looping: true, .. } => None,
            PlaybackMode::SleepSession { duration, .. } => Some(duration),
        }
    }

    pub fn is_looping(&self) -> bool {
        matches!(self, PlaybackMode::SleepSession { looping: true, .. })
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackMode::Preview { duration } => write!(f, "preview {}s", duration.as_secs()),
            PlaybackMode::SleepSession {
                looping: true,
                duration,
            } => write!(f, "sleep session {}s, looping", duration.as_secs()),
            PlaybackMode::SleepSession { duration, .. } => {
                write!(f, "sleep session {}s", duration.as_secs())
            }
        }
    }
}

/// Public view of the live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: u64,
    pub sound_id: String,
    pub mode: PlaybackMode,
    pub has_timer: bool,
}

/// The one live session; only the controller creates or drops it
pub(crate) struct PlaybackSession {
    pub(crate) id: u64,
    pub(crate) sound_id: String,
    pub(crate) mode: PlaybackMode,
    pub(crate) started_at: Instant,
    pub(crate) timer: Option<AutoStopTimer>,
}

impl PlaybackSession {
    pub(crate) fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            sound_id: self.sound_id.clone(),
            mode: self.mode,
            has_timer: self.timer.is_some(),
        }
    }

    /// Cancel the timer; the audio handle is released by the caller
    pub(crate) fn teardown(mut self) -> String {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        tracing::debug!(
            "Session {} ({}) ended after {:.1}s",
            self.id,
            self.sound_id,
            self.started_at.elapsed().as_secs_f32()
        );
        self.sound_id
    }
}

/// Stops session `session_id` after a delay unless cancelled first.
///
/// Dropping the timer disconnects its channel, which cancels it.
pub(crate) struct AutoStopTimer {
    cancel: Sender<()>,
}

impl AutoStopTimer {
    pub(crate) fn schedule(
        controller: Weak<ControllerInner>,
        session_id: u64,
        after: Duration,
    ) -> Option<Self> {
        let (tx, rx) = bounded::<()>(1);

        let spawned = thread::Builder::new()
            .name(format!("auto-stop-{}", session_id))
            .spawn(move || match rx.recv_timeout(after) {
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(controller) = controller.upgrade() {
                        controller.stop_session(session_id);
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::trace!("Auto-stop for session {} cancelled", session_id);
                }
            });

        match spawned {
            Ok(_) => Some(Self { cancel: tx }),
            Err(e) => {
                tracing::error!("Failed to start auto-stop timer: {}", e);
                None
            }
        }
    }

    pub(crate) fn cancel(self) {
        let _ = self.cancel.try_send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_always_auto_stops() {
        let mode = PlaybackMode::Preview {
            duration: Duration::from_secs(5),
        };
        assert_eq!(mode.auto_stop_after(), Some(Duration::from_secs(5)));
        assert!(!mode.is_looping());
        assert_eq!(mode.to_string(), "preview 5s");
    }

    #[test]
    fn test_looping_sleep_session_has_no_timer() {
        let mode = PlaybackMode::SleepSession {
            duration: Duration::from_secs(30),
            looping: true,
        };
        assert_eq!(mode.auto_stop_after(), None);
        assert!(mode.is_looping());
        assert_eq!(mode.to_string(), "sleep session 30s, looping");

        let short = PlaybackMode::SleepSession {
            duration: Duration::from_secs(10),
            looping: false,
        };
        assert_eq!(short.auto_stop_after(), Some(Duration::from_secs(10)));
    }
}
