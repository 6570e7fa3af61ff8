/// Sound playback
///
/// `SoundPlaybackController` owns at most one session, either a timed
/// preview or a sleep session, together with its auto-stop timer.
pub mod controller;
pub mod session;

pub use controller::SoundPlaybackController;
pub use session::{PlaybackMode, SessionInfo};
