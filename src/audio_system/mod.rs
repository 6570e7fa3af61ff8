/// Audio system module
///
/// Plays one ambient sound at a time through the local output device.
///
/// ## Architecture
///
/// ```text
/// RodioBackend (AudioBackend)
///   ├── SoundSource   GET /sounds/{id}.mp3, cached in memory
///   └── AudioPlayer   audio thread owning the rodio OutputStream + Sink
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let backend = RodioBackend::new(client, 0.8)?;
/// let clip = backend.load("rain")?;
/// backend.start(&clip, true)?;   // looped
/// backend.halt();
/// ```
pub mod backend;
pub mod player;
pub mod source;

// Re-export commonly used types
pub use backend::{AudioBackend, RodioBackend};
pub use player::AudioPlayer;
pub use source::{sound_path, SoundClip, SoundSource};
