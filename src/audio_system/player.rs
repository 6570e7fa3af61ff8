/// Audio player for the single ambient sound
///
/// rodio's `OutputStream` cannot leave the thread that created it, so the
/// player owns a dedicated audio thread and talks to it over a channel.
use std::io::Cursor;
use std::thread;

use crossbeam_channel::{bounded, unbounded, Sender};
use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::source::SoundClip;
use crate::error::AudioError;

enum PlayerRequest {
    Play {
        clip: SoundClip,
        looped: bool,
        reply: Sender<Result<(), AudioError>>,
    },
    Stop,
    Shutdown,
}

/// Handle to the audio thread
pub struct AudioPlayer {
    requests: Sender<PlayerRequest>,
    thread: Mutex<Option<thread::JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread; the output device is opened on first play
    pub fn spawn(volume: f32) -> Result<Self, AudioError> {
        let (tx, rx) = unbounded::<PlayerRequest>();

        let handle = thread::Builder::new()
            .name("audio-player".to_string())
            .spawn(move || {
                tracing::info!("Audio thread started");
                let mut output = PlayerOutput::new(volume);

                while let Ok(request) = rx.recv() {
                    match request {
                        PlayerRequest::Play {
                            clip,
                            looped,
                            reply,
                        } => {
                            let _ = reply.send(output.play(clip, looped));
                        }
                        PlayerRequest::Stop => output.stop(),
                        PlayerRequest::Shutdown => break,
                    }
                }

                output.stop();
                tracing::info!("Audio thread stopped");
            })
            .map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;

        Ok(Self {
            requests: tx,
            thread: Mutex::new(Some(handle)),
        })
    }

    /// Replace whatever is playing with `clip` (blocks until the sink accepted it)
    pub fn play(&self, clip: SoundClip, looped: bool) -> Result<(), AudioError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.requests
            .send(PlayerRequest::Play {
                clip,
                looped,
                reply: reply_tx,
            })
            .map_err(|_| AudioError::PlayerGone)?;

        reply_rx.recv().map_err(|_| AudioError::PlayerGone)?
    }

    /// Stop playback and drop the sink
    pub fn stop(&self) {
        let _ = self.requests.send(PlayerRequest::Stop);
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        let _ = self.requests.send(PlayerRequest::Shutdown);
        if let Some(handle) = self.thread.lock().take() {
            let _ = handle.join();
        }
    }
}

/// State living on the audio thread
struct PlayerOutput {
    stream: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
    volume: f32,
}

impl PlayerOutput {
    fn new(volume: f32) -> Self {
        Self {
            stream: None,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    fn handle(&mut self) -> Result<&OutputStreamHandle, AudioError> {
        if self.stream.is_none() {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| AudioError::StreamInitFailed(e.to_string().into()))?;
            tracing::info!("✓ Audio output stream opened");
            self.stream = Some((stream, handle));
        }

        match &self.stream {
            Some((_, handle)) => Ok(handle),
            None => Err(AudioError::StreamInitFailed("no output stream".into())),
        }
    }

    fn play(&mut self, clip: SoundClip, looped: bool) -> Result<(), AudioError> {
        self.stop();

        let volume = self.volume;
        let sink = Sink::try_new(self.handle()?)
            .map_err(|e| AudioError::PlaybackFailed(e.to_string().into()))?;

        // Decoder needs owned 'static data, so the shared bytes are cloned here
        let cursor = Cursor::new((*clip.data).clone());
        if looped {
            let source =
                Decoder::new_looped(cursor).map_err(|e| AudioError::DecodeFailed(Box::new(e)))?;
            sink.append(source);
        } else {
            let source = Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed(Box::new(e)))?;
            sink.append(source);
        }

        sink.set_volume(volume);
        sink.play();
        tracing::debug!(
            "Playing {} ({} bytes, looped={})",
            clip.sound_id,
            clip.len(),
            looped
        );

        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The output device is opened lazily, so these run without audio hardware

    #[test]
    fn test_player_spawn_and_drop() {
        let player = AudioPlayer::spawn(0.5).unwrap();
        player.stop();
        drop(player);
    }

    #[test]
    fn test_garbage_bytes_do_not_play() {
        let player = AudioPlayer::spawn(1.0).unwrap();
        let clip = SoundClip::new("noise", vec![0x00, 0x01, 0x02, 0x03]);
        // Either no device (stream error) or undecodable bytes
        assert!(player.play(clip, false).is_err());
    }
}
