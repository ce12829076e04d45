use thiserror::Error;

use super::AudioClip;
use crate::io::IoError;

/// Opaque reference to audio loaded into an [`AudioOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioHandle(pub u64);

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No audio loaded for handle {0:?}")]
    UnknownHandle(AudioHandle),
    #[error("Audio output failed: {0}")]
    Output(String),
    #[error("Could not write audio: {0}")]
    Io(#[from] IoError),
}

/// Where synthesized clips are played.
///
/// Offsets are seconds from the start of the clip.
pub trait AudioOutput {
    fn load(&mut self, sentence_id: &str, clip: AudioClip) -> Result<AudioHandle, PlaybackError>;
    fn play(&mut self, handle: AudioHandle) -> Result<(), PlaybackError>;
    /// Pauses playback and returns the current offset.
    fn pause(&mut self, handle: AudioHandle) -> f64;
    fn seek(&mut self, handle: AudioHandle, offset: f64);
    /// Stops playback and forgets the clip.
    fn release(&mut self, handle: AudioHandle);
}
