use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_VOICE: &str = "af_heart";
pub const DEFAULT_SPEED: f32 = 1.0;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("Speech request failed: {0}")]
    Transport(String),
    #[error("Speech backend returned no audio")]
    EmptyAudio,
    #[error("Unknown audio format: {0}")]
    UnknownFormat(String),
}

/// Voice settings passed with every synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    pub voice: String,
    pub speed: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            speed: DEFAULT_SPEED,
        }
    }
}

/// Encodings a speech backend can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Mp3,
        AudioFormat::Opus,
        AudioFormat::Aac,
        AudioFormat::Flac,
        AudioFormat::Wav,
        AudioFormat::Pcm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus => "opus",
            AudioFormat::Aac => "aac",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
            AudioFormat::Pcm => "pcm",
        }
    }

    /// File extension for a clip in this format.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Opus => "audio/opus",
            AudioFormat::Aac => "audio/aac",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Pcm => "audio/pcm",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| SpeechError::UnknownFormat(s.to_string()))
    }
}

/// Synthesized audio for one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Turns sentence text into audio.
pub trait SpeechEngine {
    fn generate(&mut self, text: &str, options: &SpeechOptions) -> Result<AudioClip, SpeechError>;
}
