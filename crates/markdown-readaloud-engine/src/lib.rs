pub mod io;
pub mod narration;
pub mod parsing;

// Re-export key types for easier usage
pub use io::*;
pub use narration::{
    AudioClip, AudioFormat, AudioHandle, AudioOutput, NarrationError, NarrationSession, Narrator,
    PlaybackError, PlaybackState, SpeechEngine, SpeechError, SpeechOptions, Surface,
    SynthesisRequest, Ticket,
};
pub use parsing::{ParseError, ParsedDocument, SentenceMap, parse_markdown};
