//! # Narration
//!
//! Reads a tagged document aloud, sentence by sentence, highlighting each
//! sentence while its audio plays.
//!
//! ## Modules
//!
//! - **`session`**: the state record and its transitions
//! - **`controller`**: [`Narrator`], which applies transitions and talks to collaborators
//! - **`speech`**, **`playback`**, **`surface`**: the collaborator traits
//! - **`driver`**: a synchronous loop for callers without an event loop
//!
//! Failures never end a run: a sentence that cannot be found, synthesized or
//! played is logged and skipped.

pub mod controller;
pub mod driver;
pub mod playback;
pub mod session;
pub mod speech;
pub mod surface;


use thiserror::Error;

pub use controller::Narrator;
pub use driver::{BlockingAudioOutput, NarrationReport, run_blocking};
pub use playback::{AudioHandle, AudioOutput, PlaybackError};
pub use session::{NarrationSession, PlaybackState, SynthesisRequest, Ticket};
pub use speech::{AudioClip, AudioFormat, SpeechEngine, SpeechError, SpeechOptions};
pub use surface::{HIGHLIGHT_CLASS, Surface, TreeSurface};

#[derive(Error, Debug)]
pub enum NarrationError {
    #[error("Sentence not found: {0}")]
    UnknownSentence(String),
}
