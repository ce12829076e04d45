use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use markdown_readaloud_engine::narration::BlockingAudioOutput;
use markdown_readaloud_engine::{
    AudioClip, AudioHandle, AudioOutput, PlaybackError, SentenceMap, Surface, io,
};

/// Audio output that saves each sentence's clip as `<sentence-id>.<ext>`.
///
/// "Playing" a clip is writing it; a clip is finished as soon as it is on
/// disk, so pausing always reports offset zero.
pub struct ClipWriter {
    dir: PathBuf,
    next_handle: u64,
    loaded: HashMap<AudioHandle, (String, AudioClip)>,
    written: Vec<PathBuf>,
}

impl ClipWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_handle: 0,
            loaded: HashMap::new(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Clip files written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl AudioOutput for ClipWriter {
    fn load(&mut self, sentence_id: &str, clip: AudioClip) -> Result<AudioHandle, PlaybackError> {
        self.next_handle += 1;
        let handle = AudioHandle(self.next_handle);
        self.loaded.insert(handle, (sentence_id.to_string(), clip));
        Ok(handle)
    }

    fn play(&mut self, handle: AudioHandle) -> Result<(), PlaybackError> {
        let (sentence_id, clip) = self
            .loaded
            .get(&handle)
            .ok_or(PlaybackError::UnknownHandle(handle))?;
        let path = self
            .dir
            .join(format!("{sentence_id}.{}", clip.format.extension()));

        io::write_file(&path, &clip.data)?;
        log::debug!("Wrote {} bytes to {}", clip.data.len(), path.display());
        self.written.push(path);
        Ok(())
    }

    fn pause(&mut self, _handle: AudioHandle) -> f64 {
        0.0
    }

    fn seek(&mut self, _handle: AudioHandle, _offset: f64) {}

    fn release(&mut self, handle: AudioHandle) {
        self.loaded.remove(&handle);
    }
}

impl BlockingAudioOutput for ClipWriter {
    fn wait(&mut self, handle: AudioHandle) -> Result<(), PlaybackError> {
        if self.loaded.contains_key(&handle) {
            Ok(())
        } else {
            Err(PlaybackError::UnknownHandle(handle))
        }
    }
}

/// Prints each sentence as it is highlighted.
pub struct ConsoleSurface<W: Write> {
    sentences: SentenceMap,
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(sentences: SentenceMap, out: W) -> Self {
        Self { sentences, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for ConsoleSurface<W> {
    fn contains(&self, id: &str) -> bool {
        self.sentences.contains_key(id)
    }

    fn highlight(&mut self, id: &str) {
        let Some(text) = self.sentences.get(id) else {
            return;
        };
        if let Err(e) = writeln!(self.out, "[{id}] {}", text.trim()) {
            log::warn!("Could not print sentence {id}: {e}");
        }
    }

    fn unhighlight(&mut self, _id: &str) {}

    fn scroll_into_view(&mut self, _id: &str) {}
}
