use super::AudioHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Identifies one synthesis request and the playback that follows it.
///
/// Results carrying a ticket from an earlier run or an earlier sentence are
/// stale and must be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub generation: u64,
    pub index: usize,
}

/// Audio wanted for one sentence. At most one is outstanding per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub ticket: Ticket,
    pub sentence_id: String,
    pub text: String,
}

/// State of one narration run over a document's sentences.
///
/// Transitions are plain state changes; [`super::Narrator`] performs the side
/// effects around them.
#[derive(Debug, Clone, Default)]
pub struct NarrationSession {
    ordered_keys: Vec<String>,
    current_index: usize,
    state: PlaybackState,
    ticket: Option<Ticket>,
    audio: Option<AudioHandle>,
    pause_offset: f64,
    clip_finished: bool,
    generation: u64,
}

impl NarrationSession {
    /// `keys` must already be in document order.
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            ordered_keys: keys,
            ..Self::default()
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn ordered_keys(&self) -> &[String] {
        &self.ordered_keys
    }

    pub fn len(&self) -> usize {
        self.ordered_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_keys.is_empty()
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.ordered_keys.iter().position(|key| key == id)
    }

    /// Key at the current index, if the run has not gone past the last one.
    pub fn current_key(&self) -> Option<&str> {
        self.ordered_keys
            .get(self.current_index)
            .map(String::as_str)
    }

    pub fn ticket(&self) -> Option<Ticket> {
        self.ticket
    }

    pub fn audio(&self) -> Option<AudioHandle> {
        self.audio
    }

    pub fn pause_offset(&self) -> f64 {
        self.pause_offset
    }

    /// The paused clip has already ended or failed; resuming moves on.
    pub fn clip_finished(&self) -> bool {
        self.clip_finished
    }

    /// Whether a result for `ticket` still belongs to this run.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.state != PlaybackState::Idle && self.ticket == Some(ticket)
    }

    /// Waiting on synthesis for the current sentence.
    pub fn awaiting_audio(&self) -> bool {
        self.ticket.is_some() && self.audio.is_none()
    }

    /// Starts a new run at `index`, invalidating every earlier ticket.
    pub fn begin(&mut self, index: usize) {
        self.generation += 1;
        self.current_index = index;
        self.state = PlaybackState::Playing;
        self.ticket = None;
        self.audio = None;
        self.pause_offset = 0.0;
        self.clip_finished = false;
    }

    /// Marks synthesis for the current sentence as outstanding.
    pub fn issue_request(&mut self) -> Ticket {
        let ticket = Ticket {
            generation: self.generation,
            index: self.current_index,
        };
        self.ticket = Some(ticket);
        ticket
    }

    /// Moves past the current sentence, returning any audio still attached.
    pub fn skip(&mut self) -> Option<AudioHandle> {
        self.current_index += 1;
        self.ticket = None;
        self.pause_offset = 0.0;
        self.clip_finished = false;
        self.audio.take()
    }

    pub fn attach_audio(&mut self, handle: AudioHandle) {
        self.audio = Some(handle);
        self.clip_finished = false;
    }

    /// Records that the paused clip ended. Returns `false`, changing nothing,
    /// unless the session is paused.
    pub fn finish_clip_while_paused(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.clip_finished = true;
        true
    }

    /// Pauses at `offset`. Only legal while playing loaded audio.
    pub fn pause_at(&mut self, offset: f64) -> bool {
        if self.state != PlaybackState::Playing || self.audio.is_none() {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.pause_offset = offset;
        true
    }

    /// Leaves the paused state, returning the audio and the offset to seek to.
    pub fn resume(&mut self) -> Option<(AudioHandle, f64)> {
        if self.state != PlaybackState::Paused {
            return None;
        }
        let handle = self.audio?;
        self.state = PlaybackState::Playing;
        Some((handle, self.pause_offset))
    }

    /// Ends the run after the last sentence.
    pub fn finish(&mut self) {
        self.reset();
    }

    /// Returns to idle at the first sentence, returning any attached audio.
    pub fn reset(&mut self) -> Option<AudioHandle> {
        self.generation += 1;
        self.current_index = 0;
        self.state = PlaybackState::Idle;
        self.ticket = None;
        self.pause_offset = 0.0;
        self.clip_finished = false;
        self.audio.take()
    }
}
