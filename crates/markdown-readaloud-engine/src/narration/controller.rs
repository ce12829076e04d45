use super::{
    AudioClip, AudioHandle, AudioOutput, NarrationError, NarrationSession, PlaybackError,
    PlaybackState, SpeechError, SpeechOptions, Surface, SynthesisRequest, Ticket,
};
use crate::parsing::SentenceMap;

/// Reads a tagged document aloud one sentence at a time.
///
/// The narrator never calls the speech engine itself. Each sentence it wants
/// audio for is queued as a [`SynthesisRequest`] (see [`Narrator::take_request`]);
/// the caller answers with [`Narrator::audio_ready`] and reports the end of
/// playback with [`Narrator::playback_ended`] or [`Narrator::playback_failed`].
/// Answers whose ticket no longer matches the session are ignored, so a result
/// that arrives after `stop` or a restart cannot revive the old run.
pub struct Narrator<S: Surface, A: AudioOutput> {
    sentences: SentenceMap,
    session: NarrationSession,
    surface: S,
    audio: A,
    options: SpeechOptions,
    outbox: Option<SynthesisRequest>,
}

impl<S: Surface, A: AudioOutput> Narrator<S, A> {
    pub fn new(sentences: SentenceMap, surface: S, audio: A, options: SpeechOptions) -> Self {
        let session = NarrationSession::new(sentences.keys().cloned().collect());
        Self {
            sentences,
            session,
            surface,
            audio,
            options,
            outbox: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    pub fn session(&self) -> &NarrationSession {
        &self.session
    }

    pub fn options(&self) -> &SpeechOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// `(sentences passed, total sentences)` for the current run.
    pub fn progress(&self) -> (usize, usize) {
        (self.session.current_index(), self.session.len())
    }

    /// Id of the sentence being read or waited on.
    pub fn current_sentence(&self) -> Option<&str> {
        match self.session.state() {
            PlaybackState::Idle => None,
            _ => self.session.current_key(),
        }
    }

    /// Audio playing (or paused) for `ticket`, if it is still current.
    pub fn active_audio(&self, ticket: Ticket) -> Option<AudioHandle> {
        if self.session.is_current(ticket) {
            self.session.audio()
        } else {
            None
        }
    }

    /// The next sentence to synthesize, if one is waiting.
    pub fn take_request(&mut self) -> Option<SynthesisRequest> {
        self.outbox.take()
    }

    /// Starts reading at `from`, or at the first sentence.
    ///
    /// A run already in progress is stopped first. An unknown `from` leaves
    /// the narrator idle.
    pub fn start(&mut self, from: Option<&str>) -> Result<(), NarrationError> {
        if self.session.state() != PlaybackState::Idle {
            self.stop();
        }

        let index = match from {
            Some(id) => match self.session.position_of(id) {
                Some(index) => index,
                None => {
                    log::error!("Sentence {id} not found, not starting narration");
                    return Err(NarrationError::UnknownSentence(id.to_string()));
                }
            },
            None => 0,
        };

        log::info!(
            "Starting narration at sentence {} of {}",
            index + 1,
            self.session.len()
        );
        self.session.begin(index);
        self.advance();
        Ok(())
    }

    pub fn pause(&mut self) {
        let Some(handle) = self.session.audio() else {
            log::debug!("Nothing playing, ignoring pause");
            return;
        };
        if self.session.state() != PlaybackState::Playing {
            log::debug!("Not playing, ignoring pause");
            return;
        }
        let offset = self.audio.pause(handle);
        self.session.pause_at(offset);
    }

    pub fn resume(&mut self) {
        let Some((handle, offset)) = self.session.resume() else {
            log::debug!("Not paused, ignoring resume");
            return;
        };
        if self.session.clip_finished() {
            self.move_on();
            return;
        }
        self.audio.seek(handle, offset);
        if let Err(err) = self.audio.play(handle) {
            log::warn!("Could not resume playback: {err}");
            self.move_on();
        }
    }

    /// Stops reading and clears every highlight. Safe in any state.
    pub fn stop(&mut self) {
        if let Some(handle) = self.session.reset() {
            self.audio.release(handle);
        }
        self.outbox = None;
        for key in self.session.ordered_keys() {
            self.surface.unhighlight(key);
        }
    }

    /// Delivers the synthesis result for `ticket`.
    pub fn audio_ready(&mut self, ticket: Ticket, result: Result<AudioClip, SpeechError>) {
        if !self.session.is_current(ticket) {
            log::debug!("Dropping stale synthesis result {ticket:?}");
            return;
        }
        let Some(id) = self.session.current_key().map(str::to_string) else {
            return;
        };

        let clip = match result {
            Ok(clip) if clip.is_empty() => Err(SpeechError::EmptyAudio),
            other => other,
        };
        let clip = match clip {
            Ok(clip) => clip,
            Err(err) => {
                log::error!("Error generating audio for {id}: {err}");
                self.move_on();
                return;
            }
        };

        let handle = match self.audio.load(&id, clip) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("Error loading audio for {id}: {err}");
                self.move_on();
                return;
            }
        };

        self.surface.highlight(&id);
        self.surface.scroll_into_view(&id);
        self.session.attach_audio(handle);

        log::debug!("Playing audio for {id}");
        if let Err(err) = self.audio.play(handle) {
            log::error!("Error playing audio for {id}: {err}");
            self.move_on();
        }
    }

    /// Playback of the sentence behind `ticket` finished.
    ///
    /// While paused the narrator stays on the sentence; the next sentence is
    /// requested when playback is resumed.
    pub fn playback_ended(&mut self, ticket: Ticket) {
        if !self.session.is_current(ticket) {
            log::debug!("Dropping stale playback end {ticket:?}");
            return;
        }
        if self.session.finish_clip_while_paused() {
            log::debug!("Playback ended while paused, moving on at resume");
            return;
        }
        if let Some(id) = self.session.current_key() {
            log::debug!("Finished playing audio for {id}");
        }
        self.move_on();
    }

    /// Playback of the sentence behind `ticket` failed. The sentence is
    /// skipped.
    pub fn playback_failed(&mut self, ticket: Ticket, err: PlaybackError) {
        if !self.session.is_current(ticket) {
            log::debug!("Dropping stale playback error {ticket:?}");
            return;
        }
        if let Some(id) = self.session.current_key() {
            log::error!("Error playing audio for {id}: {err}");
        }
        if self.session.finish_clip_while_paused() {
            return;
        }
        self.move_on();
    }

    /// Clears the current sentence and goes on to the next one.
    fn move_on(&mut self) {
        if let Some(id) = self.session.current_key() {
            self.surface.unhighlight(id);
        }
        if let Some(handle) = self.session.skip() {
            self.audio.release(handle);
        }
        self.advance();
    }

    /// Queues a request for the next readable sentence, or finishes the run.
    fn advance(&mut self) {
        while let Some(id) = self.session.current_key() {
            if !self.surface.contains(id) {
                log::warn!("Element {id} not found, skipping");
                self.session.skip();
                continue;
            }

            let text = self
                .sentences
                .get(id)
                .map(|text| text.trim())
                .unwrap_or_default();
            if text.is_empty() {
                log::warn!("Sentence {id} has no text, skipping");
                self.session.skip();
                continue;
            }

            let request = SynthesisRequest {
                sentence_id: id.to_string(),
                text: text.to_string(),
                ticket: self.session.issue_request(),
            };
            self.outbox = Some(request);
            return;
        }

        log::info!("All sentences processed");
        self.session.finish();
    }
}
