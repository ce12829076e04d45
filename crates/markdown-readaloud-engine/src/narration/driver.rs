use super::{AudioHandle, AudioOutput, NarrationError, Narrator, PlaybackError, SpeechEngine, Surface};

/// An [`AudioOutput`] that can block until a clip has finished.
pub trait BlockingAudioOutput: AudioOutput {
    fn wait(&mut self, handle: AudioHandle) -> Result<(), PlaybackError>;
}

/// Outcome of a blocking narration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrationReport {
    /// Sentences whose audio played to the end.
    pub spoken: Vec<String>,
    /// Sentences skipped because synthesis or playback failed.
    pub failed: Vec<String>,
}

/// Runs `narrator` to the end on the current thread, synthesizing each
/// sentence with `engine` as it is requested.
pub fn run_blocking<S, A, E>(
    narrator: &mut Narrator<S, A>,
    engine: &mut E,
    from: Option<&str>,
) -> Result<NarrationReport, NarrationError>
where
    S: Surface,
    A: BlockingAudioOutput,
    E: SpeechEngine,
{
    narrator.start(from)?;
    let mut report = NarrationReport::default();

    while let Some(request) = narrator.take_request() {
        let ticket = request.ticket;
        let result = engine.generate(&request.text, narrator.options());
        narrator.audio_ready(ticket, result);

        let Some(handle) = narrator.active_audio(ticket) else {
            report.failed.push(request.sentence_id);
            continue;
        };

        match narrator.audio_mut().wait(handle) {
            Ok(()) => {
                report.spoken.push(request.sentence_id);
                narrator.playback_ended(ticket);
            }
            Err(err) => {
                report.failed.push(request.sentence_id);
                narrator.playback_failed(ticket, err);
            }
        }
    }

    log::info!(
        "Narration finished: {} spoken, {} failed",
        report.spoken.len(),
        report.failed.len()
    );
    Ok(report)
}
