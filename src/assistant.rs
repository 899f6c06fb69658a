//! The assistant turn loop
//!
//! Each turn captures one utterance, recognizes it, routes it to a command,
//! and dispatches the handler. Transient failures (no speech, a bad service
//! call) end the turn and the loop keeps listening; only a missing offline
//! model while the network is down takes the process down.

use crate::audio::{AudioCapture, CaptureArtifact};
use crate::config::Config;
use crate::handlers::{Flow, HandlerContext, HandlerRegistry};
use crate::recognize::{LocalRecognizer, PrimaryRecognizer, Recognition, RecognitionEngine};
use crate::router::CommandTable;
use crate::speech::SpeechSink;
use crate::state::AssistantState;
use crate::{Error, Result};

/// Spoken when no speech arrives within the listen window
const MICROPHONE_PROMPT: &str = "Can you check if your microphone is on, please?";

/// The voice assistant: owns every pipeline stage and the turn loop
pub struct Assistant {
    config: Config,
    state: AssistantState,
    capture: AudioCapture,
    engine: RecognitionEngine,
    speech: SpeechSink,
    table: CommandTable,
    handlers: HandlerRegistry,
    http: reqwest::Client,
}

impl Assistant {
    /// Assemble the assistant from resolved configuration
    ///
    /// # Errors
    ///
    /// Returns error if audio devices cannot be opened, the API key is
    /// missing, or the alias table is inconsistent
    pub fn new(config: Config) -> Result<Self> {
        let state = AssistantState::new(
            config.assistant.name.clone(),
            config.assistant.sex,
            config.assistant.speech_language,
        );

        let capture = AudioCapture::new()?;
        let speech = SpeechSink::new(
            config.api_keys.openai.clone(),
            config.voice.tts_model.clone(),
            config.voice.tts_speed,
        )?;

        let engine = RecognitionEngine::new(
            PrimaryRecognizer::new(
                config.api_keys.openai.clone(),
                config.recognition.stt_model.clone(),
            )?,
            LocalRecognizer::new(config.recognition.model_dir.clone()),
        );

        let table = CommandTable::new()?;
        let handlers = HandlerRegistry::defaults();
        let http = reqwest::Client::new();

        Ok(Self {
            config,
            state,
            capture,
            engine,
            speech,
            table,
            handlers,
            http,
        })
    }

    /// Run the turn loop until a farewell command or a fatal error
    ///
    /// # Errors
    ///
    /// Returns error only for fatal conditions, such as a missing offline
    /// model while the networked recognizer is unreachable
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(
            assistant = %self.state.name(),
            language = %self.state.speech_language(),
            voice = self.state.voice_id(),
            "assistant ready, listening"
        );

        loop {
            match self.turn().await? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
        }

        tracing::info!("assistant stopped");
        Ok(())
    }

    /// Run one capture-recognize-route-dispatch turn
    async fn turn(&mut self) -> Result<Flow> {
        let sample = match self.capture.capture() {
            Ok(sample) => sample,
            Err(Error::CaptureTimeout) => {
                tracing::warn!("no speech detected, prompting the owner");
                let spoken = self
                    .speech
                    .say(MICROPHONE_PROMPT, self.state.voice_id())
                    .await;
                return Ok(prompt_flow(spoken));
            }
            Err(e) => return Err(e),
        };

        let artifact = CaptureArtifact::write(&sample)?;
        let recognition = self
            .engine
            .recognize(&artifact, self.state.speech_language())
            .await;
        // The capture file is gone before any error can propagate
        drop(artifact);

        let text = match recognition? {
            Recognition::Text(text) => text,
            Recognition::Silence => {
                tracing::debug!("nothing recognized this turn");
                return Ok(Flow::Continue);
            }
        };

        tracing::info!(%text, "recognized");

        let Some(routed) = self.table.route(&text) else {
            tracing::debug!(%text, "no command matched, ignoring");
            return Ok(Flow::Continue);
        };

        let mut ctx = HandlerContext {
            owner: &self.config.owner,
            state: &mut self.state,
            speech: &mut self.speech,
            http: &self.http,
            api_keys: &self.config.api_keys,
        };

        Ok(self
            .handlers
            .dispatch(routed.command, &mut ctx, &routed.args)
            .await)
    }
}

/// Resolve the microphone prompt's outcome for the turn loop
///
/// The prompt is best-effort: a playback failure is attributable to this
/// turn, so it is logged and the loop keeps listening.
fn prompt_flow(spoken: Result<()>) -> Flow {
    if let Err(e) = spoken {
        tracing::error!(error = %e, "failed to speak microphone prompt");
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_prompt_does_not_end_the_loop() {
        let flow = prompt_flow(Err(Error::Tts("no output device".to_string())));
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_spoken_prompt_continues() {
        assert_eq!(prompt_flow(Ok(())), Flow::Continue);
    }
}
