//! Two-tier speech recognition
//!
//! The networked tier is tried first for accuracy; on service failure the
//! engine falls back to the offline Vosk tier keyed by the current language.
//! The tiers run strictly in order, never in parallel, and each failure mode
//! is classified so the turn loop knows whether to continue, skip, or abort.

mod local;
mod primary;

pub use local::LocalRecognizer;
pub use primary::PrimaryRecognizer;

use async_trait::async_trait;

use crate::audio::CaptureArtifact;
use crate::state::Language;
use crate::{Error, Result};

/// Outcome of one recognition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    /// Lower-cased recognized text
    Text(String),
    /// The recognizer found no confident speech; not an error
    Silence,
}

/// The networked transcription tier
#[async_trait(?Send)]
pub trait PrimaryTranscriber {
    /// Transcribe raw WAV bytes with the requested language tag
    async fn transcribe(&self, audio: Vec<u8>, language: Language) -> Result<String>;
}

/// The offline transcription tier
pub trait FallbackTranscriber {
    /// Decode the capture artifact with the model for `language`
    fn transcribe(&self, artifact: &CaptureArtifact, language: Language) -> Result<String>;
}

/// Two-tier recognition engine
pub struct RecognitionEngine<P = PrimaryRecognizer, F = LocalRecognizer> {
    primary: P,
    local: F,
}

impl<P: PrimaryTranscriber, F: FallbackTranscriber> RecognitionEngine<P, F> {
    /// Create an engine from the two tiers
    #[must_use]
    pub const fn new(primary: P, local: F) -> Self {
        Self { primary, local }
    }

    /// Recognize the captured utterance in the given language
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelMissing`] when the networked tier is down and
    /// no offline model is provisioned for `language`; all other failures
    /// resolve to [`Recognition::Silence`] for this turn
    pub async fn recognize(
        &self,
        artifact: &CaptureArtifact,
        language: Language,
    ) -> Result<Recognition> {
        let audio = artifact.read_bytes()?;

        match self.primary.transcribe(audio, language).await {
            // An empty transcript means the service understood the audio but
            // found nothing confident; do not fall back for that
            Ok(text) => Ok(classify(&text)),
            Err(e) => {
                tracing::warn!(error = %e, "networked recognition unavailable, trying offline");
                self.recognize_offline(artifact, language)
            }
        }
    }

    /// Fallback tier: offline decoding with the language-keyed model
    fn recognize_offline(
        &self,
        artifact: &CaptureArtifact,
        language: Language,
    ) -> Result<Recognition> {
        match self.local.transcribe(artifact, language) {
            Ok(text) => Ok(classify(&text)),
            Err(e @ Error::ModelMissing(_)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "offline recognition failed, skipping turn");
                Ok(Recognition::Silence)
            }
        }
    }
}

/// Normalize a raw transcript into a recognition outcome
fn classify(text: &str) -> Recognition {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Recognition::Silence
    } else {
        Recognition::Text(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::path::PathBuf;

    use crate::audio::{AudioSample, SAMPLE_RATE};

    enum PrimaryScript {
        Text(&'static str),
        Down,
    }

    struct ScriptedPrimary(PrimaryScript);

    #[async_trait(?Send)]
    impl PrimaryTranscriber for ScriptedPrimary {
        async fn transcribe(&self, _audio: Vec<u8>, _language: Language) -> Result<String> {
            match self.0 {
                PrimaryScript::Text(text) => Ok(text.to_string()),
                PrimaryScript::Down => Err(Error::Stt("connection refused".to_string())),
            }
        }
    }

    enum FallbackScript {
        Text(&'static str),
        NoModel,
        Broken,
    }

    struct ScriptedFallback {
        script: FallbackScript,
        called: Cell<bool>,
    }

    impl ScriptedFallback {
        fn new(script: FallbackScript) -> Self {
            Self {
                script,
                called: Cell::new(false),
            }
        }
    }

    impl FallbackTranscriber for ScriptedFallback {
        fn transcribe(&self, _artifact: &CaptureArtifact, language: Language) -> Result<String> {
            self.called.set(true);
            match self.script {
                FallbackScript::Text(text) => Ok(text.to_string()),
                FallbackScript::NoModel => Err(Error::ModelMissing(PathBuf::from(format!(
                    "/models/vosk-model-small-{}-0.4",
                    language.code()
                )))),
                FallbackScript::Broken => Err(Error::Stt("decoder gave up".to_string())),
            }
        }
    }

    fn artifact() -> CaptureArtifact {
        let sample = AudioSample {
            samples: vec![0; 160],
            sample_rate: SAMPLE_RATE,
        };
        CaptureArtifact::write(&sample).unwrap()
    }

    #[tokio::test]
    async fn test_primary_text_wins_without_fallback() {
        let engine = RecognitionEngine::new(
            ScriptedPrimary(PrimaryScript::Text("Weather Tokyo")),
            ScriptedFallback::new(FallbackScript::Text("unused")),
        );

        let result = engine.recognize(&artifact(), Language::En).await.unwrap();
        assert_eq!(result, Recognition::Text("weather tokyo".to_string()));
        assert!(!engine.local.called.get());
    }

    #[tokio::test]
    async fn test_empty_primary_is_silence_not_fallback() {
        let engine = RecognitionEngine::new(
            ScriptedPrimary(PrimaryScript::Text("  ")),
            ScriptedFallback::new(FallbackScript::Text("unused")),
        );

        let result = engine.recognize(&artifact(), Language::En).await.unwrap();
        assert_eq!(result, Recognition::Silence);
        assert!(!engine.local.called.get());
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback() {
        let engine = RecognitionEngine::new(
            ScriptedPrimary(PrimaryScript::Down),
            ScriptedFallback::new(FallbackScript::Text("переведи кот")),
        );

        let result = engine.recognize(&artifact(), Language::Ru).await.unwrap();
        assert_eq!(result, Recognition::Text("переведи кот".to_string()));
        assert!(engine.local.called.get());
    }

    #[tokio::test]
    async fn test_missing_model_propagates_when_offline() {
        let engine = RecognitionEngine::new(
            ScriptedPrimary(PrimaryScript::Down),
            ScriptedFallback::new(FallbackScript::NoModel),
        );

        match engine.recognize(&artifact(), Language::En).await {
            Err(Error::ModelMissing(path)) => {
                assert!(path.ends_with("vosk-model-small-en-0.4"));
            }
            other => panic!("expected ModelMissing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_broken_fallback_skips_the_turn() {
        let engine = RecognitionEngine::new(
            ScriptedPrimary(PrimaryScript::Down),
            ScriptedFallback::new(FallbackScript::Broken),
        );

        let result = engine.recognize(&artifact(), Language::En).await.unwrap();
        assert_eq!(result, Recognition::Silence);
    }

    #[test]
    fn test_classify_empty_is_silence() {
        assert_eq!(classify(""), Recognition::Silence);
        assert_eq!(classify("   "), Recognition::Silence);
    }

    #[test]
    fn test_classify_lowercases() {
        assert_eq!(
            classify("  Weather Tokyo "),
            Recognition::Text("weather tokyo".to_string())
        );
    }
}
