//! Offline speech recognition via Vosk (fallback tier)

use std::path::{Path, PathBuf};

use vosk::{DecodingState, Model, Recognizer};

use super::FallbackTranscriber;
use crate::audio::CaptureArtifact;
use crate::state::Language;
use crate::{Error, Result};

/// Model directory naming scheme used by the Vosk small-model distribution
const MODEL_VERSION: &str = "0.4";

/// Decodes speech with a pre-provisioned language-specific Vosk model
pub struct LocalRecognizer {
    model_dir: PathBuf,
}

impl LocalRecognizer {
    /// Create a recognizer rooted at the model directory
    #[must_use]
    pub fn new(model_dir: PathBuf) -> Self {
        Self { model_dir }
    }

    /// Expected model path for a language,
    /// e.g. `<model_dir>/vosk-model-small-en-0.4`
    #[must_use]
    pub fn model_path(&self, language: Language) -> PathBuf {
        self.model_dir
            .join(format!("vosk-model-small-{}-{MODEL_VERSION}", language.code()))
    }

    /// Decode the captured utterance with the model for `language`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelMissing`] if the model directory is absent (a
    /// fatal configuration error: no offline recognition is possible), or
    /// [`Error::Stt`] on decode failure (recoverable, the turn is skipped)
    pub fn transcribe(&self, artifact: &CaptureArtifact, language: Language) -> Result<String> {
        let model_path = self.model_path(language);
        if !model_path.exists() {
            return Err(Error::ModelMissing(model_path));
        }

        tracing::info!(path = %model_path.display(), %language, "offline transcription");

        let (frames, sample_rate) = artifact.read_frames()?;
        if frames.is_empty() {
            return Ok(String::new());
        }

        let model = load_model(&model_path)?;
        #[allow(clippy::cast_precision_loss)]
        let mut recognizer = Recognizer::new(&model, sample_rate as f32)
            .ok_or_else(|| Error::Stt("failed to create offline recognizer".to_string()))?;

        let state = recognizer
            .accept_waveform(&frames)
            .map_err(|e| Error::Stt(format!("offline decoding rejected waveform: {e}")))?;
        match state {
            DecodingState::Finalized | DecodingState::Running => {}
            DecodingState::Failed => {
                return Err(Error::Stt("offline decoding failed".to_string()));
            }
        }

        let text = recognizer
            .final_result()
            .single()
            .map(|r| r.text.trim().to_string())
            .unwrap_or_default();

        tracing::debug!(transcript = %text, "offline transcription complete");
        Ok(text)
    }
}

impl FallbackTranscriber for LocalRecognizer {
    fn transcribe(&self, artifact: &CaptureArtifact, language: Language) -> Result<String> {
        Self::transcribe(self, artifact, language)
    }
}

/// Load the Vosk model from disk
fn load_model(path: &Path) -> Result<Model> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::Stt("model path is not valid UTF-8".to_string()))?;
    Model::new(path_str).ok_or_else(|| Error::Stt(format!("failed to load model at {path_str}")))
}
