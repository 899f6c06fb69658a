//! Networked speech recognition (primary tier)

use async_trait::async_trait;

use super::PrimaryTranscriber;
use crate::state::Language;
use crate::{Error, Result};

/// Response from the transcription API
#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcribes speech via an OpenAI-compatible transcription endpoint
pub struct PrimaryRecognizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl PrimaryRecognizer {
    /// Create a new networked recognizer
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for transcription".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }

    /// Transcribe WAV audio with the requested language tag
    ///
    /// An empty transcript is a valid outcome (no confident speech); any
    /// transport or API failure is reported as [`Error::Stt`] so the engine
    /// can fall back to the offline tier.
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable or rejects the request
    pub async fn transcribe(&self, audio: Vec<u8>, language: Language) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), %language, "starting networked transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio)
                    .file_name("audio.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Stt(e.to_string()))?,
            )
            .text("model", self.model.clone())
            .text("language", language.code());

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/transcriptions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Stt(format!("transcription request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Stt(format!("transcription API error {status}: {body}")));
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::Stt(format!("failed to parse transcription response: {e}")))?;

        tracing::debug!(transcript = %result.text, "networked transcription complete");
        Ok(result.text)
    }
}

#[async_trait(?Send)]
impl PrimaryTranscriber for PrimaryRecognizer {
    async fn transcribe(&self, audio: Vec<u8>, language: Language) -> Result<String> {
        Self::transcribe(self, audio, language).await
    }
}
