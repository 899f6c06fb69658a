//! Assistant configuration
//!
//! Layered resolution, highest priority first:
//! 1. Environment variables (`OPENAI_API_KEY`, `WEATHER_API_KEY`, `ARIA_*`)
//! 2. `~/.config/aria/config.toml`
//! 3. Built-in defaults
//!
//! The OpenAI key is the only required value.

mod file;

pub use file::config_file_path;

use std::env;
use std::path::PathBuf;

use crate::state::{Language, OwnerProfile, Sex};
use crate::{Error, Result};

/// Mutable assistant profile settings
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    /// The assistant's name
    pub name: String,
    /// Voice gender
    pub sex: Sex,
    /// Initial speech language
    pub speech_language: Language,
}

/// Speech recognition settings
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// Model name for the networked transcription tier
    pub stt_model: String,
    /// Directory holding offline Vosk models
    pub model_dir: PathBuf,
}

/// Speech synthesis settings
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// TTS model name
    pub tts_model: String,
    /// Playback speed multiplier
    pub tts_speed: f32,
}

/// API credentials
#[derive(Debug, Clone)]
pub struct ApiKeys {
    /// OpenAI key, used for both transcription and synthesis
    pub openai: String,
    /// OpenWeatherMap key; weather reports fail politely without it
    pub weather: Option<String>,
}

/// Resolved assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: OwnerProfile,
    pub assistant: AssistantSettings,
    pub recognition: RecognitionConfig,
    pub voice: VoiceConfig,
    pub api_keys: ApiKeys,
}

impl Config {
    /// Resolve configuration from the environment, the config file, and
    /// defaults
    ///
    /// # Errors
    ///
    /// Returns error if the OpenAI API key is missing from every layer, or
    /// if a language or sex value fails to parse
    pub fn load() -> Result<Self> {
        let file = file::load_config_file();

        let openai = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or(file.api_keys.openai)
            .ok_or_else(|| {
                Error::Config(
                    "OPENAI_API_KEY not set (environment or [api_keys] in config.toml)"
                        .to_string(),
                )
            })?;

        let weather = env::var("WEATHER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or(file.api_keys.weather);

        let owner = OwnerProfile {
            name: env::var("ARIA_OWNER_NAME")
                .ok()
                .or(file.owner.name)
                .unwrap_or_else(|| "Tanya".to_string()),
            home_city: env::var("ARIA_HOME_CITY")
                .ok()
                .or(file.owner.home_city)
                .unwrap_or_else(|| "Yekaterinburg".to_string()),
            native_language: parse_or(file.owner.native_language.as_deref(), Language::Ru)?,
            target_language: parse_or(file.owner.target_language.as_deref(), Language::En)?,
        };

        let assistant = AssistantSettings {
            name: env::var("ARIA_NAME")
                .ok()
                .or(file.assistant.name)
                .unwrap_or_else(|| "Aria".to_string()),
            sex: parse_or(file.assistant.sex.as_deref(), Sex::Female)?,
            speech_language: parse_or(file.assistant.speech_language.as_deref(), Language::En)?,
        };

        let recognition = RecognitionConfig {
            stt_model: env::var("ARIA_STT_MODEL")
                .ok()
                .or(file.recognition.stt_model)
                .unwrap_or_else(|| "whisper-1".to_string()),
            model_dir: env::var("ARIA_MODEL_DIR")
                .ok()
                .map(PathBuf::from)
                .or(file.recognition.model_dir)
                .unwrap_or_else(default_model_dir),
        };

        let voice = VoiceConfig {
            tts_model: env::var("ARIA_TTS_MODEL")
                .ok()
                .or(file.voice.tts_model)
                .unwrap_or_else(|| "tts-1".to_string()),
            tts_speed: file.voice.tts_speed.unwrap_or(1.0),
        };

        tracing::debug!(
            owner = %owner.name,
            assistant = %assistant.name,
            speech_language = %assistant.speech_language,
            model_dir = %recognition.model_dir.display(),
            weather_key = weather.is_some(),
            "configuration resolved"
        );

        Ok(Self {
            owner,
            assistant,
            recognition,
            voice,
            api_keys: ApiKeys { openai, weather },
        })
    }
}

/// Parse an optional string setting, falling back to a default
fn parse_or<T: std::str::FromStr<Err = Error>>(value: Option<&str>, default: T) -> Result<T> {
    value.map_or(Ok(default), str::parse)
}

/// Default location for offline models: `<data dir>/aria/models`
fn default_model_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("models"),
        |dirs| dirs.data_dir().join("aria").join("models"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_absent() {
        assert_eq!(parse_or(None, Language::Ru).unwrap(), Language::Ru);
    }

    #[test]
    fn test_parse_or_parses_when_present() {
        assert_eq!(parse_or(Some("en"), Language::Ru).unwrap(), Language::En);
        assert!(parse_or(Some("de"), Language::Ru).is_err());
    }
}
