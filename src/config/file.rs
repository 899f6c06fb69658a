//! TOML configuration file support
//!
//! Loads `~/.config/aria/config.toml`. Every field is optional; values
//! layer under environment variables and over built-in defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Root of the configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AriaConfigFile {
    pub owner: OwnerSection,
    pub assistant: AssistantSection,
    pub voice: VoiceSection,
    pub recognition: RecognitionSection,
    pub api_keys: ApiKeySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OwnerSection {
    pub name: Option<String>,
    pub home_city: Option<String>,
    pub native_language: Option<String>,
    pub target_language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssistantSection {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub speech_language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VoiceSection {
    pub tts_model: Option<String>,
    pub tts_speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecognitionSection {
    pub stt_model: Option<String>,
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiKeySection {
    pub openai: Option<String>,
    pub weather: Option<String>,
}

/// Path to the configuration file, if a home directory can be resolved
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("aria").join("config.toml"))
}

/// Load the configuration file, tolerating its absence
///
/// A missing file yields defaults; a malformed file is logged and treated
/// the same, so a typo in the TOML never bricks the assistant.
pub fn load_config_file() -> AriaConfigFile {
    let Some(path) = config_file_path() else {
        tracing::debug!("no home directory, skipping config file");
        return AriaConfigFile::default();
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file found, using defaults");
        return AriaConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config file is malformed, using defaults");
                AriaConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read config file, using defaults");
            AriaConfigFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_parses() {
        let config: AriaConfigFile = toml::from_str("").unwrap();
        assert!(config.owner.name.is_none());
        assert!(config.api_keys.openai.is_none());
    }

    #[test]
    fn test_partial_toml_parses() {
        let config: AriaConfigFile = toml::from_str(
            r#"
            [owner]
            name = "Tanya"
            home_city = "Yekaterinburg"

            [voice]
            tts_speed = 1.2
            "#,
        )
        .unwrap();

        assert_eq!(config.owner.name.as_deref(), Some("Tanya"));
        assert_eq!(config.owner.home_city.as_deref(), Some("Yekaterinburg"));
        assert_eq!(config.voice.tts_speed, Some(1.2));
        assert!(config.assistant.name.is_none());
    }

    #[test]
    fn test_unknown_language_string_is_kept_verbatim() {
        // Validation happens at Config::load, not here
        let config: AriaConfigFile = toml::from_str(
            r#"
            [owner]
            native_language = "de"
            "#,
        )
        .unwrap();
        assert_eq!(config.owner.native_language.as_deref(), Some("de"));
    }
}
