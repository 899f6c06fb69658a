//! Assistant and owner state
//!
//! Holds the mutable language configuration that feeds back into speech
//! recognition and synthesis. The recognition tag and voice id are always
//! derived together with the speech language, so no caller can observe a
//! partially updated profile.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Supported speech languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// English
    En,
    /// Russian
    Ru,
}

impl Language {
    /// Short ISO 639-1 code, used for API language tags and model paths
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// BCP 47 recognition tag for the networked recognizer
    #[must_use]
    pub const fn recognition_tag(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Ru => "ru-RU",
        }
    }

    /// The other supported language
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ru,
            Self::Ru => Self::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "en" | "en-us" => Ok(Self::En),
            "ru" | "ru-ru" => Ok(Self::Ru),
            other => Err(Error::Config(format!("unsupported language: {other}"))),
        }
    }
}

/// Voice gender, used for voice selection only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(Error::Config(format!("unsupported sex: {other}"))),
        }
    }
}

/// Synthesis voice for a language and gender combination
const fn voice_for(language: Language, sex: Sex) -> &'static str {
    match (language, sex) {
        (Language::En, Sex::Female) => "nova",
        (Language::En, Sex::Male) => "onyx",
        (Language::Ru, Sex::Female) => "shimmer",
        (Language::Ru, Sex::Male) => "echo",
    }
}

/// Information about the assistant's owner
///
/// Immutable after startup; read by handlers, never mutated by the core.
#[derive(Debug, Clone)]
pub struct OwnerProfile {
    /// Owner's name, used in greetings and farewells
    pub name: String,

    /// Default city for weather lookups
    pub home_city: String,

    /// The owner's native language
    pub native_language: Language,

    /// The language the owner is studying (translation target)
    pub target_language: Language,
}

/// Mutable assistant profile
///
/// `recognition_language` and `voice_id` are derived from `speech_language`
/// and can only change through [`AssistantState::set_language`].
#[derive(Debug, Clone)]
pub struct AssistantState {
    name: String,
    sex: Sex,
    speech_language: Language,
    recognition_language: &'static str,
    voice_id: &'static str,
}

/// Saved language selection, restorable via [`AssistantState::restore`]
#[derive(Debug, Clone, Copy)]
pub struct LanguageSnapshot {
    speech_language: Language,
}

impl AssistantState {
    /// Create the assistant profile with an initial speech language
    #[must_use]
    pub fn new(name: impl Into<String>, sex: Sex, speech_language: Language) -> Self {
        Self {
            name: name.into(),
            sex,
            speech_language,
            recognition_language: speech_language.recognition_tag(),
            voice_id: voice_for(speech_language, sex),
        }
    }

    /// Assistant's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current speech language
    #[must_use]
    pub const fn speech_language(&self) -> Language {
        self.speech_language
    }

    /// Recognition tag consistent with the current speech language
    #[must_use]
    pub const fn recognition_language(&self) -> &'static str {
        self.recognition_language
    }

    /// Synthesis voice consistent with the current speech language
    #[must_use]
    pub const fn voice_id(&self) -> &'static str {
        self.voice_id
    }

    /// Switch the speech language, recomputing the recognition tag and
    /// voice id in the same call
    pub fn set_language(&mut self, language: Language) {
        self.speech_language = language;
        self.recognition_language = language.recognition_tag();
        self.voice_id = voice_for(language, self.sex);
    }

    /// Capture the current language selection
    #[must_use]
    pub const fn snapshot(&self) -> LanguageSnapshot {
        LanguageSnapshot {
            speech_language: self.speech_language,
        }
    }

    /// Restore a previously captured language selection
    pub fn restore(&mut self, snapshot: LanguageSnapshot) {
        self.set_language(snapshot.speech_language);
    }

    /// Temporarily switch to `language`, restoring the prior selection when
    /// the returned guard is dropped — on every exit path of the caller
    pub fn scoped(&mut self, language: Language) -> LanguageGuard<'_> {
        let saved = self.snapshot();
        self.set_language(language);
        LanguageGuard { state: self, saved }
    }
}

/// Scoped language mutation: restores the saved selection on drop
pub struct LanguageGuard<'a> {
    state: &'a mut AssistantState,
    saved: LanguageSnapshot,
}

impl LanguageGuard<'_> {
    /// Voice for the temporarily selected language
    #[must_use]
    pub const fn voice_id(&self) -> &'static str {
        self.state.voice_id()
    }
}

impl Drop for LanguageGuard<'_> {
    fn drop(&mut self) {
        self.state.restore(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("RU".parse::<Language>().unwrap(), Language::Ru);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_set_language_is_atomic() {
        let mut state = AssistantState::new("Aria", Sex::Female, Language::En);
        assert_eq!(state.recognition_language(), "en-US");
        assert_eq!(state.voice_id(), "nova");

        state.set_language(Language::Ru);
        assert_eq!(state.speech_language(), Language::Ru);
        assert_eq!(state.recognition_language(), "ru-RU");
        assert_eq!(state.voice_id(), "shimmer");
    }

    #[test]
    fn test_voice_follows_sex() {
        let state = AssistantState::new("Aria", Sex::Male, Language::En);
        assert_eq!(state.voice_id(), "onyx");
    }

    #[test]
    fn test_scoped_guard_restores() {
        let mut state = AssistantState::new("Aria", Sex::Female, Language::En);
        {
            let guard = state.scoped(Language::Ru);
            assert_eq!(guard.voice_id(), "shimmer");
        }
        assert_eq!(state.speech_language(), Language::En);
        assert_eq!(state.recognition_language(), "en-US");
        assert_eq!(state.voice_id(), "nova");
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Language::En.toggled(), Language::Ru);
        assert_eq!(Language::Ru.toggled(), Language::En);
    }
}
