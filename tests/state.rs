//! Assistant state integration tests
//!
//! The language triple (speech language, recognition tag, voice) must stay
//! consistent through persistent switches, scoped switches, and error exits.

use aria_assistant::{AssistantState, Error, Language, Result, Sex};

#[test]
fn language_triple_updates_together() {
    let mut state = AssistantState::new("Aria", Sex::Female, Language::En);
    assert_eq!(state.speech_language(), Language::En);
    assert_eq!(state.recognition_language(), "en-US");
    assert_eq!(state.voice_id(), "nova");

    state.set_language(Language::Ru);
    assert_eq!(state.speech_language(), Language::Ru);
    assert_eq!(state.recognition_language(), "ru-RU");
    assert_eq!(state.voice_id(), "shimmer");
}

#[test]
fn persistent_toggle_survives_turns() {
    let mut state = AssistantState::new("Aria", Sex::Female, Language::En);

    state.set_language(state.speech_language().toggled());
    assert_eq!(state.speech_language(), Language::Ru);

    // A later turn sees the switched language until it is toggled back
    assert_eq!(state.recognition_language(), "ru-RU");
    state.set_language(state.speech_language().toggled());
    assert_eq!(state.speech_language(), Language::En);
}

#[test]
fn scoped_switch_restores_on_normal_exit() {
    let mut state = AssistantState::new("Aria", Sex::Male, Language::En);

    {
        let guard = state.scoped(Language::Ru);
        assert_eq!(guard.voice_id(), "echo");
    }

    assert_eq!(state.speech_language(), Language::En);
    assert_eq!(state.recognition_language(), "en-US");
    assert_eq!(state.voice_id(), "onyx");
}

#[test]
fn scoped_switch_restores_on_error_exit() {
    fn speak_translation(state: &mut AssistantState) -> Result<()> {
        let _guard = state.scoped(Language::Ru);
        // Playback fails mid-translation
        Err(Error::Tts("device vanished".to_string()))
    }

    let mut state = AssistantState::new("Aria", Sex::Female, Language::En);
    assert!(speak_translation(&mut state).is_err());

    // The failed turn must not leave the assistant speaking Russian
    assert_eq!(state.speech_language(), Language::En);
    assert_eq!(state.recognition_language(), "en-US");
    assert_eq!(state.voice_id(), "nova");
}

#[test]
fn snapshot_restore_round_trip() {
    let mut state = AssistantState::new("Aria", Sex::Female, Language::Ru);
    let saved = state.snapshot();

    state.set_language(Language::En);
    assert_eq!(state.voice_id(), "nova");

    state.restore(saved);
    assert_eq!(state.speech_language(), Language::Ru);
    assert_eq!(state.voice_id(), "shimmer");
}
