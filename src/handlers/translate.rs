//! Translation handler
//!
//! Translates between the owner's native and target languages via the
//! MyMemory API. The announcement is spoken in the current language; the
//! translation itself is spoken under a scoped language switch that restores
//! the prior selection on every exit path, including errors.

use async_trait::async_trait;

use super::{joined, ActionHandler, Flow, HandlerContext};
use crate::state::Language;
use crate::{Error, Result};

/// MyMemory response envelope
#[derive(serde::Deserialize)]
struct TranslationResponse {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
}

#[derive(serde::Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Pick source and target for this turn
///
/// Speaking the native language asks for the target language, and vice
/// versa: the direction always crosses between the owner's two languages.
fn direction(current: Language, native: Language, target: Language) -> (Language, Language) {
    if current == native {
        (native, target)
    } else {
        (target, native)
    }
}

/// Announcement spoken before the translation, in the current voice
fn announcement(term: &str, target: Language) -> String {
    match target {
        Language::Ru => format!("The translation for {term} in Russian is"),
        Language::En => format!("По-английски {term} будет как"),
    }
}

/// Translates the spoken phrase and reads the result in the target voice
pub struct TranslateHandler;

impl TranslateHandler {
    /// Fetch a translation from MyMemory
    async fn translate_remote(
        http: &reqwest::Client,
        term: &str,
        source: Language,
        target: Language,
    ) -> Result<String> {
        let response = http
            .get("https://api.mymemory.translated.net/get")
            .query(&[
                ("q", term),
                ("langpair", &format!("{}|{}", source.code(), target.code())),
            ])
            .send()
            .await
            .map_err(|e| Error::Handler(format!("translation request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Handler(format!(
                "translation API error {}",
                response.status()
            )));
        }

        let result: TranslationResponse = response
            .json()
            .await
            .map_err(|e| Error::Handler(format!("failed to parse translation response: {e}")))?;

        Ok(result.response_data.translated_text)
    }
}

#[async_trait(?Send)]
impl ActionHandler for TranslateHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, args: &[String]) -> Result<Flow> {
        let Some(term) = joined(args) else {
            tracing::debug!("translation without a phrase, nothing to do");
            return Ok(Flow::Continue);
        };

        let (source, target) = direction(
            ctx.state.speech_language(),
            ctx.owner.native_language,
            ctx.owner.target_language,
        );

        tracing::info!(%term, %source, %target, "translating");

        let translated = Self::translate_remote(ctx.http, &term, source, target).await?;

        ctx.speech
            .say(&announcement(&term, target), ctx.state.voice_id())
            .await?;

        // The switch must not outlive this turn, even if playback fails
        {
            let guard = ctx.state.scoped(target);
            let voice = guard.voice_id();
            ctx.speech.say(&translated, voice).await?;
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_native() {
        // Speaking Russian (native) asks for English
        assert_eq!(
            direction(Language::Ru, Language::Ru, Language::En),
            (Language::Ru, Language::En)
        );
    }

    #[test]
    fn test_direction_from_target() {
        // Speaking English (target) asks for Russian
        assert_eq!(
            direction(Language::En, Language::Ru, Language::En),
            (Language::En, Language::Ru)
        );
    }

    #[test]
    fn test_announcement_matches_target_language() {
        assert!(announcement("cat", Language::Ru).contains("in Russian"));
        assert!(announcement("кот", Language::En).contains("По-английски"));
    }
}
