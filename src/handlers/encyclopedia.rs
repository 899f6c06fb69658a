//! Encyclopedia lookup handler
//!
//! Queries the Wikipedia REST summary endpoint in the current speech
//! language. A missing article falls through to a web search so the owner
//! still gets an answer.

use async_trait::async_trait;

use super::{joined, ActionHandler, Flow, HandlerContext};
use crate::{Error, Result};

/// Summary payload from the Wikipedia REST API
#[derive(serde::Deserialize)]
struct PageSummary {
    title: String,
    extract: String,
    content_urls: ContentUrls,
}

#[derive(serde::Deserialize)]
struct ContentUrls {
    desktop: DesktopUrls,
}

#[derive(serde::Deserialize)]
struct DesktopUrls {
    page: String,
}

/// Summary endpoint for a term in a language edition
fn summary_url(language_code: &str, term: &str) -> String {
    format!(
        "https://{language_code}.wikipedia.org/api/rest_v1/page/summary/{}",
        urlencoding::encode(term)
    )
}

/// First `count` sentences of an extract, kept short enough to speak
fn leading_sentences(text: &str, count: usize) -> String {
    let mut result = String::new();
    let mut seen = 0;

    for (i, c) in text.char_indices() {
        if c == '.' || c == '!' || c == '?' {
            seen += 1;
            if seen == count {
                result.push_str(&text[..=i]);
                break;
            }
        }
    }

    if result.is_empty() {
        text.to_string()
    } else {
        result
    }
}

/// Looks a term up on Wikipedia and reads the summary aloud
pub struct EncyclopediaHandler;

#[async_trait(?Send)]
impl ActionHandler for EncyclopediaHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, args: &[String]) -> Result<Flow> {
        let Some(term) = joined(args) else {
            tracing::debug!("encyclopedia lookup without a term, nothing to do");
            return Ok(Flow::Continue);
        };

        let language_code = ctx.state.speech_language().code();
        let voice = ctx.state.voice_id();

        tracing::info!(%term, language = language_code, "encyclopedia lookup");

        let response = ctx
            .http
            .get(summary_url(language_code, &term))
            .send()
            .await
            .map_err(|e| Error::Handler(format!("wikipedia request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(%term, "no wikipedia article, falling back to web search");
            ctx.speech
                .say(
                    &format!("Can't find {term} on Wikipedia. But here is what I found on google"),
                    voice,
                )
                .await?;
            open::that(format!(
                "https://google.com/search?q={}",
                urlencoding::encode(&term)
            ))
            .map_err(|e| Error::Handler(format!("failed to open browser: {e}")))?;
            return Ok(Flow::Continue);
        }

        if !response.status().is_success() {
            return Err(Error::Handler(format!(
                "wikipedia API error {}",
                response.status()
            )));
        }

        let summary: PageSummary = response
            .json()
            .await
            .map_err(|e| Error::Handler(format!("failed to parse wikipedia response: {e}")))?;

        open::that(&summary.content_urls.desktop.page)
            .map_err(|e| Error::Handler(format!("failed to open browser: {e}")))?;

        ctx.speech
            .say(
                &format!("Here is what I found for {} on Wikipedia", summary.title),
                voice,
            )
            .await?;
        ctx.speech
            .say(&leading_sentences(&summary.extract, 2), voice)
            .await?;

        Ok(Flow::Continue)
    }
}
