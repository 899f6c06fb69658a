//! Browser-backed search handlers

use async_trait::async_trait;

use super::{joined, ActionHandler, Flow, HandlerContext};
use crate::{Error, Result};

/// Google search results URL for a phrase
fn google_search_url(term: &str) -> String {
    format!("https://google.com/search?q={}", urlencoding::encode(term))
}

/// YouTube search results URL for a phrase
fn youtube_search_url(term: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(term)
    )
}

/// Open a URL in the system default browser
fn open_in_browser(url: &str) -> Result<()> {
    open::that(url).map_err(|e| Error::Handler(format!("failed to open browser: {e}")))
}

/// Opens a web search for the spoken phrase
pub struct WebSearchHandler;

#[async_trait(?Send)]
impl ActionHandler for WebSearchHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, args: &[String]) -> Result<Flow> {
        let Some(term) = joined(args) else {
            tracing::debug!("web search without a phrase, nothing to do");
            return Ok(Flow::Continue);
        };

        tracing::info!(%term, "opening web search");
        open_in_browser(&google_search_url(&term))?;

        ctx.speech
            .say(
                &format!("Here is what I found for {term} on google"),
                ctx.state.voice_id(),
            )
            .await?;

        Ok(Flow::Continue)
    }
}

/// Opens a video search for the spoken phrase
pub struct VideoSearchHandler;

#[async_trait(?Send)]
impl ActionHandler for VideoSearchHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, args: &[String]) -> Result<Flow> {
        let Some(term) = joined(args) else {
            tracing::debug!("video search without a phrase, nothing to do");
            return Ok(Flow::Continue);
        };

        tracing::info!(%term, "opening video search");
        open_in_browser(&youtube_search_url(&term))?;

        ctx.speech
            .say(
                &format!("Here is what I found for {term} on youtube"),
                ctx.state.voice_id(),
            )
            .await?;

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_url_is_encoded() {
        assert_eq!(
            google_search_url("rust borrow checker"),
            "https://google.com/search?q=rust%20borrow%20checker"
        );
    }

    #[test]
    fn test_youtube_url_is_encoded() {
        assert_eq!(
            youtube_search_url("cat videos"),
            "https://www.youtube.com/results?search_query=cat%20videos"
        );
    }
}
