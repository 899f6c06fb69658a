//! Action handlers
//!
//! Each spoken command resolves to one handler behind the [`ActionHandler`]
//! trait. Handler failures are absorbed at dispatch: the assistant apologizes
//! out loud, logs the error, and the turn loop keeps running.

mod encyclopedia;
mod language;
mod search;
mod smalltalk;
mod translate;
mod weather;

pub use encyclopedia::EncyclopediaHandler;
pub use language::SwitchLanguageHandler;
pub use search::{VideoSearchHandler, WebSearchHandler};
pub use smalltalk::{FarewellHandler, GreetingHandler};
pub use translate::TranslateHandler;
pub use weather::WeatherHandler;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::ApiKeys;
use crate::router::Command;
use crate::speech::SpeechSink;
use crate::state::{AssistantState, OwnerProfile};
use crate::Result;

/// Spoken when a handler fails mid-turn
const TROUBLE_PHRASE: &str = "Seems like we have a trouble. See logs for more information";

/// What the turn loop should do after a command completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep listening
    Continue,
    /// Shut the assistant down
    Quit,
}

/// Everything a handler may touch during one command
///
/// Borrows are per-turn: no handler retains state between invocations.
pub struct HandlerContext<'a> {
    /// Owner profile, read-only
    pub owner: &'a OwnerProfile,
    /// Mutable assistant profile (language, voice)
    pub state: &'a mut AssistantState,
    /// The assistant's voice
    pub speech: &'a mut SpeechSink,
    /// Shared HTTP client for service-backed handlers
    pub http: &'a reqwest::Client,
    /// API credentials
    pub api_keys: &'a ApiKeys,
}

/// One action behind a spoken command
#[async_trait(?Send)]
pub trait ActionHandler {
    /// Execute the command with its spoken arguments
    ///
    /// # Errors
    ///
    /// Returns error when the action cannot complete; dispatch absorbs it
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, args: &[String]) -> Result<Flow>;
}

/// Command-to-handler dispatch table
pub struct HandlerRegistry {
    handlers: HashMap<Command, Box<dyn ActionHandler>>,
}

impl HandlerRegistry {
    /// Build the registry with the default handler per command
    #[must_use]
    pub fn defaults() -> Self {
        let mut handlers: HashMap<Command, Box<dyn ActionHandler>> = HashMap::new();

        handlers.insert(Command::Greeting, Box::new(GreetingHandler));
        handlers.insert(Command::Farewell, Box::new(FarewellHandler));
        handlers.insert(Command::WebSearch, Box::new(WebSearchHandler));
        handlers.insert(Command::VideoSearch, Box::new(VideoSearchHandler));
        handlers.insert(Command::Encyclopedia, Box::new(EncyclopediaHandler));
        handlers.insert(Command::Translate, Box::new(TranslateHandler));
        handlers.insert(Command::SwitchLanguage, Box::new(SwitchLanguageHandler));
        handlers.insert(Command::Weather, Box::new(WeatherHandler));

        Self { handlers }
    }

    /// Run the handler for `command`
    ///
    /// Handler errors never escape: they are logged, spoken as an apology,
    /// and resolved to [`Flow::Continue`] so one bad turn cannot take the
    /// assistant down.
    pub async fn dispatch(
        &self,
        command: Command,
        ctx: &mut HandlerContext<'_>,
        args: &[String],
    ) -> Flow {
        let Some(handler) = self.handlers.get(&command) else {
            tracing::warn!(?command, "no handler registered");
            return Flow::Continue;
        };

        match handler.invoke(ctx, args).await {
            Ok(flow) => flow,
            Err(e) => {
                tracing::error!(?command, error = %e, "handler failed");
                let voice = ctx.state.voice_id();
                if let Err(say_err) = ctx.speech.say(TROUBLE_PHRASE, voice).await {
                    tracing::error!(error = %say_err, "failed to speak error apology");
                }
                Flow::Continue
            }
        }
    }
}

/// Join spoken argument tokens into a single phrase
///
/// Returns `None` when the command carried no arguments, so handlers that
/// need a subject can no-op instead of querying for an empty string.
fn joined(args: &[String]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_empty_is_none() {
        assert_eq!(joined(&[]), None);
    }

    #[test]
    fn test_joined_preserves_order() {
        let args = vec!["rust".to_string(), "borrow".to_string(), "checker".to_string()];
        assert_eq!(joined(&args), Some("rust borrow checker".to_string()));
    }

    #[test]
    fn test_registry_covers_every_command() {
        let registry = HandlerRegistry::defaults();
        for command in [
            Command::Greeting,
            Command::Farewell,
            Command::WebSearch,
            Command::VideoSearch,
            Command::Encyclopedia,
            Command::Translate,
            Command::SwitchLanguage,
            Command::Weather,
        ] {
            assert!(registry.handlers.contains_key(&command), "{command:?}");
        }
    }
}
