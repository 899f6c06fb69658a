//! Greeting and farewell handlers

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{ActionHandler, Flow, HandlerContext};
use crate::Result;

/// Pick one phrase at random
fn pick(phrases: &[String]) -> &str {
    phrases
        .choose(&mut rand::thread_rng())
        .map_or("", String::as_str)
}

/// Greets the owner by name
pub struct GreetingHandler;

#[async_trait(?Send)]
impl ActionHandler for GreetingHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, _args: &[String]) -> Result<Flow> {
        let owner = &ctx.owner.name;
        let phrases = [
            format!("Hello, {owner}! How can I help you today?"),
            format!("Good day to you, {owner}! How can I help you?"),
            format!("Hi, {owner}! I'm listening."),
        ];

        ctx.speech.say(pick(&phrases), ctx.state.voice_id()).await?;
        Ok(Flow::Continue)
    }
}

/// Says goodbye and shuts the assistant down
pub struct FarewellHandler;

#[async_trait(?Send)]
impl ActionHandler for FarewellHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, _args: &[String]) -> Result<Flow> {
        let owner = &ctx.owner.name;
        let phrases = [
            format!("Goodbye, {owner}! Have a nice day!"),
            format!("See you soon, {owner}!"),
            format!("Bye, {owner}! Come back if you need me."),
        ];

        ctx.speech.say(pick(&phrases), ctx.state.voice_id()).await?;

        tracing::info!("farewell received, shutting down");
        Ok(Flow::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_returns_a_member() {
        let phrases = vec!["a".to_string(), "b".to_string()];
        let chosen = pick(&phrases);
        assert!(chosen == "a" || chosen == "b");
    }

    #[test]
    fn test_pick_empty_is_empty() {
        assert_eq!(pick(&[]), "");
    }
}
