//! Speech language toggle handler

use async_trait::async_trait;

use super::{ActionHandler, Flow, HandlerContext};
use crate::Result;

/// Toggles the assistant's speech language
///
/// The switch is persistent: it stays in effect for every following turn
/// until the command is spoken again.
pub struct SwitchLanguageHandler;

#[async_trait(?Send)]
impl ActionHandler for SwitchLanguageHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, _args: &[String]) -> Result<Flow> {
        let next = ctx.state.speech_language().toggled();
        ctx.state.set_language(next);

        tracing::info!(
            language = %next,
            recognition = ctx.state.recognition_language(),
            voice = ctx.state.voice_id(),
            "speech language switched"
        );

        Ok(Flow::Continue)
    }
}
