use super::{not_configured, Turn};
use crate::alexa::{ResponseBuilder, ResponsePayload};
use crate::skill::messages;
use anyhow::Result;

/// Skill opened without an intent
pub fn launch(turn: &Turn<'_>) -> Result<ResponsePayload> {
    if turn.server.is_none() {
        return Ok(not_configured());
    }

    Ok(ResponseBuilder::new()
        .speak(messages::WELCOME)
        .reprompt(messages::HELP)
        .build())
}
