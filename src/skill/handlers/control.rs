use super::{not_configured, Turn};
use crate::alexa::{Directive, ResponseBuilder, ResponsePayload, SessionEndedRequest, Track};
use crate::skill::messages;
use anyhow::Result;
use tracing::{info, warn};

/// Halt the player without speaking
pub fn pause() -> Result<ResponsePayload> {
    Ok(ResponseBuilder::new()
        .add_directive(Directive::stop())
        .build())
}

/// Restart the remembered item at the remembered offset
pub fn resume(turn: &Turn<'_>) -> Result<ResponsePayload> {
    let Some(server) = turn.server.as_ref() else {
        return Ok(not_configured());
    };

    let Some(item_id) = turn.session.current_item() else {
        return Ok(ResponseBuilder::new()
            .speak(messages::NOTHING_TO_RESUME)
            .reprompt(messages::HELP)
            .build());
    };

    let offset_ms = turn.session.offset();
    info!("Resuming {} at {}ms", item_id, offset_ms);

    Ok(ResponseBuilder::new()
        .speak(messages::RESUMING)
        .add_directive(Directive::play(Track {
            url: server.stream_url(item_id),
            token: item_id.to_string(),
            offset_ms,
            ..Default::default()
        }))
        .build())
}

pub fn stop_or_cancel() -> Result<ResponsePayload> {
    Ok(ResponseBuilder::new()
        .speak(messages::GOODBYE)
        .add_directive(Directive::stop())
        .with_should_end_session(true)
        .build())
}

pub fn help() -> Result<ResponsePayload> {
    Ok(ResponseBuilder::new()
        .speak(messages::HELP)
        .reprompt(messages::HELP)
        .build())
}

pub fn fallback() -> Result<ResponsePayload> {
    Ok(ResponseBuilder::new()
        .speak(messages::FALLBACK)
        .reprompt(messages::HELP)
        .build())
}

/// Intent with no registered handler
///
/// In debug mode the intent name is read back to the user.
pub fn unhandled_intent(turn: &Turn<'_>, intent_name: &str) -> Result<ResponsePayload> {
    warn!("No handler for intent {}", intent_name);

    if turn.debug {
        return Ok(ResponseBuilder::new()
            .speak(messages::intent_reflection(intent_name))
            .build());
    }

    fallback()
}

/// Request type with no registered handler
pub fn unhandled(request_type: &str) -> Result<ResponsePayload> {
    warn!("Ignoring unsupported request type {}", request_type);
    Ok(ResponsePayload::empty())
}

pub fn session_ended(request: &SessionEndedRequest) -> Result<ResponsePayload> {
    info!("Session ended: {}", request.reason);

    if let Some(error) = &request.error {
        warn!("Session ended with error {}: {}", error.kind, error.message);
    }

    Ok(ResponsePayload::empty())
}
