//! One handler per request kind
//!
//! Every handler takes the current [`Turn`] and returns the response payload.
//! Handlers that call the media server for reads convert failures into the
//! scripted apology themselves; anything they return as `Err` is answered by
//! [`error::handle_error`].

pub mod control;
pub mod error;
pub mod launch;
pub mod playback;
pub mod player_events;

use super::messages;
use crate::alexa::{ResponseBuilder, ResponsePayload};
use crate::mediaserver::MediaServer;
use crate::session::SessionState;
use std::sync::Arc;

/// Everything a handler may touch during one request
pub struct Turn<'a> {
    pub session: &'a mut SessionState,
    /// `None` when no credentials resolve
    pub server: Option<Arc<dyn MediaServer>>,
    pub debug: bool,
}

/// Account-linking prompt for turns without credentials
pub(crate) fn not_configured() -> ResponsePayload {
    ResponseBuilder::new()
        .speak(messages::NOT_CONFIGURED)
        .with_link_account_card()
        .build()
}

/// Generic apology with the help reprompt
pub(crate) fn apology() -> ResponsePayload {
    ResponseBuilder::new()
        .speak(messages::ERROR)
        .reprompt(messages::HELP)
        .build()
}
