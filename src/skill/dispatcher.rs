use super::handlers::{control, error, launch, playback, player_events, Turn};
use super::route::Route;
use crate::alexa::{Request, RequestEnvelope, ResponseEnvelope, ResponsePayload};
use crate::mediaserver::{MediaServer, MediaServerConnector};
use crate::session::{Credentials, ServerDefaults, SessionState};
use anyhow::{anyhow, Context, Result};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info};

/// Routes each request to exactly one handler
///
/// Holds only startup configuration; all per-conversation state comes in
/// with the request and goes back out in the response envelope.
pub struct Dispatcher {
    defaults: ServerDefaults,
    connector: Arc<dyn MediaServerConnector>,
    debug: bool,
}

impl Dispatcher {
    pub fn new(defaults: ServerDefaults, connector: Arc<dyn MediaServerConnector>) -> Self {
        Self {
            defaults,
            connector,
            debug: false,
        }
    }

    /// Read unhandled intent names back to the user
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Handle one webhook call end to end
    pub async fn dispatch(&self, envelope: RequestEnvelope) -> ResponseEnvelope {
        if let Ok(json) = serde_json::to_string(&envelope) {
            debug!("Request envelope: {}", json);
        }

        let mut session = envelope.session_state();
        let response = self.handle(&envelope.request, &mut session).await;

        // Sessionless requests (player events) get no attributes back
        let session = envelope.session.is_some().then_some(session);
        let reply = ResponseEnvelope::new(response, session);

        if let Ok(json) = serde_json::to_string(&reply) {
            debug!("Response envelope: {}", json);
        }

        reply
    }

    /// Run the matching handler against `session`
    ///
    /// Never fails: handler errors and panics are answered by the error handler.
    pub async fn handle(&self, request: &Request, session: &mut SessionState) -> ResponsePayload {
        let route = Route::classify(request);
        info!("{} -> {}", request.request_type(), route.name());

        let outcome = AssertUnwindSafe(self.run(route, request, session))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(anyhow!(
                    "{} handler panicked: {}",
                    route.name(),
                    panic_message(payload.as_ref())
                ))
            });

        match outcome {
            Ok(response) => response,
            Err(e) => error::handle_error(&e),
        }
    }

    async fn run(
        &self,
        route: Route<'_>,
        request: &Request,
        session: &mut SessionState,
    ) -> Result<ResponsePayload> {
        let server = if route.needs_server() {
            self.connect(session)?
        } else {
            None
        };

        let mut turn = Turn {
            session,
            server,
            debug: self.debug,
        };

        match route {
            Route::Launch => launch::launch(&turn),
            Route::ContinueBook => playback::continue_book(&mut turn).await,
            Route::PlayBook { book_name } => playback::play_book(&mut turn, book_name).await,
            Route::Help => control::help(),
            Route::Pause => control::pause(),
            Route::Resume => control::resume(&turn),
            Route::StopOrCancel => control::stop_or_cancel(),
            Route::Fallback => control::fallback(),
            Route::PlaybackStarted(event) => player_events::started(&mut turn, event),
            Route::PlaybackFinished(event) => player_events::finished(&mut turn, event).await,
            Route::PlaybackStopped(event) => player_events::stopped(&mut turn, event).await,
            Route::PlaybackNearlyFinished(event) => player_events::nearly_finished(event),
            Route::PlaybackFailed(req) => player_events::failed(req),
            Route::SessionEnded(req) => control::session_ended(req),
            Route::UnhandledIntent(name) => control::unhandled_intent(&turn, name),
            Route::Unhandled => control::unhandled(request.request_type()),
        }
    }

    /// Media server for this turn, `None` when not configured
    fn connect(&self, session: &SessionState) -> Result<Option<Arc<dyn MediaServer>>> {
        let Some(credentials) = Credentials::resolve(session, &self.defaults) else {
            debug!("No media server credentials for this turn");
            return Ok(None);
        };

        let server = self
            .connector
            .connect(&credentials)
            .with_context(|| {
                format!(
                    "Failed to open media server client for {}",
                    credentials.base_url
                )
            })?;

        Ok(Some(server))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
