//! Events sent by the platform's own audio player

use super::Turn;
use crate::alexa::{PlaybackEvent, PlaybackFailedRequest, ResponsePayload};
use crate::mediaserver::MediaServer;
use anyhow::Result;
use tracing::{debug, error, info, warn};

pub fn started(turn: &mut Turn<'_>, event: &PlaybackEvent) -> Result<ResponsePayload> {
    info!(
        "Playback started: {} at {}ms",
        event.token, event.offset_in_milliseconds
    );

    turn.session
        .set_playing(&event.token, event.offset_in_milliseconds);

    Ok(ResponsePayload::empty())
}

pub async fn finished(turn: &mut Turn<'_>, event: &PlaybackEvent) -> Result<ResponsePayload> {
    info!("Playback finished: {}", event.token);

    sync_progress(turn.server.as_deref(), event).await;

    Ok(ResponsePayload::empty())
}

pub async fn stopped(turn: &mut Turn<'_>, event: &PlaybackEvent) -> Result<ResponsePayload> {
    info!(
        "Playback stopped: {} at {}ms",
        event.token, event.offset_in_milliseconds
    );

    turn.session.offset_milliseconds = Some(event.offset_in_milliseconds);
    sync_progress(turn.server.as_deref(), event).await;

    Ok(ResponsePayload::empty())
}

pub fn nearly_finished(event: &PlaybackEvent) -> Result<ResponsePayload> {
    // Next chapter/episode enqueueing would hook in here.
    debug!("Playback nearly finished: {}", event.token);
    Ok(ResponsePayload::empty())
}

/// Logged only; retrying is up to the platform
pub fn failed(request: &PlaybackFailedRequest) -> Result<ResponsePayload> {
    match &request.error {
        Some(err) => error!(
            "Playback failed for {}: {} ({})",
            request.token, err.message, err.kind
        ),
        None => error!("Playback failed for {}", request.token),
    }

    Ok(ResponsePayload::empty())
}

/// Best-effort write of the event offset to the media server
///
/// The event carries no track duration, so the elapsed position is sent as
/// both current time and duration.
async fn sync_progress(server: Option<&dyn MediaServer>, event: &PlaybackEvent) {
    let Some(server) = server else {
        debug!("Media server not configured, skipping progress sync");
        return;
    };

    if event.token.is_empty() {
        debug!("Playback event without token, skipping progress sync");
        return;
    }

    let offset_seconds = event.offset_in_milliseconds as f64 / 1000.0;

    match server
        .update_progress(&event.token, offset_seconds, offset_seconds)
        .await
    {
        Some(_) => info!("Progress saved for {} at {:.1}s", event.token, offset_seconds),
        None => warn!("Progress for {} was not saved", event.token),
    }
}
