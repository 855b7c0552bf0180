use super::{apology, not_configured, Turn};
use crate::alexa::{Directive, ResponseBuilder, ResponsePayload, Track};
use crate::mediaserver::{LibraryItem, MediaServer, DEFAULT_SEARCH_LIMIT};
use crate::session::SessionState;
use crate::skill::messages;
use anyhow::{Context, Result};
use tracing::{error, info};

/// Continue the most recently listened item
pub async fn continue_book(turn: &mut Turn<'_>) -> Result<ResponsePayload> {
    let Some(server) = turn.server.clone() else {
        return Ok(not_configured());
    };

    match continue_latest(server.as_ref(), turn.session).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Error continuing book: {:#}", e);
            Ok(apology())
        }
    }
}

/// Search the library for `book_name` and play the first book match
pub async fn play_book(turn: &mut Turn<'_>, book_name: Option<&str>) -> Result<ResponsePayload> {
    let Some(server) = turn.server.clone() else {
        return Ok(not_configured());
    };

    let Some(book_name) = book_name else {
        return Ok(ResponseBuilder::new()
            .speak(messages::ASK_BOOK_NAME)
            .reprompt(messages::ASK_BOOK_NAME_REPROMPT)
            .build());
    };

    match play_by_name(server.as_ref(), turn.session, book_name).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Error playing book '{}': {:#}", book_name, e);
            Ok(apology())
        }
    }
}

async fn continue_latest(
    server: &dyn MediaServer,
    session: &mut SessionState,
) -> Result<ResponsePayload> {
    let items = server
        .items_in_progress()
        .await
        .context("Failed to retrieve in-progress items")?;

    let Some(item) = items.first() else {
        return Ok(ResponseBuilder::new()
            .speak(messages::NO_ITEMS_IN_PROGRESS)
            .reprompt(messages::OFFER_SEARCH)
            .build());
    };

    let progress = item.user_media_progress.clone().unwrap_or_default();
    let percent = progress.percent();
    let offset_ms = seconds_to_millis(progress.current_time);

    let track = track_for(server, item, offset_ms);
    session.set_playing(&item.id, offset_ms);

    info!(
        "Continuing {} ({}) at {}ms, {}% through",
        item.title(),
        item.id,
        offset_ms,
        percent
    );

    let speech = if percent > 0 {
        messages::continuing(item.title(), percent)
    } else {
        messages::playing(item.title(), item.author())
    };

    Ok(ResponseBuilder::new()
        .speak(speech)
        .add_directive(Directive::play(track))
        .build())
}

async fn play_by_name(
    server: &dyn MediaServer,
    session: &mut SessionState,
    book_name: &str,
) -> Result<ResponsePayload> {
    let libraries = server
        .list_libraries()
        .await
        .context("Failed to retrieve libraries")?;

    let Some(first_library) = libraries.first() else {
        return Ok(ResponseBuilder::new().speak(messages::NO_LIBRARIES).build());
    };

    let library_id = session
        .library_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| first_library.id.clone());

    let results = server
        .search_library(&library_id, book_name, DEFAULT_SEARCH_LIMIT)
        .await
        .with_context(|| format!("Failed to search library {}", library_id))?;

    let Some(found) = results.book.first() else {
        info!("No books matching '{}' in library {}", book_name, library_id);
        return Ok(ResponseBuilder::new()
            .speak(messages::no_book_match(book_name))
            .reprompt(messages::WHAT_NEXT)
            .build());
    };

    let item = &found.library_item;
    let track = track_for(server, item, 0);

    session.set_playing(&item.id, 0);
    session.library_id = Some(library_id);

    info!("Playing {} ({}) from the start", item.title(), item.id);

    Ok(ResponseBuilder::new()
        .speak(messages::playing(item.title(), item.author()))
        .add_directive(Directive::play(track))
        .build())
}

/// Stream plus display metadata for a library item
fn track_for(server: &dyn MediaServer, item: &LibraryItem, offset_ms: u64) -> Track {
    Track {
        url: server.stream_url(&item.id),
        token: item.id.clone(),
        offset_ms,
        title: Some(item.title().to_string()),
        subtitle: Some(format!("by {}", item.author())),
        art_url: item.cover_url(server.base_url()),
    }
}

fn seconds_to_millis(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0) as u64
    } else {
        0
    }
}
