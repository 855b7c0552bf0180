use crate::alexa::{PlaybackEvent, PlaybackFailedRequest, Request, SessionEndedRequest};

pub const CONTINUE_BOOK_INTENT: &str = "ContinueBookIntent";
pub const PLAY_BOOK_INTENT: &str = "PlayBookIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const PAUSE_INTENT: &str = "AMAZON.PauseIntent";
pub const RESUME_INTENT: &str = "AMAZON.ResumeIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";

/// Slot carrying the spoken book title on `PlayBookIntent`
pub const BOOK_NAME_SLOT: &str = "bookName";

/// The handler selected for one request
#[derive(Debug, Clone, Copy)]
pub enum Route<'a> {
    Launch,
    ContinueBook,
    PlayBook { book_name: Option<&'a str> },
    Help,
    Pause,
    Resume,
    StopOrCancel,
    Fallback,
    PlaybackStarted(&'a PlaybackEvent),
    PlaybackFinished(&'a PlaybackEvent),
    PlaybackStopped(&'a PlaybackEvent),
    PlaybackNearlyFinished(&'a PlaybackEvent),
    PlaybackFailed(&'a PlaybackFailedRequest),
    SessionEnded(&'a SessionEndedRequest),
    /// Intent request for an intent no handler is registered for
    UnhandledIntent(&'a str),
    /// Request type no handler is registered for
    Unhandled,
}

impl<'a> Route<'a> {
    /// Pick exactly one handler, in fixed priority order
    pub fn classify(request: &'a Request) -> Self {
        match request {
            Request::Launch(_) => Route::Launch,
            Request::Intent(req) => match req.intent.name.as_str() {
                CONTINUE_BOOK_INTENT => Route::ContinueBook,
                PLAY_BOOK_INTENT => Route::PlayBook {
                    book_name: req.intent.slot_value(BOOK_NAME_SLOT),
                },
                HELP_INTENT => Route::Help,
                PAUSE_INTENT => Route::Pause,
                RESUME_INTENT => Route::Resume,
                STOP_INTENT | CANCEL_INTENT => Route::StopOrCancel,
                FALLBACK_INTENT => Route::Fallback,
                other => Route::UnhandledIntent(other),
            },
            Request::PlaybackStarted(event) => Route::PlaybackStarted(event),
            Request::PlaybackFinished(event) => Route::PlaybackFinished(event),
            Request::PlaybackStopped(event) => Route::PlaybackStopped(event),
            Request::PlaybackNearlyFinished(event) => Route::PlaybackNearlyFinished(event),
            Request::PlaybackFailed(req) => Route::PlaybackFailed(req),
            Request::SessionEnded(req) => Route::SessionEnded(req),
            Request::Unknown => Route::Unhandled,
        }
    }

    /// Handler name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Route::Launch => "Launch",
            Route::ContinueBook => "ContinueBook",
            Route::PlayBook { .. } => "PlayBookByName",
            Route::Help => "Help",
            Route::Pause => "Pause",
            Route::Resume => "Resume",
            Route::StopOrCancel => "StopOrCancel",
            Route::Fallback => "Fallback",
            Route::PlaybackStarted(_) => "PlaybackStarted",
            Route::PlaybackFinished(_) => "PlaybackFinished",
            Route::PlaybackStopped(_) => "PlaybackStopped",
            Route::PlaybackNearlyFinished(_) => "PlaybackNearlyFinished",
            Route::PlaybackFailed(_) => "PlaybackFailed",
            Route::SessionEnded(_) => "SessionEnded",
            Route::UnhandledIntent(_) => "IntentReflector",
            Route::Unhandled => "Unhandled",
        }
    }

    /// Whether the handler may talk to the media server
    pub fn needs_server(&self) -> bool {
        matches!(
            self,
            Route::Launch
                | Route::ContinueBook
                | Route::PlayBook { .. }
                | Route::Resume
                | Route::PlaybackFinished(_)
                | Route::PlaybackStopped(_)
        )
    }
}
