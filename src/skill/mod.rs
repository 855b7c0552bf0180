//! Intent dispatch and playback-state reconciliation
//!
//! - `Route`: classifies a request into exactly one handler
//! - `Dispatcher`: resolves credentials, runs the handler, applies the error handler
//! - `handlers`: decision logic per intent and player event
//! - `messages`: scripted speech

mod dispatcher;
pub mod handlers;
pub mod messages;
pub mod route;

pub use dispatcher::Dispatcher;
pub use handlers::Turn;
pub use route::Route;
