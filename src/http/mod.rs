//! HTTP surface for the voice platform
//!
//! - POST /alexa - Webhook receiving request envelopes
//! - GET /health - Health check
//! - GET / - Service info

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
