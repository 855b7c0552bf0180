//! Per-conversation session state
//!
//! This module provides:
//! - `SessionState`: the attribute record the voice platform stores between turns
//! - `Credentials`: media server access resolved from session overrides and defaults

mod credentials;
mod state;

pub use credentials::{Credentials, ServerDefaults};
pub use state::SessionState;
