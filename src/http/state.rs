use crate::skill::Dispatcher;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Request dispatcher; holds no per-conversation state
    pub dispatcher: Arc<Dispatcher>,

    /// Service name reported by the info endpoints
    pub service_name: String,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, service_name: impl Into<String>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            service_name: service_name.into(),
        }
    }
}
