use super::apology;
use crate::alexa::ResponsePayload;
use tracing::error;

/// Catch-all for errors no handler dealt with
pub fn handle_error(err: &anyhow::Error) -> ResponsePayload {
    error!("Error handled: {:#}", err);
    error!("Error detail: {:?}", err);
    apology()
}
