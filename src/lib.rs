pub mod alexa;
pub mod config;
pub mod http;
pub mod mediaserver;
pub mod session;
pub mod skill;

pub use alexa::{Directive, Request, RequestEnvelope, ResponseEnvelope, ResponsePayload};
pub use config::{Config, Overrides};
pub use http::{create_router, AppState};
pub use mediaserver::{
    AudiobookshelfClient, HttpConnector, MediaServer, MediaServerConnector, MediaServerError,
};
pub use session::{Credentials, ServerDefaults, SessionState};
pub use skill::Dispatcher;
