//! Voice platform webhook envelopes
//!
//! Request side: `RequestEnvelope` with a typed `Request` per request type.
//! Response side: `ResponsePayload`, built with `ResponseBuilder`, wrapped in
//! a `ResponseEnvelope` together with the updated session attributes.

pub mod request;
pub mod response;

pub use request::{
    Intent, IntentRequest, PlatformError, PlaybackEvent, PlaybackFailedRequest, Request,
    RequestEnvelope, RequestMeta, Session, SessionEndedRequest, Slot,
};
pub use response::{
    AudioItem, AudioMetadata, Card, Directive, OutputSpeech, PlayBehavior, Reprompt,
    ResponseBuilder, ResponseEnvelope, ResponsePayload, Stream, Track, ENVELOPE_VERSION,
};
