//! Audiobookshelf media server access
//!
//! - `MediaServer` trait: the operations the skill handlers rely on
//! - `AudiobookshelfClient`: reqwest implementation with bearer auth and a per-call timeout
//! - `MediaServerConnector`: builds a server handle from resolved credentials

pub mod client;
pub mod error;
pub mod models;

pub use client::{
    AudiobookshelfClient, ClientOptions, HttpConnector, MediaServer, MediaServerConnector,
    DEFAULT_SEARCH_LIMIT, DEFAULT_TIMEOUT,
};
pub use error::{MediaServerError, Result};
pub use models::{
    progress_percent, Library, LibraryItem, LoginResponse, Media, MediaMetadata, MediaProgress,
    PlaybackSession, ProgressUpdate, SearchMatch, SearchResults, User,
};
