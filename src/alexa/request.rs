use crate::session::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Inbound webhook body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,

    /// Absent on player events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// Device and player context, not interpreted here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    pub request: Request,
}

impl RequestEnvelope {
    /// Session attributes for this turn (empty when the platform sent none)
    pub fn session_state(&self) -> SessionState {
        self.session
            .as_ref()
            .and_then(|s| s.attributes.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(
        default,
        deserialize_with = "deserialize_attributes",
        skip_serializing_if = "Option::is_none"
    )]
    pub attributes: Option<SessionState>,
}

/// Attributes that are not an object start the turn with an empty session
fn deserialize_attributes<'de, D>(deserializer: D) -> Result<Option<SessionState>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match serde_json::from_value(value) {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            warn!("Discarding unreadable session attributes: {}", e);
            Ok(None)
        }
    }
}

/// The request body, discriminated by its `type` field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "LaunchRequest")]
    Launch(RequestMeta),

    #[serde(rename = "IntentRequest")]
    Intent(IntentRequest),

    #[serde(rename = "SessionEndedRequest")]
    SessionEnded(SessionEndedRequest),

    #[serde(rename = "AudioPlayer.PlaybackStarted")]
    PlaybackStarted(PlaybackEvent),

    #[serde(rename = "AudioPlayer.PlaybackFinished")]
    PlaybackFinished(PlaybackEvent),

    #[serde(rename = "AudioPlayer.PlaybackStopped")]
    PlaybackStopped(PlaybackEvent),

    #[serde(rename = "AudioPlayer.PlaybackNearlyFinished")]
    PlaybackNearlyFinished(PlaybackEvent),

    #[serde(rename = "AudioPlayer.PlaybackFailed")]
    PlaybackFailed(PlaybackFailedRequest),

    /// Any request type this skill does not handle
    #[serde(other)]
    Unknown,
}

impl Request {
    /// Wire name of the request type, for logging
    pub fn request_type(&self) -> &'static str {
        match self {
            Request::Launch(_) => "LaunchRequest",
            Request::Intent(_) => "IntentRequest",
            Request::SessionEnded(_) => "SessionEndedRequest",
            Request::PlaybackStarted(_) => "AudioPlayer.PlaybackStarted",
            Request::PlaybackFinished(_) => "AudioPlayer.PlaybackFinished",
            Request::PlaybackStopped(_) => "AudioPlayer.PlaybackStopped",
            Request::PlaybackNearlyFinished(_) => "AudioPlayer.PlaybackNearlyFinished",
            Request::PlaybackFailed(_) => "AudioPlayer.PlaybackFailed",
            Request::Unknown => "Unknown",
        }
    }
}

/// Fields common to every request type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(flatten)]
    pub meta: RequestMeta,
    pub intent: Intent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Spoken value of a slot, `None` when missing or empty
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.slots
            .get(slot)
            .and_then(|s| s.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    #[serde(flatten)]
    pub meta: RequestMeta,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<PlatformError>,
}

/// Player lifecycle event (started, finished, stopped, nearly finished)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackEvent {
    #[serde(flatten)]
    pub meta: RequestMeta,
    /// Token of the stream, which is the library item id
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub offset_in_milliseconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackFailedRequest {
    #[serde(flatten)]
    pub meta: RequestMeta,
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<PlatformError>,
}

/// Error reported by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformError {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}
