use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Per-conversation attributes carried by the voice platform
///
/// Handlers read and write the typed keys; anything else the platform stored
/// is kept in `extra` and echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Session-scoped override of the default server URL
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_url: Option<String>,

    /// Session-scoped override of the default server token
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<String>,

    /// Library searched by the last play-by-name request
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub library_id: Option<String>,

    /// Item currently queued on the platform player
    #[serde(
        rename = "currentItem",
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_item_id: Option<String>,

    /// Last known playback position of `current_item_id`
    #[serde(
        rename = "offsetInMilliseconds",
        default,
        deserialize_with = "deserialize_offset",
        skip_serializing_if = "Option::is_none"
    )]
    pub offset_milliseconds: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the item the player is about to play
    pub fn set_playing(&mut self, item_id: &str, offset_milliseconds: u64) {
        self.current_item_id = Some(item_id.to_string());
        self.offset_milliseconds = Some(offset_milliseconds);
    }

    pub fn current_item(&self) -> Option<&str> {
        self.current_item_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Stored offset, 0 when nothing was recorded
    pub fn offset(&self) -> u64 {
        self.offset_milliseconds.unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// The platform replays whatever a previous turn stored, so a mistyped
// attribute reads as unset instead of rejecting the whole envelope.

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => {
            warn!("Ignoring non-string session attribute: {}", other);
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Offsets may arrive as integers, floats or numeric strings
fn deserialize_offset<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = match Option::<Value>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    if ms.is_none() {
        warn!("Ignoring unreadable playback offset in session");
    }

    Ok(ms.map(|ms| if ms.is_finite() && ms > 0.0 { ms as u64 } else { 0 }))
}
