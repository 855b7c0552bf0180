use serde::{Deserialize, Serialize};

/// A library on the media server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// One book or podcast entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: String,
    #[serde(default)]
    pub library_id: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media: Option<Media>,
    /// Listening progress of the authenticated user, present on in-progress listings
    #[serde(default, alias = "mediaProgress")]
    pub user_media_progress: Option<MediaProgress>,
}

impl LibraryItem {
    fn metadata(&self) -> Option<&MediaMetadata> {
        self.media.as_ref().and_then(|m| m.metadata.as_ref())
    }

    pub fn title(&self) -> &str {
        self.metadata()
            .and_then(|m| m.title.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or("Unknown Title")
    }

    pub fn author(&self) -> &str {
        self.metadata()
            .and_then(|m| m.author_name.as_deref())
            .filter(|a| !a.is_empty())
            .unwrap_or("Unknown Author")
    }

    /// Absolute cover URL, if the item has a cover
    pub fn cover_url(&self, base_url: &str) -> Option<String> {
        self.media
            .as_ref()
            .and_then(|m| m.cover_path.as_deref())
            .filter(|p| !p.is_empty())
            .map(|path| format!("{}{}", base_url, path))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default)]
    pub metadata: Option<MediaMetadata>,
    /// Server-relative cover path
    #[serde(default)]
    pub cover_path: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
}

/// Listening position of one item, in seconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaProgress {
    #[serde(default)]
    pub library_item_id: Option<String>,
    #[serde(default)]
    pub current_time: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub is_finished: bool,
}

impl MediaProgress {
    /// Whole-number completion percentage, 0 when duration is unknown
    pub fn percent(&self) -> u32 {
        progress_percent(self.current_time, self.duration)
    }
}

/// round(100 * current / duration), or 0 when duration <= 0
pub fn progress_percent(current_time: f64, duration: f64) -> u32 {
    if duration <= 0.0 || !duration.is_finite() {
        return 0;
    }
    ((current_time / duration) * 100.0).round().max(0.0) as u32
}

/// Body of `PATCH /api/me/progress/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub current_time: f64,
    pub duration: f64,
    pub progress: f64,
}

impl ProgressUpdate {
    pub fn new(current_time: f64, duration: f64) -> Self {
        let progress = if duration > 0.0 {
            current_time / duration
        } else {
            0.0
        };
        Self {
            current_time,
            duration,
            progress,
        }
    }
}

/// Search results grouped by media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub book: Vec<SearchMatch>,
    #[serde(default)]
    pub podcast: Vec<SearchMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub library_item: LibraryItem,
    #[serde(default)]
    pub match_key: Option<String>,
    #[serde(default)]
    pub match_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    #[serde(default)]
    pub user_default_library_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub token: String,
}

/// Server-side playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSession {
    pub id: String,
    #[serde(default)]
    pub library_item_id: Option<String>,
    #[serde(default)]
    pub current_time: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LibrariesResponse {
    #[serde(default)]
    pub libraries: Vec<Library>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemsInProgressResponse {
    #[serde(default)]
    pub library_items: Vec<LibraryItem>,
}
