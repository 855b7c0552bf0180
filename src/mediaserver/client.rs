use super::error::{MediaServerError, Result};
use super::models::{
    ItemsInProgressResponse, LibrariesResponse, Library, LibraryItem, LoginResponse,
    PlaybackSession, ProgressUpdate, SearchResults,
};
use crate::session::Credentials;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of search matches requested per query
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Per-call timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_USER_AGENT: &str = "alexa-audiobookshelf/1.0";

/// Media server operations used by the skill handlers
///
/// Implemented over HTTP by [`AudiobookshelfClient`]; handlers only see this
/// trait so tests can substitute an in-memory server.
#[async_trait]
pub trait MediaServer: Send + Sync {
    /// Base URL with any trailing slash removed
    fn base_url(&self) -> &str;

    async fn list_libraries(&self) -> Result<Vec<Library>>;

    async fn search_library(
        &self,
        library_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<SearchResults>;

    /// Items the user has started, most recent first
    async fn items_in_progress(&self) -> Result<Vec<LibraryItem>>;

    async fn get_item(&self, item_id: &str) -> Result<LibraryItem>;

    /// Best-effort progress write
    ///
    /// Returns the update that was stored, or `None` if the server call
    /// failed. Failures are logged here and never reach the caller as errors.
    async fn update_progress(
        &self,
        item_id: &str,
        current_time: f64,
        duration: f64,
    ) -> Option<ProgressUpdate>;

    /// Stream URL carrying the token as a query parameter
    fn stream_url(&self, item_id: &str) -> String;
}

/// Builds a [`MediaServer`] for a resolved set of credentials
pub trait MediaServerConnector: Send + Sync {
    fn connect(&self, credentials: &Credentials) -> anyhow::Result<Arc<dyn MediaServer>>;
}

/// HTTP client options
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Connector sharing one connection pool across all turns
///
/// Each turn gets its own [`AudiobookshelfClient`] (credentials differ per
/// session) backed by a clone of the same `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: Client,
}

impl HttpConnector {
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self {
            client: build_client(options)?,
        })
    }
}

impl MediaServerConnector for HttpConnector {
    fn connect(&self, credentials: &Credentials) -> anyhow::Result<Arc<dyn MediaServer>> {
        Ok(Arc::new(AudiobookshelfClient::from_client(
            self.client.clone(),
            &credentials.base_url,
            &credentials.token,
        )))
    }
}

fn build_client(options: ClientOptions) -> Result<Client> {
    Ok(Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent)
        .build()?)
}

/// Audiobookshelf REST API client
pub struct AudiobookshelfClient {
    client: Client,
    base_url: String,
    token: String,
}

impl AudiobookshelfClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Self::with_options(base_url, token, ClientOptions::default())
    }

    pub fn with_options(base_url: &str, token: &str, options: ClientOptions) -> Result<Self> {
        Ok(Self::from_client(build_client(options)?, base_url, token))
    }

    /// Reuse an existing `reqwest::Client` and its connection pool
    pub fn from_client(client: Client, base_url: &str, token: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Exchange username/password for a token
    ///
    /// On success the client switches to the returned token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/api/login", self.base_url);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Login failed ({}): {}", status.as_u16(), body);
            return Err(MediaServerError::Unauthorized(format!(
                "login rejected with status {}",
                status.as_u16()
            )));
        }

        let text = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("Invalid login response: {}", e);
            MediaServerError::Unauthorized("invalid login response".to_string())
        })?;

        info!("Logged in to media server as {}", login.user.username);
        self.token = login.user.token.clone();

        Ok(login)
    }

    /// Open a server-side playback session for an item
    pub async fn start_playback_session(&self, item_id: &str) -> Result<PlaybackSession> {
        let request = self.authorized(
            self.client
                .post(format!("{}/api/session/{}/local", self.base_url, item_id)),
        );
        let response = request.send().await?;
        Self::parse(response).await
    }

    /// Close a playback session; failures are logged and reported as `false`
    pub async fn close_session(&self, session_id: &str) -> bool {
        let request = self.authorized(
            self.client
                .post(format!("{}/api/session/{}/close", self.base_url, session_id)),
        );

        let result = match request.send().await {
            Ok(response) => Self::check(response).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                debug!("Closed playback session {}", session_id);
                true
            }
            Err(e) => {
                warn!("Failed to close session {}: {}", session_id, e);
                false
            }
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} with {} params", url, query.len());

        let response = self
            .authorized(self.client.get(&url))
            .query(query)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Reject non-2xx responses with a typed error
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Media server error ({}): {}", status.as_u16(), body);
            return Err(MediaServerError::from_status_code(status.as_u16(), body));
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check(response).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            MediaServerError::Decode(e)
        })
    }

    async fn send_progress(&self, item_id: &str, update: &ProgressUpdate) -> Result<()> {
        let url = format!("{}/api/me/progress/{}", self.base_url, item_id);
        debug!("PATCH {}", url);

        let response = self
            .authorized(self.client.patch(&url))
            .json(update)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl MediaServer for AudiobookshelfClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_libraries(&self) -> Result<Vec<Library>> {
        let response: LibrariesResponse = self.get("/api/libraries", &[]).await?;
        Ok(response.libraries)
    }

    async fn search_library(
        &self,
        library_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<SearchResults> {
        let limit = limit.to_string();
        self.get(
            &format!("/api/libraries/{}/search", library_id),
            &[("q", query), ("limit", limit.as_str())],
        )
        .await
    }

    async fn items_in_progress(&self) -> Result<Vec<LibraryItem>> {
        let response: ItemsInProgressResponse =
            self.get("/api/me/items-in-progress", &[]).await?;
        Ok(response.library_items)
    }

    async fn get_item(&self, item_id: &str) -> Result<LibraryItem> {
        self.get(&format!("/api/items/{}", item_id), &[]).await
    }

    async fn update_progress(
        &self,
        item_id: &str,
        current_time: f64,
        duration: f64,
    ) -> Option<ProgressUpdate> {
        let update = ProgressUpdate::new(current_time, duration);

        match self.send_progress(item_id, &update).await {
            Ok(()) => {
                debug!(
                    "Progress for {} saved at {:.1}s ({:.3})",
                    item_id, update.current_time, update.progress
                );
                Some(update)
            }
            Err(e) => {
                warn!("Failed to update progress for {}: {}", item_id, e);
                None
            }
        }
    }

    fn stream_url(&self, item_id: &str) -> String {
        format!(
            "{}/api/items/{}/play?token={}",
            self.base_url, item_id, self.token
        )
    }
}
