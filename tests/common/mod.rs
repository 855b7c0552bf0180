// Shared fixtures: an in-memory media server that records every call.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use bookshelf_voice::alexa::Request;
use bookshelf_voice::mediaserver::{
    Library, LibraryItem, MediaServer, MediaServerConnector, MediaServerError, ProgressUpdate,
    SearchResults,
};
use bookshelf_voice::{Credentials, Dispatcher, ServerDefaults};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://abs.local";
pub const TOKEN: &str = "default-token";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListLibraries,
    Search {
        library_id: String,
        query: String,
        limit: usize,
    },
    ItemsInProgress,
    GetItem(String),
    UpdateProgress {
        item_id: String,
        current_time: f64,
        duration: f64,
    },
    StreamUrl(String),
}

#[derive(Default)]
pub struct FakeServer {
    pub libraries: Vec<Library>,
    pub in_progress: Vec<LibraryItem>,
    pub search: SearchResults,
    /// Reads fail with a 502 when set
    pub fail_reads: bool,
    /// Reads panic when set
    pub panic_reads: bool,
    /// Outcome of successive progress writes (`false` = transport failure);
    /// writes succeed once the script runs out
    pub progress_outcomes: Mutex<VecDeque<bool>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn progress_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::UpdateProgress { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn read<T>(&self, value: T) -> bookshelf_voice::mediaserver::Result<T> {
        if self.panic_reads {
            panic!("media server read blew up");
        }
        if self.fail_reads {
            Err(MediaServerError::from_status_code(502, "bad gateway"))
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl MediaServer for FakeServer {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn list_libraries(&self) -> bookshelf_voice::mediaserver::Result<Vec<Library>> {
        self.record(Call::ListLibraries);
        self.read(self.libraries.clone())
    }

    async fn search_library(
        &self,
        library_id: &str,
        query: &str,
        limit: usize,
    ) -> bookshelf_voice::mediaserver::Result<SearchResults> {
        self.record(Call::Search {
            library_id: library_id.to_string(),
            query: query.to_string(),
            limit,
        });
        self.read(self.search.clone())
    }

    async fn items_in_progress(&self) -> bookshelf_voice::mediaserver::Result<Vec<LibraryItem>> {
        self.record(Call::ItemsInProgress);
        self.read(self.in_progress.clone())
    }

    async fn get_item(&self, item_id: &str) -> bookshelf_voice::mediaserver::Result<LibraryItem> {
        self.record(Call::GetItem(item_id.to_string()));
        Err(MediaServerError::NotFound(item_id.to_string()))
    }

    async fn update_progress(
        &self,
        item_id: &str,
        current_time: f64,
        duration: f64,
    ) -> Option<ProgressUpdate> {
        self.record(Call::UpdateProgress {
            item_id: item_id.to_string(),
            current_time,
            duration,
        });
        let ok = self.progress_outcomes.lock().unwrap().pop_front().unwrap_or(true);
        ok.then(|| ProgressUpdate::new(current_time, duration))
    }

    fn stream_url(&self, item_id: &str) -> String {
        self.record(Call::StreamUrl(item_id.to_string()));
        format!("{}/api/items/{}/play?token={}", BASE_URL, item_id, TOKEN)
    }
}

/// Hands out the same fake server and remembers the credentials it was asked for
pub struct FakeConnector {
    pub server: Arc<FakeServer>,
    pub connections: Mutex<Vec<Credentials>>,
}

impl MediaServerConnector for FakeConnector {
    fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn MediaServer>> {
        self.connections.lock().unwrap().push(credentials.clone());
        Ok(self.server.clone())
    }
}

/// Connector whose client construction always fails
pub struct BrokenConnector;

impl MediaServerConnector for BrokenConnector {
    fn connect(&self, _credentials: &Credentials) -> Result<Arc<dyn MediaServer>> {
        anyhow::bail!("client construction failed")
    }
}

pub fn configured_defaults() -> ServerDefaults {
    ServerDefaults {
        base_url: Some(BASE_URL.to_string()),
        token: Some(TOKEN.to_string()),
    }
}

pub fn dispatcher(server: Arc<FakeServer>) -> (Dispatcher, Arc<FakeConnector>) {
    dispatcher_with_defaults(server, configured_defaults())
}

pub fn dispatcher_with_defaults(
    server: Arc<FakeServer>,
    defaults: ServerDefaults,
) -> (Dispatcher, Arc<FakeConnector>) {
    let connector = Arc::new(FakeConnector {
        server,
        connections: Mutex::new(Vec::new()),
    });
    (Dispatcher::new(defaults, connector.clone()), connector)
}

pub fn item(id: &str, title: &str, author: &str, progress: Option<(f64, f64)>) -> LibraryItem {
    let mut value = json!({
        "id": id,
        "media": {
            "metadata": { "title": title, "authorName": author },
            "coverPath": format!("/metadata/items/{}/cover.jpg", id)
        }
    });
    if let Some((current_time, duration)) = progress {
        value["userMediaProgress"] = json!({ "currentTime": current_time, "duration": duration });
    }
    serde_json::from_value(value).unwrap()
}

pub fn library(id: &str, name: &str) -> Library {
    serde_json::from_value(json!({ "id": id, "name": name })).unwrap()
}

pub fn book_results(items: Vec<LibraryItem>) -> SearchResults {
    let matches: Vec<Value> = items
        .into_iter()
        .map(|i| json!({ "libraryItem": i }))
        .collect();
    serde_json::from_value(json!({ "book": matches })).unwrap()
}

pub fn launch_request() -> Request {
    serde_json::from_value(json!({ "type": "LaunchRequest", "requestId": "req-1" })).unwrap()
}

pub fn intent_request(name: &str) -> Request {
    serde_json::from_value(json!({
        "type": "IntentRequest",
        "intent": { "name": name, "slots": {} }
    }))
    .unwrap()
}

pub fn play_book_request(book_name: Option<&str>) -> Request {
    let slots = match book_name {
        Some(name) => json!({ "bookName": { "name": "bookName", "value": name } }),
        None => json!({ "bookName": { "name": "bookName" } }),
    };
    serde_json::from_value(json!({
        "type": "IntentRequest",
        "intent": { "name": "PlayBookIntent", "slots": slots }
    }))
    .unwrap()
}

pub fn player_event(kind: &str, token: &str, offset_ms: u64) -> Request {
    serde_json::from_value(json!({
        "type": format!("AudioPlayer.{}", kind),
        "token": token,
        "offsetInMilliseconds": offset_ms
    }))
    .unwrap()
}
