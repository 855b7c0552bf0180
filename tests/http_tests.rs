// Router tests driven through tower's oneshot, no socket involved.

mod common;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bookshelf_voice::mediaserver::{MediaServer, MediaServerConnector};
use bookshelf_voice::skill::messages;
use bookshelf_voice::{create_router, AppState, Credentials, Dispatcher};
use common::{configured_defaults, dispatcher, FakeServer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(server: Arc<FakeServer>) -> Router {
    let (dispatcher, _) = dispatcher(server);
    create_router(AppState::new(dispatcher, "bookshelf-voice"))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn post_alexa(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/alexa")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(Arc::new(FakeServer::new())), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "service": "bookshelf-voice" }));
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(Arc::new(FakeServer::new())), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert!(body["endpoints"]["/alexa"].is_string());
}

#[tokio::test]
async fn test_webhook_echoes_session_attributes() {
    let envelope = json!({
        "version": "1.0",
        "session": {
            "new": false,
            "sessionId": "amzn1.echo-api.session.1",
            "attributes": { "currentItem": "li_7", "offsetInMilliseconds": 4200, "custom": [1, 2] }
        },
        "context": { "System": {} },
        "request": {
            "type": "IntentRequest",
            "requestId": "req-1",
            "timestamp": "2024-05-01T12:00:00Z",
            "locale": "en-US",
            "intent": { "name": "AMAZON.HelpIntent", "slots": {} }
        }
    });

    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa(envelope.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["response"]["outputSpeech"]["text"], messages::HELP);
    assert_eq!(
        body["sessionAttributes"],
        json!({ "currentItem": "li_7", "offsetInMilliseconds": 4200, "custom": [1, 2] })
    );
}

#[tokio::test]
async fn test_webhook_resume_uses_session_item() {
    let envelope = json!({
        "version": "1.0",
        "session": { "attributes": { "currentItem": "li_7", "offsetInMilliseconds": 4200 } },
        "request": {
            "type": "IntentRequest",
            "intent": { "name": "AMAZON.ResumeIntent" }
        }
    });

    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa(envelope.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let directive = &body["response"]["directives"][0];
    assert_eq!(directive["type"], "AudioPlayer.Play");
    assert_eq!(directive["audioItem"]["stream"]["token"], "li_7");
    assert_eq!(directive["audioItem"]["stream"]["offsetInMilliseconds"], 4200);
}

#[tokio::test]
async fn test_webhook_unknown_request_type_is_acknowledged() {
    let envelope = json!({
        "version": "1.0",
        "request": { "type": "System.ExceptionEncountered", "requestId": "req-9" }
    });

    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa(envelope.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "version": "1.0", "response": {} }));
}

#[tokio::test]
async fn test_webhook_malformed_body() {
    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa("{ not json"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "version": "1.0",
            "response": {
                "outputSpeech": { "type": "PlainText", "text": messages::ERROR },
                "shouldEndSession": false
            }
        })
    );
}

#[tokio::test]
async fn test_webhook_missing_request() {
    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa(json!({ "version": "1.0" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["response"]["outputSpeech"]["text"], messages::ERROR);
}

struct PanickingConnector;

impl MediaServerConnector for PanickingConnector {
    fn connect(&self, _credentials: &Credentials) -> Result<Arc<dyn MediaServer>> {
        panic!("connector exploded");
    }
}

#[tokio::test]
async fn test_webhook_handler_panic_is_answered_by_error_handler() {
    let dispatcher = Dispatcher::new(configured_defaults(), Arc::new(PanickingConnector));
    let app = create_router(AppState::new(dispatcher, "bookshelf-voice"));
    let envelope = json!({
        "version": "1.0",
        "session": { "attributes": { "libraryId": "lib_1" } },
        "request": { "type": "LaunchRequest" }
    });

    let (status, body) = send(app, post_alexa(envelope.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["outputSpeech"]["text"], messages::ERROR);
    assert_eq!(
        body["response"]["reprompt"]["outputSpeech"]["text"],
        messages::HELP
    );
    assert_eq!(body["sessionAttributes"], json!({ "libraryId": "lib_1" }));
}

#[tokio::test]
async fn test_webhook_mistyped_session_attributes_still_handled() {
    let envelope = json!({
        "version": "1.0",
        "session": {
            "attributes": {
                "currentItem": "li_7",
                "offsetInMilliseconds": "5000",
                "libraryId": 12
            }
        },
        "request": {
            "type": "IntentRequest",
            "intent": { "name": "AMAZON.ResumeIntent" }
        }
    });

    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa(envelope.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stream = &body["response"]["directives"][0]["audioItem"]["stream"];
    assert_eq!(stream["token"], "li_7");
    assert_eq!(stream["offsetInMilliseconds"], 5000);
    assert_eq!(
        body["sessionAttributes"],
        json!({ "currentItem": "li_7", "offsetInMilliseconds": 5000 })
    );
}

#[tokio::test]
async fn test_webhook_unreadable_attributes_start_empty_session() {
    let envelope = json!({
        "version": "1.0",
        "session": { "attributes": "garbage" },
        "request": { "type": "IntentRequest", "intent": { "name": "AMAZON.ResumeIntent" } }
    });

    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa(envelope.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"]["outputSpeech"]["text"],
        messages::NOTHING_TO_RESUME
    );
}

#[tokio::test]
async fn test_webhook_player_event_without_session_returns_no_attributes() {
    let envelope = json!({
        "version": "1.0",
        "context": {},
        "request": {
            "type": "AudioPlayer.PlaybackStarted",
            "token": "li_1",
            "offsetInMilliseconds": 10
        }
    });

    let (status, body) = send(
        app(Arc::new(FakeServer::new())),
        post_alexa(envelope.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "version": "1.0", "response": {} }));
}
