#![allow(dead_code)]

//! Common test utilities for integration tests.
//!
//! Provides a wired-up session harness (mock backend, in-memory stores,
//! controller with its event channel) plus helpers for mounting the
//! backend endpoints the client consumes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use humint_client::adapters::{MemoryKeyValueStore, MemoryThreadStore, ReqwestHttpClient};
use humint_client::events::SessionEvent;
use humint_client::models::Identity;
use humint_client::persona::PersonaStore;
use humint_client::repository::ThreadRepository;
use humint_client::session::SessionController;

/// A fully wired session against a mock backend and in-memory stores.
pub struct SessionHarness {
    pub server: MockServer,
    pub store: Arc<MemoryThreadStore>,
    pub persona_backing: Arc<MemoryKeyValueStore>,
    pub persona: Arc<PersonaStore>,
    pub controller: Arc<SessionController>,
    pub events: UnboundedReceiver<SessionEvent>,
}

impl SessionHarness {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryThreadStore::new());
        let persona_backing = Arc::new(MemoryKeyValueStore::new());
        let persona = Arc::new(PersonaStore::new(persona_backing.clone()));
        let repository = Arc::new(ThreadRepository::with_base_url(
            server.uri(),
            Arc::new(ReqwestHttpClient::new()),
            store.clone(),
        ));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let controller = Arc::new(SessionController::new(repository, persona.clone(), events_tx));

        Self {
            server,
            store,
            persona_backing,
            persona,
            controller,
            events: events_rx,
        }
    }

    /// Sign the session in as the standard test identity.
    pub fn sign_in(&self) -> Identity {
        let identity = test_identity();
        self.controller.set_identity(Some(identity.clone()));
        identity
    }
}

/// The identity used across tests.
pub fn test_identity() -> Identity {
    Identity::new("test-user-id").with_email("test@example.com")
}

/// A minimal chat reply body.
pub fn chat_reply(main_response: &str) -> serde_json::Value {
    serde_json::json!({
        "mainResponse": main_response,
        "confidence": "high",
        "references": [],
        "referencesCount": 0,
        "targetPersona": null,
        "followupRecs": []
    })
}

/// Mount a successful `POST /api/chat` reply.
pub async fn mount_chat_reply(server: &MockServer, main_response: &str) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(main_response)))
        .mount(server)
        .await;
}

/// Mount a `POST /api/chat` reply delivered after `delay`.
pub async fn mount_delayed_chat_reply(server: &MockServer, main_response: &str, delay: Duration) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_reply(main_response))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Mount a successful `POST /api/threads/create` reply.
pub async fn mount_create_thread(server: &MockServer, thread_id: &str, title: &str) {
    Mock::given(method("POST"))
        .and(path("/api/threads/create"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "thread_id": thread_id, "title": title })),
        )
        .mount(server)
        .await;
}

/// Mount a thread history reply. `messages` is the wire-order (newest
/// first) JSON array the backend would return.
pub async fn mount_history(server: &MockServer, thread_id: &str, messages: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/threads/{}/messages", thread_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(messages))
        .mount(server)
        .await;
}

/// All bodies posted to `/api/chat` so far, decoded.
pub async fn chat_request_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/api/chat")
        .map(|request| serde_json::from_slice(&request.body).expect("chat body is JSON"))
        .collect()
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until<F>(condition: F, timeout: Duration) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
