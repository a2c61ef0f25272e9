//! Thread repository client.
//!
//! Thin client over the two places a conversation lives: the remote
//! reasoning API (thread creation, history, chat) and the durable thread
//! store (ownership rows, last-message metadata, feedback). Durable-store
//! writes are bookkeeping: they are best-effort and never block or roll
//! back the conversation itself.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::{
    ChatRequest, CreateThreadRequest, CreatedThread, FeedbackRecord, Identity, Message, ResponsePayload,
    Thread,
};
use crate::traits::{Headers, HttpClient, ThreadStore};

/// Default base URL for the reasoning API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for thread and message operations.
pub struct ThreadRepository {
    /// Base URL for the reasoning API
    base_url: String,
    /// HTTP transport
    http: Arc<dyn HttpClient>,
    /// Durable thread/feedback store
    store: Arc<dyn ThreadStore>,
}

impl ThreadRepository {
    /// Create a repository against the default API base URL.
    pub fn new(http: Arc<dyn HttpClient>, store: Arc<dyn ThreadStore>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
            store,
        }
    }

    /// Create a repository against a custom API base URL.
    pub fn with_base_url(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn ThreadStore>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            store,
        }
    }

    /// The API base URL this repository talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Mint a new thread from its first message.
    ///
    /// Calls `POST /api/threads/create` to obtain the thread id and the
    /// backend-generated title. When an identity is present, a thread row
    /// is also inserted into the durable store with the initial message as
    /// `last_message`; an insert failure is logged and the created thread
    /// is still returned, since session continuity outranks bookkeeping.
    pub async fn create_thread(
        &self,
        initial_message: &str,
        owner: Option<&Identity>,
    ) -> Result<CreatedThread, ClientError> {
        let request = CreateThreadRequest {
            initial_message: initial_message.to_string(),
        };
        let created: CreatedThread = self.post_json("/api/threads/create", &request).await?;

        if let Some(owner) = owner {
            let row = Thread::new(
                &created.thread_id,
                &created.title,
                initial_message,
                &owner.user_id,
            );
            if let Err(err) = self.store.insert_thread(&row).await {
                warn!(thread_id = %created.thread_id, %err, "failed to save thread row");
            }
        }

        Ok(created)
    }

    /// All threads owned by `owner_id`, newest first.
    ///
    /// Surfaces `ClientError::Persistence` on store failure; callers are
    /// expected to degrade to "no threads" rather than crash.
    pub async fn list_threads(&self, owner_id: &str) -> Result<Vec<Thread>, ClientError> {
        Ok(self.store.list_threads(owner_id).await?)
    }

    /// Full message history for a thread, in chronological order.
    ///
    /// The backend returns newest-first; the reversal to chronological
    /// order happens here so callers never see backend ordering.
    pub async fn fetch_messages(&self, thread_id: &str) -> Result<Vec<Message>, ClientError> {
        let url = format!("{}/api/threads/{}/messages", self.base_url, thread_id);
        let response = self.http.get(&url, &Headers::new()).await?;

        if response.status == 404 {
            return Err(ClientError::NotFound {
                thread_id: thread_id.to_string(),
            });
        }
        if !response.is_success() {
            return Err(ClientError::http_status(
                response.status,
                response.text().unwrap_or_default(),
            ));
        }

        let mut messages: Vec<Message> = response.json().map_err(|err| ClientError::Network {
            message: format!("invalid history payload: {}", err),
            status: None,
        })?;
        messages.reverse();
        Ok(messages)
    }

    /// Send a user message and return the assistant reply.
    ///
    /// Posts the message with the targeting persona and field to
    /// `POST /api/chat`. On success, when `authenticated`, the thread
    /// row's `last_message`/`updated_at` are updated in a detached task —
    /// off the critical path, failure only logged.
    pub async fn send_message(
        &self,
        text: &str,
        thread_id: &str,
        persona: Option<&str>,
        field: &str,
        authenticated: bool,
    ) -> Result<Message, ClientError> {
        let request = ChatRequest {
            message: text.to_string(),
            thread_id: thread_id.to_string(),
            target_persona: persona.map(str::to_string),
            field: field.to_string(),
        };
        let payload: ResponsePayload = self.post_json("/api/chat", &request).await?;

        if authenticated {
            let store = Arc::clone(&self.store);
            let thread_id = thread_id.to_string();
            let last_message = text.to_string();
            tokio::spawn(async move {
                if let Err(err) = store
                    .update_last_message(&thread_id, &last_message, Utc::now())
                    .await
                {
                    warn!(%thread_id, %err, "failed to update thread metadata");
                }
            });
        }

        Ok(Message::from(payload))
    }

    /// Append a feedback row for an assistant reply.
    pub async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ClientError> {
        self.store.insert_feedback(record).await?;
        debug!(id = %record.id, "feedback recorded");
        Ok(())
    }

    /// POST a JSON payload and decode a JSON reply.
    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, ClientError>
    where
        Req: serde::Serialize,
        Resp: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let body = serde_json::to_string(request).map_err(|err| ClientError::Network {
            message: format!("failed to encode request: {}", err),
            status: None,
        })?;

        let response = self.http.post(&url, &body, &Headers::new()).await?;
        if !response.is_success() {
            return Err(ClientError::http_status(
                response.status,
                response.text().unwrap_or_default(),
            ));
        }

        response.json().map_err(|err| ClientError::Network {
            message: format!("invalid response payload: {}", err),
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryThreadStore;
    use crate::traits::{HttpError, Response};
    use async_trait::async_trait;
    use bytes::Bytes;

    /// HTTP stub returning one canned response for every request.
    struct StaticHttp {
        response: Result<Response, HttpError>,
    }

    impl StaticHttp {
        fn ok(body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(Response::new(200, Bytes::from(body.to_string()))),
            })
        }

        fn status(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(Response::new(status, Bytes::from(body.to_string()))),
            })
        }

        fn transport_failure() -> Arc<Self> {
            Arc::new(Self {
                response: Err(HttpError::ConnectionFailed("refused".to_string())),
            })
        }
    }

    #[async_trait]
    impl HttpClient for StaticHttp {
        async fn get(&self, _url: &str, _headers: &Headers) -> Result<Response, HttpError> {
            self.response.clone()
        }

        async fn post(
            &self,
            _url: &str,
            _body: &str,
            _headers: &Headers,
        ) -> Result<Response, HttpError> {
            self.response.clone()
        }
    }

    fn repository(http: Arc<StaticHttp>, store: Arc<MemoryThreadStore>) -> ThreadRepository {
        ThreadRepository::with_base_url("http://backend.test", http, store)
    }

    #[tokio::test]
    async fn test_create_thread_persists_row_for_identity() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(
            StaticHttp::ok(r#"{"thread_id":"t1","title":"Networking"}"#),
            store.clone(),
        );

        let owner = Identity::new("user-1");
        let created = repo.create_thread("How do I network?", Some(&owner)).await.unwrap();
        assert_eq!(created.thread_id, "t1");
        assert_eq!(created.title, "Networking");

        let rows = store.threads();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].owner_id, "user-1");
        assert_eq!(rows[0].last_message, "How do I network?");
    }

    #[tokio::test]
    async fn test_create_thread_skips_row_when_signed_out() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(
            StaticHttp::ok(r#"{"thread_id":"t1","title":"Networking"}"#),
            store.clone(),
        );

        repo.create_thread("hi", None).await.unwrap();
        assert!(store.threads().is_empty());
    }

    #[tokio::test]
    async fn test_create_thread_survives_store_failure() {
        let store = Arc::new(MemoryThreadStore::new());
        store.set_failing(true);
        let repo = repository(
            StaticHttp::ok(r#"{"thread_id":"t1","title":"Networking"}"#),
            store,
        );

        // The insert fails, but the created thread still comes back.
        let owner = Identity::new("user-1");
        let created = repo.create_thread("hi", Some(&owner)).await.unwrap();
        assert_eq!(created.thread_id, "t1");
    }

    #[tokio::test]
    async fn test_create_thread_maps_server_error() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(StaticHttp::status(500, "boom"), store);

        let result = repo.create_thread("hi", None).await;
        assert!(matches!(
            result,
            Err(ClientError::Network {
                status: Some(500),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_fetch_messages_reverses_to_chronological() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(
            StaticHttp::ok(
                r#"[
                    {"text":"third","isAI":true},
                    {"text":"second","isAI":false},
                    {"text":"first","isAI":false}
                ]"#,
            ),
            store,
        );

        let messages = repo.fetch_messages("t1").await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_fetch_messages_maps_404_to_not_found() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(StaticHttp::status(404, "no history"), store);

        let result = repo.fetch_messages("missing").await;
        match result {
            Err(ClientError::NotFound { thread_id }) => assert_eq!(thread_id, "missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_message_transport_failure_is_network_error() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(StaticHttp::transport_failure(), store);

        let result = repo
            .send_message("hi", "t1", None, "finance", false)
            .await;
        assert!(matches!(
            result,
            Err(ClientError::Network { status: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_send_message_returns_assistant_message() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(
            StaticHttp::ok(
                r#"{"mainResponse":"Answer","confidence":"high","followupRecs":["next?"]}"#,
            ),
            store,
        );

        let message = repo
            .send_message("hi", "t1", Some("VP"), "finance", false)
            .await
            .unwrap();
        assert!(message.is_ai);
        assert!(!message.is_error);
        assert_eq!(message.text, "Answer");
        assert_eq!(message.followup_recs, vec!["next?".to_string()]);
    }

    #[tokio::test]
    async fn test_list_threads_maps_store_failure() {
        let store = Arc::new(MemoryThreadStore::new());
        store.set_failing(true);
        let repo = repository(StaticHttp::ok("{}"), store);

        let result = repo.list_threads("user-1").await;
        assert!(matches!(result, Err(ClientError::Persistence { .. })));
    }

    #[tokio::test]
    async fn test_submit_feedback_inserts_row() {
        let store = Arc::new(MemoryThreadStore::new());
        let repo = repository(StaticHttp::ok("{}"), store.clone());

        let message = Message::from(ResponsePayload {
            main_response: "Answer".to_string(),
            confidence: None,
            references: Vec::new(),
            references_count: None,
            target_persona: None,
            followup_recs: Vec::new(),
        });
        let record = FeedbackRecord::new(&message, "Helpful");
        repo.submit_feedback(&record).await.unwrap();

        let rows = store.feedback();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].feedback, "Helpful");
    }
}
