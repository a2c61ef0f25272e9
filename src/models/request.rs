use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// Body for `POST /api/threads/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateThreadRequest {
    /// The first user message; the backend derives the title from it
    pub initial_message: String,
}

/// Reply from `POST /api/threads/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedThread {
    /// Backend-minted thread id
    #[serde(deserialize_with = "deserialize_id")]
    pub thread_id: String,
    /// Backend-generated title
    pub title: String,
}

/// Body for `POST /api/chat`.
///
/// `target_persona` is always present on the wire; the unset persona is
/// sent as an explicit `null`, which is what the backend expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The user's message text
    pub message: String,
    /// Thread the message belongs to
    pub thread_id: String,
    /// Targeting context, or `null` when unset
    #[serde(rename = "targetPersona")]
    pub target_persona: Option<String>,
    /// Topical field the conversation is scoped to
    pub field: String,
}
