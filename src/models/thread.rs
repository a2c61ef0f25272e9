use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// A persisted conversation, as stored in the durable thread table.
///
/// Created once per conversation at first-message time. `last_message` and
/// `updated_at` are rewritten on every subsequent send; rows are never
/// deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    /// Backend-minted identifier (can arrive as string or integer)
    #[serde(deserialize_with = "deserialize_id")]
    pub thread_id: String,
    /// Title generated by the backend from the first message
    #[serde(default)]
    pub title: String,
    /// The most recent user message in the thread
    #[serde(default)]
    pub last_message: String,
    /// When the thread was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the thread last received a message
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Identity that owns the thread
    pub owner_id: String,
}

impl Thread {
    /// Build a fresh thread row at creation time.
    pub fn new(
        thread_id: impl Into<String>,
        title: impl Into<String>,
        last_message: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            thread_id: thread_id.into(),
            title: title.into(),
            last_message: last_message.into(),
            created_at: now,
            updated_at: now,
            owner_id: owner_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_thread_timestamps_match() {
        let thread = Thread::new("t1", "Banking interviews", "How do I prep?", "user-1");
        assert_eq!(thread.created_at, thread.updated_at);
        assert_eq!(thread.thread_id, "t1");
        assert_eq!(thread.owner_id, "user-1");
    }

    #[test]
    fn test_thread_deserializes_integer_id() {
        let json = r#"{
            "thread_id": 7,
            "title": "Untitled",
            "last_message": "hi",
            "created_at": "2026-08-01T12:00:00Z",
            "updated_at": "2026-08-01T12:00:00Z",
            "owner_id": "user-1"
        }"#;
        let thread: Thread = serde_json::from_str(json).unwrap();
        assert_eq!(thread.thread_id, "7");
    }

    #[test]
    fn test_thread_round_trip() {
        let thread = Thread::new("t2", "Title", "msg", "user-2");
        let json = serde_json::to_string(&thread).unwrap();
        let back: Thread = serde_json::from_str(&json).unwrap();
        assert_eq!(thread, back);
    }
}
