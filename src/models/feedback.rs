use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Message, ResponsePayload};

/// A user's verdict on an assistant reply, written to the durable
/// feedback table. Rows are keyed by submission time and never read back
/// by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRecord {
    /// Unique identifier for this submission
    pub id: String,
    /// When the feedback was submitted
    pub created_at: DateTime<Utc>,
    /// The full structured reply the feedback is about
    pub response: ResponsePayload,
    /// The option the user picked (e.g. "Helpful", "Inaccurate")
    pub feedback: String,
}

impl FeedbackRecord {
    /// Build a feedback record for an assistant message.
    pub fn new(message: &Message, feedback: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            response: ResponsePayload::from(message),
            feedback: feedback.into(),
        }
    }
}
