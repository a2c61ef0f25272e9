//! Durable-store trait abstraction.
//!
//! The thread table and the feedback table live in an external durable
//! store (a hosted Postgres in production). This crate only needs a small
//! CRUD surface over them, expressed here as a trait so sessions can run
//! against an in-memory double in tests and when signed out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{FeedbackRecord, Thread};

/// Durable-store failures.
///
/// These are bookkeeping failures by policy: callers log them and keep
/// the in-memory conversation going.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The store rejected the operation
    #[error("store rejected operation: {0}")]
    Rejected(String),
}

/// Trait over the durable thread and feedback tables.
///
/// Thread rows are keyed by `(owner_id, thread_id)` and queryable by
/// owner; feedback rows are append-only and never read back.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Insert a freshly created thread row.
    async fn insert_thread(&self, thread: &Thread) -> Result<(), StoreError>;

    /// All threads owned by `owner_id`, ordered by `created_at` descending.
    async fn list_threads(&self, owner_id: &str) -> Result<Vec<Thread>, StoreError>;

    /// Rewrite a thread's `last_message` and `updated_at` after a send.
    async fn update_last_message(
        &self,
        thread_id: &str,
        last_message: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Append a feedback row.
    async fn insert_feedback(&self, record: &FeedbackRecord) -> Result<(), StoreError>;
}
