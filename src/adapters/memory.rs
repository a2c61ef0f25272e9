//! In-memory doubles for the collaborator traits.
//!
//! `MemoryThreadStore` and `MemoryKeyValueStore` back tests and
//! signed-out sessions. Both can be switched into a failing mode so
//! callers' degradation paths can be exercised.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::{FeedbackRecord, Thread};
use crate::traits::{KeyValueStore, StoreError, ThreadStore};

/// In-memory thread and feedback tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryThreadStore {
    threads: Arc<Mutex<Vec<Thread>>>,
    feedback: Arc<Mutex<Vec<FeedbackRecord>>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `StoreError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Snapshot of all stored thread rows, insertion order.
    pub fn threads(&self) -> Vec<Thread> {
        self.threads.lock().unwrap().clone()
    }

    /// Snapshot of all stored feedback rows, insertion order.
    pub fn feedback(&self) -> Vec<FeedbackRecord> {
        self.feedback.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if *self.failing.lock().unwrap() {
            Err(StoreError::Unavailable("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn insert_thread(&self, thread: &Thread) -> Result<(), StoreError> {
        self.check_available()?;
        self.threads.lock().unwrap().push(thread.clone());
        Ok(())
    }

    async fn list_threads(&self, owner_id: &str) -> Result<Vec<Thread>, StoreError> {
        self.check_available()?;
        let mut owned: Vec<Thread> = self
            .threads
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update_last_message(
        &self,
        thread_id: &str,
        last_message: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut threads = self.threads.lock().unwrap();
        for thread in threads.iter_mut().filter(|t| t.thread_id == thread_id) {
            thread.last_message = last_message.to_string();
            thread.updated_at = updated_at;
        }
        Ok(())
    }

    async fn insert_feedback(&self, record: &FeedbackRecord) -> Result<(), StoreError> {
        self.check_available()?;
        self.feedback.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// In-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` report persistence failure.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if *self.failing.lock().unwrap() {
            return false;
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }
}
