//! Persona store.
//!
//! The persona is a free-text targeting context ("VP at Goldman Sachs")
//! attached to every outgoing chat request. It survives across sessions
//! in the injected key-value store; the empty string is the "unset"
//! sentinel. Persistence is a convenience, not integrity-critical:
//! failures degrade silently to in-memory-only behavior.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::traits::KeyValueStore;

/// Well-known key the persona is persisted under.
pub const PERSONA_KEY: &str = "target_persona";

/// Holds the current targeting persona and keeps it persisted.
///
/// Shared read-many/write-one: the session controller reads at send
/// time, UI input writes. A persona edit racing a send resolves to the
/// value read when the send started.
pub struct PersonaStore {
    value: Mutex<String>,
    store: Arc<dyn KeyValueStore>,
}

impl PersonaStore {
    /// Create a store, seeding the value from the persistence adapter.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let value = store.get(PERSONA_KEY).unwrap_or_default();
        Self {
            value: Mutex::new(value),
            store,
        }
    }

    /// The current persona, `""` if never set.
    pub fn get(&self) -> String {
        self.value.lock().unwrap().clone()
    }

    /// Update the persona, persisting best-effort before returning.
    pub fn set(&self, value: &str) {
        *self.value.lock().unwrap() = value.to_string();
        if !self.store.set(PERSONA_KEY, value) {
            warn!("persona could not be persisted; keeping in-memory value only");
        }
    }

    /// The persona in request shape: `None` for the unset sentinel.
    pub fn persona_for_request(&self) -> Option<String> {
        let value = self.value.lock().unwrap();
        if value.is_empty() {
            None
        } else {
            Some(value.clone())
        }
    }
}
