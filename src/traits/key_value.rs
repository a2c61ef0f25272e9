//! Key-value preference store abstraction.
//!
//! The persona string survives across sessions in a small client-side
//! key-value store (a preferences file on disk in production). Reads and
//! writes are synchronous and best-effort; a store that cannot persist
//! simply degrades the caller to in-memory behavior.

/// Trait over the client-side key-value preference store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Returns `false` when the write could
    /// not be persisted; callers treat that as a silent degradation.
    fn set(&self, key: &str, value: &str) -> bool;
}
