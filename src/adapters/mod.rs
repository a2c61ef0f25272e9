//! Adapter implementations of the collaborator traits.
//!
//! `ReqwestHttpClient` and `FileKeyValueStore` are the production
//! adapters; the `memory` module holds in-memory doubles used by tests
//! and by signed-out sessions that have no durable store to write to.

mod file_key_value;
pub mod memory;
mod reqwest_http;

pub use file_key_value::FileKeyValueStore;
pub use memory::{MemoryKeyValueStore, MemoryThreadStore};
pub use reqwest_http::ReqwestHttpClient;
