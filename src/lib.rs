//! HUMINT client core — thread and message session management
//!
//! This crate is the conversation engine of the HUMINT client: it owns
//! thread and message state, enforces single-flight sending, reconciles
//! optimistic appends with backend replies, and keeps the targeting
//! persona persisted across sessions. Rendering and screen flow belong
//! to the embedding UI, which drives the [`session::SessionController`]
//! and listens on its event channel.

pub mod adapters;
pub mod error;
pub mod events;
pub mod models;
pub mod navigation;
pub mod persona;
pub mod repository;
pub mod session;
pub mod traits;
