//! Session state record.
//!
//! `SessionState` is the single source of truth for the active
//! conversation. It is owned by the controller; the guard flags
//! (`send_in_flight`) and the activation `generation` are checked and set
//! inside one synchronous critical section, so transitions are never
//! re-entrant.

use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Lifecycle phase of the active session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No active thread
    #[default]
    Idle,
    /// An existing thread was selected; history is being fetched
    LoadingHistory,
    /// Transcript displayed, nothing in flight
    Ready,
    /// Exactly one send in flight
    Sending,
}

/// In-memory state for the active thread.
///
/// The transcript is append-only: entries are never edited or reordered
/// once pushed, so consumers can diff by length.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionState {
    /// The active thread, if any
    pub active_thread_id: Option<String>,
    /// Transcript for the active thread, in append order
    pub messages: Vec<Message>,
    /// Lifecycle phase
    pub phase: SessionPhase,
    /// True while history is loading or a send is pending
    pub is_loading: bool,
    /// Single-flight guard: true while a send is outstanding
    pub send_in_flight: bool,
    /// Monotonic activation counter. Results of suspended calls are
    /// applied only if the generation they captured is still current.
    pub generation: u64,
}

impl SessionState {
    /// Create a fresh idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new logical session on `thread_id`.
    ///
    /// Clears the transcript, releases the guard flags, and bumps the
    /// generation so results from the previous session are discarded.
    /// Returns the new generation for in-flight tagging.
    pub fn begin_activation(&mut self, thread_id: &str) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.active_thread_id = Some(thread_id.to_string());
        self.messages = Vec::new();
        self.phase = SessionPhase::Idle;
        self.is_loading = false;
        self.send_in_flight = false;
        self.generation
    }

    /// Tear the session down to idle (sign-out, "new thread").
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.active_thread_id = None;
        self.messages = Vec::new();
        self.phase = SessionPhase::Idle;
        self.is_loading = false;
        self.send_in_flight = false;
    }
}
