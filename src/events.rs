//! Session notifications delivered to the navigation collaborator.
//!
//! The controller owns conversation state but not screen flow; when a
//! session ends (sign-out, "new thread") it tells the embedding UI to
//! move, and nothing more.

/// Events emitted by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session was reset; return to the thread-selection screen.
    ReturnToStart,
}
