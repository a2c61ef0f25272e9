//! Message session controller.
//!
//! The state machine at the heart of the client: owns the in-memory
//! transcript for the active thread, enforces single-flight sending,
//! reconciles optimistic appends with backend replies, and handles the
//! loading / error / ready lifecycle.

mod controller;
mod state;

pub use controller::{SessionController, DEFAULT_FIELD, LOAD_ERROR_TEXT, SEND_ERROR_TEXT};
pub use state::{SessionPhase, SessionState};
