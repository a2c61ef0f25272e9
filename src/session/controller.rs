//! Session controller: the conversation state machine.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, warn};

use crate::error::ClientError;
use crate::events::SessionEvent;
use crate::models::{FeedbackRecord, Identity, Message, Thread};
use crate::persona::PersonaStore;
use crate::repository::ThreadRepository;
use crate::session::state::{SessionPhase, SessionState};

/// Field the conversation is scoped to until the embedding UI says otherwise.
pub const DEFAULT_FIELD: &str = "finance";

/// Transcript entry shown when a send fails.
pub const SEND_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Transcript entry shown when history cannot be loaded.
pub const LOAD_ERROR_TEXT: &str = "Error loading messages. Please try again.";

/// Owns the active conversation and drives its state machine.
///
/// All methods take `&self`; state lives behind a mutex so the guard
/// flags are checked-and-set atomically. The lock is never held across
/// an await. Suspended calls tag themselves with the session generation
/// captured at initiation and discard their result if a newer activation
/// or reset has superseded them.
pub struct SessionController {
    repository: Arc<ThreadRepository>,
    persona: Arc<PersonaStore>,
    state: Mutex<SessionState>,
    identity: Mutex<Option<Identity>>,
    field: Mutex<String>,
    /// The literal first message of the current activation. A send whose
    /// text matches it skips the optimistic append, so a redelivered
    /// activation cannot double-insert the user's opening message.
    initial_message: Mutex<Option<String>>,
    events: UnboundedSender<SessionEvent>,
}

impl SessionController {
    /// Create a controller. `events` carries navigation notifications
    /// back to the embedding UI.
    pub fn new(
        repository: Arc<ThreadRepository>,
        persona: Arc<PersonaStore>,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            repository,
            persona,
            state: Mutex::new(SessionState::new()),
            identity: Mutex::new(None),
            field: Mutex::new(DEFAULT_FIELD.to_string()),
            initial_message: Mutex::new(None),
            events,
        }
    }

    /// A clone of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    /// The transcript for the active thread, in append order.
    pub fn messages(&self) -> Vec<Message> {
        self.state.lock().unwrap().messages.clone()
    }

    /// The active thread id, if a thread is active.
    pub fn active_thread_id(&self) -> Option<String> {
        self.state.lock().unwrap().active_thread_id.clone()
    }

    /// True while history is loading or a send is pending.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().is_loading
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.lock().unwrap().phase
    }

    /// The topical field attached to outgoing messages.
    pub fn field(&self) -> String {
        self.field.lock().unwrap().clone()
    }

    /// Change the topical field for subsequent sends.
    pub fn set_field(&self, field: &str) {
        *self.field.lock().unwrap() = field.to_string();
    }

    /// The identity the session is operating under.
    pub fn identity(&self) -> Option<Identity> {
        self.identity.lock().unwrap().clone()
    }

    /// Record an identity transition.
    ///
    /// A present-to-absent transition (sign-out) resets the session
    /// regardless of its current state and tells the UI to return to the
    /// thread-selection screen. Signing in changes nothing by itself —
    /// there is no auto-resume.
    pub fn set_identity(&self, next: Option<Identity>) {
        let previous = {
            let mut identity = self.identity.lock().unwrap();
            std::mem::replace(&mut *identity, next.clone())
        };

        if previous.is_some() && next.is_none() {
            debug!("identity cleared; resetting session");
            self.reset();
            let _ = self.events.send(SessionEvent::ReturnToStart);
        }
    }

    /// Tear the session down to idle.
    pub fn reset(&self) {
        self.state.lock().unwrap().reset();
        *self.initial_message.lock().unwrap() = None;
    }

    /// Create a thread from a first message and activate it.
    ///
    /// The thread is minted by the backend (and bookkept in the durable
    /// store when signed in); on success the session activates with the
    /// initial message, which immediately goes out as the first send.
    /// Returns the new thread id.
    pub async fn start_thread(&self, initial_message: &str) -> Result<String, ClientError> {
        let identity = self.identity();
        let created = self
            .repository
            .create_thread(initial_message, identity.as_ref())
            .await?;
        self.activate(&created.thread_id, Some(initial_message)).await;
        Ok(created.thread_id)
    }

    /// Activate a thread, the single entry point for both activation
    /// shapes.
    ///
    /// With an initial message: seeds the transcript with the user's
    /// opening message and sends it. Without: loads the thread's history.
    /// Each call is one logical activation — it bumps the session
    /// generation, so anything still in flight for the previous session
    /// is discarded on completion. A redelivery of the same activation
    /// (same thread, same initial literal, already active) is a no-op.
    pub async fn activate(&self, thread_id: &str, initial_message: Option<&str>) {
        let tracked = self.initial_message.lock().unwrap().clone();
        let generation = {
            let mut state = self.state.lock().unwrap();
            if initial_message.is_some()
                && state.active_thread_id.as_deref() == Some(thread_id)
                && tracked.as_deref() == initial_message
            {
                debug!(thread_id, "duplicate activation ignored");
                return;
            }
            state.begin_activation(thread_id)
        };
        *self.initial_message.lock().unwrap() = initial_message.map(str::to_string);

        match initial_message {
            Some(text) => {
                {
                    let mut state = self.state.lock().unwrap();
                    state.messages.push(Message::user(text));
                }
                self.send_tagged(text, generation, false).await;
            }
            None => self.load_history(thread_id, generation).await,
        }
    }

    /// Handle a selection from the thread list.
    ///
    /// `Some(id)` resumes that thread; `None` ("new thread") resets the
    /// session and returns the UI to the thread-selection screen.
    pub async fn select_thread(&self, selection: Option<&str>) {
        match selection {
            Some(thread_id) => self.activate(thread_id, None).await,
            None => {
                self.reset();
                let _ = self.events.send(SessionEvent::ReturnToStart);
            }
        }
    }

    /// Send a user message on the active thread.
    ///
    /// No-op while another send is in flight (the single-flight guard —
    /// rapid double-submission produces one request and one optimistic
    /// entry). Follow-up suggestion clicks go through here unchanged.
    pub async fn send(&self, text: &str) {
        let generation = self.state.lock().unwrap().generation;
        let is_initial = self.initial_message.lock().unwrap().as_deref() == Some(text);
        self.send_tagged(text, generation, !is_initial).await;
    }

    /// Submit feedback on an assistant reply. Persistence failures are
    /// logged and never surface to the conversation.
    pub async fn give_feedback(&self, message: &Message, choice: &str) {
        if !message.is_ai || message.is_error {
            debug!("feedback ignored for non-assistant entry");
            return;
        }
        let record = FeedbackRecord::new(message, choice);
        if let Err(err) = self.repository.submit_feedback(&record).await {
            warn!(%err, "feedback could not be saved");
        }
    }

    /// Threads owned by the current identity, newest first.
    ///
    /// Store failures degrade to an empty list: the thread picker renders
    /// empty rather than crashing.
    pub async fn owned_threads(&self) -> Vec<Thread> {
        let Some(identity) = self.identity() else {
            return Vec::new();
        };
        match self.repository.list_threads(&identity.user_id).await {
            Ok(threads) => threads,
            Err(err) => {
                warn!(%err, "failed to load threads");
                Vec::new()
            }
        }
    }

    /// The send transition, tagged with the generation it belongs to.
    ///
    /// Guard check, guard set, and the optimistic append all happen in
    /// one critical section before the await, so appends are serialized
    /// in initiation order. The guard is released on every completion
    /// path; when the generation has moved on, the superseding
    /// activation/reset already released it.
    async fn send_tagged(&self, text: &str, generation: u64, append_user: bool) {
        let thread_id = {
            let mut state = self.state.lock().unwrap();
            if state.generation != generation {
                debug!("send for a superseded session ignored");
                return;
            }
            if state.send_in_flight {
                debug!("send ignored: a request is already in flight");
                return;
            }
            let Some(thread_id) = state.active_thread_id.clone() else {
                warn!("send with no active thread ignored");
                return;
            };
            state.send_in_flight = true;
            state.is_loading = true;
            state.phase = SessionPhase::Sending;
            if append_user {
                state.messages.push(Message::user(text));
            }
            thread_id
        };

        // Read at send time, not queue time: persona edits made right up
        // to submission are honored.
        let persona = self.persona.persona_for_request();
        let field = self.field();
        let authenticated = self.identity().is_some();

        let result = self
            .repository
            .send_message(text, &thread_id, persona.as_deref(), &field, authenticated)
            .await;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!(%thread_id, "late reply for a superseded session discarded");
            return;
        }
        match result {
            Ok(message) => state.messages.push(message),
            Err(err) => {
                error!(%err, "send failed");
                state.messages.push(Message::error(SEND_ERROR_TEXT));
            }
        }
        state.send_in_flight = false;
        state.is_loading = false;
        state.phase = SessionPhase::Ready;
    }

    /// The resume transition: fetch history and replace the transcript.
    async fn load_history(&self, thread_id: &str, generation: u64) {
        {
            let mut state = self.state.lock().unwrap();
            if state.generation != generation {
                return;
            }
            state.phase = SessionPhase::LoadingHistory;
            state.is_loading = true;
        }

        let result = self.repository.fetch_messages(thread_id).await;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!(%thread_id, "late history load for a superseded session discarded");
            return;
        }
        match result {
            Ok(messages) => state.messages = messages,
            Err(err) => {
                error!(%err, "failed to load thread history");
                state.messages = vec![Message::error(LOAD_ERROR_TEXT)];
            }
        }
        state.is_loading = false;
        state.phase = SessionPhase::Ready;
    }
}
