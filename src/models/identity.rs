use serde::{Deserialize, Serialize};

/// The authenticated identity a session is operating under.
///
/// Presence of an `Identity` means "signed in"; durable bookkeeping
/// (thread rows, metadata updates) is gated on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Stable user id from the auth provider
    pub user_id: String,
    /// Email, when the provider supplies one
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
