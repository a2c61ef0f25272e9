use serde::{Deserialize, Serialize};

use super::deserialize_reference_kind;

/// Confidence level the backend attaches to an answer.
///
/// The server has sent both lowercase and capitalized spellings, so both
/// are accepted on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

/// Kind of source a reference quote came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Intern,
    Professional,
    #[default]
    Other,
}

/// A supporting citation attached to an assistant reply.
///
/// Read-only; sourced entirely from backend responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reference {
    /// Quoted passage backing the answer
    pub quote: String,
    /// Display name of the source
    pub source: String,
    /// Source's role or job title
    pub role: String,
    /// Employer, if known
    #[serde(default)]
    pub company: Option<String>,
    /// University, if known
    #[serde(default)]
    pub university: Option<String>,
    /// Kind of source (unknown kinds degrade to `Other`)
    #[serde(
        default,
        rename = "type",
        deserialize_with = "deserialize_reference_kind"
    )]
    pub kind: ReferenceKind,
    /// LinkedIn profile URL, if known
    #[serde(default, rename = "linkedinProfile")]
    pub linkedin_profile: Option<String>,
    /// Wall Street Oasis profile URL, if known
    #[serde(default, rename = "wsoLink")]
    pub wso_link: Option<String>,
}

/// Structured reply body from `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsePayload {
    /// The answer text
    #[serde(rename = "mainResponse")]
    pub main_response: String,
    /// Backend's confidence in the answer
    #[serde(default)]
    pub confidence: Option<Confidence>,
    /// Supporting citations
    #[serde(default)]
    pub references: Vec<Reference>,
    /// Total number of sources consulted (may exceed `references.len()`)
    #[serde(default, rename = "referencesCount")]
    pub references_count: Option<u32>,
    /// Persona the answer was targeted at, echoed back
    #[serde(default, rename = "targetPersona")]
    pub target_persona: Option<String>,
    /// Suggested follow-up questions
    #[serde(default, rename = "followupRecs")]
    pub followup_recs: Vec<String>,
}

/// A single entry in a conversation transcript.
///
/// Messages are immutable once appended; the transcript is append-only and
/// ordering is append order. User messages carry only `text`; assistant
/// messages carry the structured metadata from the backend reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message body
    pub text: String,
    /// `true` for assistant-authored entries
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    /// `true` for synthetic error entries shown in place of a reply
    #[serde(default, rename = "isError")]
    pub is_error: bool,
    /// Backend's confidence in the answer
    #[serde(default)]
    pub confidence: Option<Confidence>,
    /// Supporting citations
    #[serde(default)]
    pub references: Vec<Reference>,
    /// Total number of sources consulted
    #[serde(default, rename = "referencesCount")]
    pub references_count: Option<u32>,
    /// Persona the answer was targeted at
    #[serde(default, rename = "targetPersona")]
    pub target_persona: Option<String>,
    /// Suggested follow-up questions
    #[serde(default, rename = "followupRecs")]
    pub followup_recs: Vec<String>,
}

impl Message {
    /// Create a user-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_ai: false,
            is_error: false,
            confidence: None,
            references: Vec::new(),
            references_count: None,
            target_persona: None,
            followup_recs: Vec::new(),
        }
    }

    /// Create a synthetic assistant-authored error entry.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_ai: true,
            is_error: true,
            confidence: None,
            references: Vec::new(),
            references_count: None,
            target_persona: None,
            followup_recs: Vec::new(),
        }
    }
}

impl From<ResponsePayload> for Message {
    fn from(response: ResponsePayload) -> Self {
        Self {
            text: response.main_response,
            is_ai: true,
            is_error: false,
            confidence: response.confidence,
            references: response.references,
            references_count: response.references_count,
            target_persona: response.target_persona,
            followup_recs: response.followup_recs,
        }
    }
}

impl From<&Message> for ResponsePayload {
    fn from(message: &Message) -> Self {
        Self {
            main_response: message.text.clone(),
            confidence: message.confidence,
            references: message.references.clone(),
            references_count: message.references_count,
            target_persona: message.target_persona.clone(),
            followup_recs: message.followup_recs.clone(),
        }
    }
}
