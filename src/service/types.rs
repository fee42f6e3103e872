//! Data types exchanged with the memory service
//!
//! Conversations and messages are owned by the remote service; the client
//! only ever holds transient, read-only copies fetched per call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single message inside a conversation
///
/// `role` is kept as free text rather than a closed enum because the service
/// may introduce new roles at any time.
///
/// # Examples
///
/// ```
/// use sekha_cli::service::Message;
///
/// let msg = Message::new("user", "Hello");
/// assert_eq!(msg.role, "user");
/// assert_eq!(msg.content, "Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role tag such as `user` or `assistant`
    #[serde(default = "default_role")]
    pub role: String,
    /// Message text
    #[serde(default)]
    pub content: String,
}

fn default_role() -> String {
    "unknown".to_string()
}

impl Message {
    /// Create a message with the given role and content
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Name used for conversations that carry no label
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A labeled conversation as returned by the service
///
/// Search results may omit `created_at` and `messages` and carry a short
/// `preview` instead; `get` returns the full record. Absent fields stay
/// absent when the record is serialized again, and fields this client does
/// not know about are kept in `extra`. Known fields serialize first, in the
/// order `id`, `label`, `created_at`, `messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Opaque unique identifier
    pub id: String,
    /// Free-text label; not unique across conversations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Creation timestamp, kept as the service's opaque string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Ordered messages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// Short preview text supplied by search results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Service fields with no dedicated slot, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Conversation {
    /// The label, or [`UNKNOWN_LABEL`] when the service sent none
    pub fn label_or_unknown(&self) -> &str {
        self.label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

/// A derived label statistic
///
/// Counts are computed by the client from search results and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,
    /// Number of conversations carrying the label
    pub count: usize,
}

/// A service-computed recommendation to archive a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningSuggestion {
    /// Conversation identifier
    #[serde(alias = "conversation_id")]
    pub id: String,
    /// Human-readable reason
    #[serde(default)]
    pub reason: String,
}

/// Result of storing a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConversation {
    /// Identifier assigned by the service
    pub id: String,
    /// Label the conversation was stored under
    pub label: String,
}
