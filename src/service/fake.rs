//! In-process fake memory service for unit tests
//!
//! [`FakeMemoryService`] serves canned conversations and suggestions and
//! records every call it receives, so tests can assert on exactly which
//! remote operations were issued and in what order.
//!
//! The call log is shared through an `Arc`, so a test can keep a handle via
//! [`FakeMemoryService::calls`] after moving the service into a client.

use async_trait::async_trait;
use serde_json::Map;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::{Result, SekhaError};
use crate::service::{Conversation, MemoryService, Message, PruningSuggestion};

/// A recorded call against the fake service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search {
        query: String,
        label: Option<String>,
        limit: usize,
    },
    Get(String),
    Create {
        label: String,
        messages: usize,
    },
    Archive(String),
    PruningSuggestions,
}

/// Shared, inspectable call log
pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// In-memory [`MemoryService`] used by unit tests
#[derive(Debug, Default)]
pub struct FakeMemoryService {
    conversations: Vec<Conversation>,
    suggestions: Vec<PruningSuggestion>,
    failing_archives: HashSet<String>,
    calls: CallLog,
}

impl FakeMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(mut self, conversations: Vec<Conversation>) -> Self {
        self.conversations = conversations;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<PruningSuggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Make `archive(id)` fail with a remote error
    pub fn failing_archive(mut self, id: &str) -> Self {
        self.failing_archives.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

/// Build a conversation with `(role, content)` messages
pub fn conversation(id: &str, label: &str, messages: &[(&str, &str)]) -> Conversation {
    Conversation {
        id: id.to_string(),
        label: Some(label.to_string()),
        created_at: Some("2024-01-01T00:00:00Z".to_string()),
        messages: messages
            .iter()
            .map(|(role, content)| Message::new(*role, *content))
            .collect(),
        preview: None,
        extra: Map::new(),
    }
}

pub fn suggestion(id: &str, reason: &str) -> PruningSuggestion {
    PruningSuggestion {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl MemoryService for FakeMemoryService {
    async fn search(
        &self,
        query: &str,
        label: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Conversation>> {
        self.record(Call::Search {
            query: query.to_string(),
            label: label.map(str::to_string),
            limit,
        });
        Ok(self
            .conversations
            .iter()
            .filter(|c| label.map_or(true, |l| c.label.as_deref() == Some(l)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Conversation> {
        self.record(Call::Get(id.to_string()));
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| SekhaError::NotFound(format!("conversation {}", id)).into())
    }

    async fn create(&self, messages: &[Message], label: &str) -> Result<String> {
        self.record(Call::Create {
            label: label.to_string(),
            messages: messages.len(),
        });
        Ok(format!("conv-{}", self.conversations.len() + 1))
    }

    async fn archive(&self, id: &str) -> Result<()> {
        self.record(Call::Archive(id.to_string()));
        if self.failing_archives.contains(id) {
            return Err(SekhaError::Remote(format!("archive returned 500: {}", id)).into());
        }
        Ok(())
    }

    async fn pruning_suggestions(&self) -> Result<Vec<PruningSuggestion>> {
        self.record(Call::PruningSuggestions);
        Ok(self.suggestions.clone())
    }
}
