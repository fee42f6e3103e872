//! High-level client operations
//!
//! [`SekhaClient`] turns the five raw [`MemoryService`] operations into the
//! operations the command surface needs: label aggregation, label-filtered
//! export, conversation import from a file, and pass-through access for
//! queries, detail views and archival.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SekhaError};
use crate::render::{self, ExportFormat};
use crate::service::{
    Conversation, HttpMemoryService, Label, MemoryService, Message, PruningSuggestion,
    StoredConversation,
};

/// Limit used when an operation needs every conversation
///
/// Aggregation issues one search with this limit instead of paging, so
/// conversations beyond it are not counted.
pub const ALL_CONVERSATIONS_LIMIT: usize = 1000;

/// Shape of a conversation import file
///
/// A `null` or missing `messages` key is treated like an empty list.
#[derive(Debug, Deserialize)]
struct ConversationFile {
    #[serde(default)]
    messages: Option<Vec<Message>>,
}

/// Client for Sekha memory operations
///
/// # Examples
///
/// ```no_run
/// use sekha_cli::SekhaClient;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = SekhaClient::connect("http://localhost:8080", "sk-test")?;
/// for label in client.list_labels().await? {
///     println!("{} ({})", label.name, label.count);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SekhaClient {
    service: Box<dyn MemoryService>,
}

impl SekhaClient {
    /// Wrap an existing memory service
    pub fn new(service: impl MemoryService + 'static) -> Self {
        Self {
            service: Box::new(service),
        }
    }

    /// Open an HTTP session against `base_url`
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if `base_url` is invalid
    pub fn connect(base_url: &str, api_key: &str) -> Result<Self> {
        Ok(Self::new(HttpMemoryService::new(base_url, api_key)?))
    }

    /// Open an HTTP session with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if `base_url` is invalid
    pub fn connect_with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::new(HttpMemoryService::with_timeout(
            base_url, api_key, timeout,
        )?))
    }

    /// Search conversations with a semantic query
    pub async fn query(
        &self,
        query: &str,
        label: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Conversation>> {
        self.service.search(query, label, limit).await
    }

    /// Store a conversation read from a JSON file
    ///
    /// The file must contain a non-empty `messages` array of
    /// `{role, content}` objects.
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Validation` if `messages` is absent or empty;
    /// no remote call is made in that case. Returns `SekhaError::Io` or
    /// `SekhaError::Serialization` if the file cannot be read or parsed.
    pub async fn store_conversation(
        &self,
        file_path: impl AsRef<Path>,
        label: &str,
    ) -> Result<StoredConversation> {
        let file_path = file_path.as_ref();
        let contents = std::fs::read_to_string(file_path).map_err(SekhaError::Io)?;
        let data: ConversationFile =
            serde_json::from_str(&contents).map_err(SekhaError::Serialization)?;

        let messages = data.messages.unwrap_or_default();
        if messages.is_empty() {
            return Err(SekhaError::Validation(format!(
                "No messages found in file: {}",
                file_path.display()
            ))
            .into());
        }

        tracing::debug!(
            "Storing {} messages from {} under label {}",
            messages.len(),
            file_path.display(),
            label
        );

        let id = self.service.create(&messages, label).await?;
        Ok(StoredConversation {
            id,
            label: label.to_string(),
        })
    }

    /// List every label with its conversation count, sorted by name
    ///
    /// Counts are derived from a single "match everything" search; labels
    /// with no conversations never appear.
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        let conversations = self.all_conversations().await?;
        Ok(count_labels(&conversations))
    }

    /// Export every conversation carrying `label` in the requested format
    ///
    /// Matching is exact and case-sensitive. A label with no conversations
    /// produces an empty document, not an error.
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Validation` for an unsupported format, before
    /// any remote call
    pub async fn export(&self, label: &str, format: &str) -> Result<String> {
        let format: ExportFormat = format.parse()?;

        let conversations: Vec<Conversation> = self
            .all_conversations()
            .await?
            .into_iter()
            .filter(|c| c.label.as_deref() == Some(label))
            .collect();

        tracing::info!(
            "Exporting {} conversations with label {} as {}",
            conversations.len(),
            label,
            format
        );

        match format {
            ExportFormat::Markdown => Ok(render::export_markdown(&conversations)),
            ExportFormat::Json => render::export_json(&conversations),
        }
    }

    /// Fetch a full conversation
    pub async fn get_conversation(&self, conversation_id: &str) -> Result<Conversation> {
        self.service.get(conversation_id).await
    }

    /// Fetch the service's current pruning suggestions
    pub async fn get_pruning_suggestions(&self) -> Result<Vec<PruningSuggestion>> {
        self.service.pruning_suggestions().await
    }

    /// Archive a conversation
    pub async fn archive(&self, conversation_id: &str) -> Result<()> {
        self.service.archive(conversation_id).await
    }

    async fn all_conversations(&self) -> Result<Vec<Conversation>> {
        let conversations = self
            .service
            .search("", None, ALL_CONVERSATIONS_LIMIT)
            .await?;
        if conversations.len() >= ALL_CONVERSATIONS_LIMIT {
            tracing::warn!(
                "Search returned {} conversations; results beyond this limit are not included",
                ALL_CONVERSATIONS_LIMIT
            );
        }
        Ok(conversations)
    }
}

/// Fold conversations into label counts ordered by label name
fn count_labels(conversations: &[Conversation]) -> Vec<Label> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for conv in conversations {
        *counts.entry(conv.label_or_unknown()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(name, count)| Label {
            name: name.to_string(),
            count,
        })
        .collect()
}
