//! Memory service abstraction
//!
//! The remote memory service exposes five raw capabilities. They are
//! modeled as a single [`MemoryService`] trait, implemented over HTTP by
//! [`HttpMemoryService`]. Everything above this layer (label aggregation,
//! export, pruning) is written against the trait so it can be exercised
//! without a network.
//!
//! Available implementations:
//!
//! - [`http::HttpMemoryService`] -- JSON over HTTP with a bearer credential
//! - `fake::FakeMemoryService` -- in-process fake used in tests (cfg(test)
//!   only)

use async_trait::async_trait;

use crate::error::Result;

pub mod http;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use http::{normalize_base_url, HttpMemoryService};
pub use types::{Conversation, Label, Message, PruningSuggestion, StoredConversation};

/// Raw operations offered by the remote memory service
///
/// Implementations issue at most one outstanding call at a time and must
/// normalize every failure into a [`crate::error::SekhaError`] before
/// returning it.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use sekha_cli::error::Result;
/// use sekha_cli::service::{Conversation, MemoryService, Message, PruningSuggestion};
///
/// struct Empty;
///
/// #[async_trait]
/// impl MemoryService for Empty {
///     async fn search(&self, _q: &str, _l: Option<&str>, _n: usize) -> Result<Vec<Conversation>> {
///         Ok(Vec::new())
///     }
///     async fn get(&self, id: &str) -> Result<Conversation> {
///         Err(sekha_cli::error::SekhaError::NotFound(id.to_string()).into())
///     }
///     async fn create(&self, _m: &[Message], _l: &str) -> Result<String> {
///         Ok("conv-1".to_string())
///     }
///     async fn archive(&self, _id: &str) -> Result<()> {
///         Ok(())
///     }
///     async fn pruning_suggestions(&self) -> Result<Vec<PruningSuggestion>> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait MemoryService: Send + Sync {
    /// Semantic search over stored conversations
    ///
    /// An empty `query` matches every conversation. At most `limit`
    /// results are returned, in the order the service ranks them.
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Remote` if the call fails for any reason
    async fn search(
        &self,
        query: &str,
        label: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Conversation>>;

    /// Fetch a full conversation by identifier
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::NotFound` if the id is unknown to the service,
    /// `SekhaError::Remote` otherwise
    async fn get(&self, id: &str) -> Result<Conversation>;

    /// Create a conversation and return its new identifier
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Validation` if `messages` is empty, before any
    /// network call
    async fn create(&self, messages: &[Message], label: &str) -> Result<String>;

    /// Transition a conversation to the archived state
    ///
    /// Archiving an already-archived conversation is not special-cased.
    async fn archive(&self, id: &str) -> Result<()>;

    /// List conversations the service recommends for archival
    async fn pruning_suggestions(&self) -> Result<Vec<PruningSuggestion>>;
}
