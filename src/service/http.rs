//! HTTP implementation of the memory service
//!
//! [`HttpMemoryService`] is the validated session through which every remote
//! operation is issued. It owns the normalized base address and the bearer
//! credential and converts transport failures into [`SekhaError`] values.
//!
//! Endpoints (all JSON, all under `{base_url}/api/v1`):
//!
//! - `POST /query` -- search
//! - `GET /conversations/{id}` -- fetch one conversation
//! - `POST /conversations` -- create
//! - `POST /conversations/{id}/archive` -- archive
//! - `GET /prune/suggestions` -- pruning suggestions

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::{Result, SekhaError};
use crate::service::{Conversation, MemoryService, Message, PruningSuggestion};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_PREFIX: &str = "/api/v1";

/// Validate a base address and strip trailing path separators
///
/// The address must parse as an absolute URL with an `http` or `https`
/// scheme and a host.
///
/// # Errors
///
/// Returns `SekhaError::Configuration` if the address is malformed or uses
/// another scheme
///
/// # Examples
///
/// ```
/// use sekha_cli::service::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://host/").unwrap(), "http://host");
/// assert!(normalize_base_url("not-a-url").is_err());
/// assert!(normalize_base_url("ftp://host").is_err());
/// ```
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| {
        SekhaError::Configuration(format!("Invalid URL format: {} ({})", trimmed, e))
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(SekhaError::Configuration(format!(
                "URL scheme must be http or https, got '{}': {}",
                other, trimmed
            ))
            .into())
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(SekhaError::Configuration(format!("URL has no host: {}", trimmed)).into());
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// HTTP session against a Sekha memory controller
///
/// Construction validates the base address, so configuration mistakes
/// surface immediately rather than mid-workflow. An empty credential is
/// accepted at construction but makes every operation fail fast with
/// `SekhaError::Configuration` before any request is sent.
///
/// # Examples
///
/// ```
/// use sekha_cli::service::HttpMemoryService;
///
/// let session = HttpMemoryService::new("http://localhost:8080/", "sk-test").unwrap();
/// assert_eq!(session.base_url(), "http://localhost:8080");
/// assert!(session.is_usable());
/// ```
#[derive(Clone)]
pub struct HttpMemoryService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for HttpMemoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMemoryService")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Conversation>,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    label: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SuggestionsResponse {
    #[serde(default)]
    suggestions: Vec<PruningSuggestion>,
}

impl HttpMemoryService {
    /// Create a session with the default request timeout
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if `base_url` is not an absolute
    /// http(s) URL with a host
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a session with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if the base address is invalid or
    /// the HTTP client cannot be built
    pub fn with_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sekha-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SekhaError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::debug!("Initialized memory service session: base_url={}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Normalized base address, without a trailing separator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the session carries a non-empty credential
    pub fn is_usable(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(SekhaError::Configuration(
                "API key required for remote operations".to_string(),
            )
            .into());
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Build `/conversations/{id}[/suffix]` with the id percent-encoded
    fn conversation_url(&self, id: &str, suffix: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint("/conversations"))
            .map_err(|e| SekhaError::Configuration(format!("Invalid endpoint URL: {}", e)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SekhaError::Configuration(format!("Base URL cannot be a base: {}", self.base_url))
            })?;
            segments.push(id);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response> {
        self.ensure_usable()?;

        request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("{} request failed: {}", operation, e);
                SekhaError::Remote(format!("{} request failed: {}", operation, e)).into()
            })
    }

    async fn ensure_success(response: Response, operation: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("{} returned error {}: {}", operation, status, body);
        Err(SekhaError::Remote(format!("{} returned {}: {}", operation, status, body)).into())
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", operation, e);
            SekhaError::Remote(format!("Failed to parse {} response: {}", operation, e)).into()
        })
    }
}

#[async_trait]
impl MemoryService for HttpMemoryService {
    async fn search(
        &self,
        query: &str,
        label: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Conversation>> {
        tracing::debug!(
            "Searching conversations: query={:?}, label={:?}, limit={}",
            query,
            label,
            limit
        );

        let body = SearchRequest {
            query,
            limit,
            label,
        };
        let request = self.client.post(self.endpoint("/query")).json(&body);
        let response = self.send(request, "search").await?;
        let response = Self::ensure_success(response, "search").await?;
        let parsed: SearchResponse = Self::parse_json(response, "search").await?;

        tracing::debug!("Search returned {} conversations", parsed.results.len());
        Ok(parsed.results)
    }

    async fn get(&self, id: &str) -> Result<Conversation> {
        tracing::debug!("Fetching conversation {}", id);

        let url = self.conversation_url(id, None)?;
        let response = self.send(self.client.get(url), "get").await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Conversation {} not found", id);
            return Err(SekhaError::NotFound(format!("conversation {}", id)).into());
        }

        let response = Self::ensure_success(response, "get").await?;
        Self::parse_json(response, "get").await
    }

    async fn create(&self, messages: &[Message], label: &str) -> Result<String> {
        if messages.is_empty() {
            return Err(SekhaError::Validation("No messages to store".to_string()).into());
        }

        tracing::debug!(
            "Creating conversation: label={}, messages={}",
            label,
            messages.len()
        );

        let body = CreateRequest { label, messages };
        let request = self.client.post(self.endpoint("/conversations")).json(&body);
        let response = self.send(request, "create").await?;
        let response = Self::ensure_success(response, "create").await?;
        let created: CreateResponse = Self::parse_json(response, "create").await?;

        tracing::info!("Created conversation {}", created.id);
        Ok(created.id)
    }

    async fn archive(&self, id: &str) -> Result<()> {
        tracing::debug!("Archiving conversation {}", id);

        let url = self.conversation_url(id, Some("archive"))?;
        let response = self.send(self.client.post(url), "archive").await?;
        Self::ensure_success(response, "archive").await?;
        Ok(())
    }

    async fn pruning_suggestions(&self) -> Result<Vec<PruningSuggestion>> {
        tracing::debug!("Fetching pruning suggestions");

        let request = self.client.get(self.endpoint("/prune/suggestions"));
        let response = self.send(request, "pruning suggestions").await?;
        let response = Self::ensure_success(response, "pruning suggestions").await?;
        let parsed: SuggestionsResponse =
            Self::parse_json(response, "pruning suggestions").await?;
        Ok(parsed.suggestions)
    }
}
