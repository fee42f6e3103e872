//! Error types for sekha-cli
//!
//! This module defines the error kinds surfaced by the client adaptation
//! layer, using `thiserror` for ergonomic error handling.
//!
//! Four kinds form the contract with callers: [`SekhaError::Configuration`],
//! [`SekhaError::Validation`], [`SekhaError::NotFound`] and
//! [`SekhaError::Remote`]. The remaining variants cover local I/O performed by
//! the command layer and the config loader.

use thiserror::Error;

/// Main error type for sekha-cli operations
///
/// Every failure of a remote call is normalized into one of the contract
/// kinds before it leaves the service session; transport errors from
/// `reqwest` are never returned directly.
#[derive(Error, Debug)]
pub enum SekhaError {
    /// Invalid base address or missing connection parameter
    ///
    /// Always detected before any network call is attempted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied content violates a precondition
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote service reports the referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport, protocol, or server-side failure
    #[error("Remote error: {0}")]
    Remote(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SekhaError {
    /// Short, stable name of the error kind
    ///
    /// # Examples
    ///
    /// ```
    /// use sekha_cli::error::SekhaError;
    ///
    /// let error = SekhaError::NotFound("conv-1".to_string());
    /// assert_eq!(error.kind(), "not_found");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Remote(_) => "remote",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
        }
    }
}

/// Result type alias for sekha-cli operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type.
/// Callers that need to branch on the error kind recover it with
/// `err.downcast_ref::<SekhaError>()`.
pub type Result<T> = anyhow::Result<T>;

/// Look up the [`SekhaError`] carried by an `anyhow::Error`, if any
///
/// Walks the error chain so that kinds survive `anyhow::Context` wrapping.
pub fn error_kind(error: &anyhow::Error) -> Option<&SekhaError> {
    error.chain().find_map(|cause| cause.downcast_ref::<SekhaError>())
}
