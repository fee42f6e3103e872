//! sekha-cli - Command-line client library for the Sekha memory controller
//!
//! This library provides the client adaptation layer between the command
//! line and a remote memory service that stores labeled conversations.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `service`: The [`service::MemoryService`] trait and its HTTP session
//! - `client`: Label aggregation, export, and conversation import
//! - `render`: Markdown, JSON, and plain text documents
//! - `prune`: Confirmation-gated pruning workflow
//! - `config`: Connection settings from file, environment, and flags
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line definition and handlers
//!
//! # Example
//!
//! ```no_run
//! use sekha_cli::SekhaClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SekhaClient::connect("http://localhost:8080", "sk-...")?;
//!     let markdown = client.export("Project:AI", "markdown").await?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod prune;
pub mod render;
pub mod service;

// Re-export commonly used types
pub use client::SekhaClient;
pub use config::Config;
pub use error::{Result, SekhaError};
pub use service::{Conversation, HttpMemoryService, Label, MemoryService, Message};

#[cfg(test)]
pub mod test_utils;
