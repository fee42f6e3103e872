/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint. Each
handler resolves its inputs, calls into [`SekhaClient`] or the pruning
workflow, and renders the result for the terminal.

- `conversations` - query, store, show and export
- `labels`        - label listing
- `prune`         - interactive pruning
- `config`        - saving default connection settings
*/

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Duration;

use crate::cli::{Cli, Commands, ConversationCommand, LabelsCommand};
use crate::client::SekhaClient;
use crate::config::Config;
use crate::error::Result;

pub mod config;
pub mod conversations;
pub mod labels;
pub mod prune;

/// Execute the parsed command line
///
/// Every command except `config` resolves configuration and opens a
/// client first; `config` only writes the file and never reads it.
///
/// # Errors
///
/// Returns the first error raised by configuration resolution or by the
/// command itself, with a short description of what failed attached as
/// context.
pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Config { api_url, api_key } => {
            tracing::info!("Saving default configuration");
            config::save_defaults(cli.config.as_deref(), api_url, api_key.as_deref())
                .context("Config failed")
        }
        Commands::Query {
            query,
            label,
            limit,
            format,
        } => {
            let client = open(&cli)?;
            tracing::info!("Running query");
            conversations::query(&client, query, label.as_deref(), *limit, format)
                .await
                .context("Search failed")
        }
        Commands::Store { file, label } => {
            let client = open(&cli)?;
            tracing::info!("Storing conversation from {}", file.display());
            conversations::store(&client, file, label)
                .await
                .context("Store failed")
        }
        Commands::Labels {
            command: LabelsCommand::List,
        } => {
            let client = open(&cli)?;
            labels::list(&client).await.context("List labels failed")
        }
        Commands::Conversation {
            command:
                ConversationCommand::Show {
                    conversation_id,
                    format,
                },
        } => {
            let client = open(&cli)?;
            conversations::show(&client, conversation_id, format)
                .await
                .context("Show conversation failed")
        }
        Commands::Prune {
            dry_run,
            yes,
            stop_on_error,
        } => {
            let client = open(&cli)?;
            tracing::info!("Starting pruning workflow");
            prune::run_prune(&client, *dry_run, *yes, *stop_on_error)
                .await
                .context("Prune failed")
        }
        Commands::Export {
            label,
            output,
            format,
        } => {
            let client = open(&cli)?;
            conversations::export(&client, label, output, format)
                .await
                .context("Export failed")
        }
    }
}

/// Resolve configuration for `cli` and open a client with it
fn open(cli: &Cli) -> Result<SekhaClient> {
    let config = Config::load(cli)?;
    config.validate()?;
    connect(&config)
}

/// Build a client from resolved configuration
///
/// # Errors
///
/// Returns `SekhaError::Configuration` if no API key is configured or the
/// base URL is invalid
pub fn connect(config: &Config) -> Result<SekhaClient> {
    let api_key = config.require_api_key()?;
    SekhaClient::connect_with_timeout(
        &config.base_url,
        api_key,
        Duration::from_secs(config.timeout_seconds),
    )
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is a no
///
/// # Errors
///
/// Returns error if the terminal cannot be read
pub fn confirm(prompt: &str) -> Result<bool> {
    let mut rl = DefaultEditor::new()?;
    match rl.readline(&format!("{} [y/N]: ", prompt)) {
        Ok(line) => Ok(is_affirmative(&line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Shorten `text` to `max` characters, appending `...`
pub(crate) fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    let head: String = text.chars().take(max).collect();
    format!("{}...", head)
}
