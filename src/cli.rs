//! Command-line interface definition for sekha-cli
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for searching, storing, exporting, and pruning
//! conversations held by a Sekha memory controller.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sekha CLI - Memory management from the command line
///
/// Search, store, label, export, and prune conversations held by a
/// Sekha memory controller.
#[derive(Parser, Debug, Clone)]
#[command(name = "sekha")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sekha controller API URL (overrides config)
    #[arg(long, env = "SEKHA_API_URL")]
    pub api_url: Option<String>,

    /// Sekha API key (overrides config)
    #[arg(long, env = "SEKHA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Search conversations with a semantic query
    ///
    /// Example: sekha query "token limits" --label Work --limit 10
    Query {
        /// Search text
        query: String,

        /// Filter by label
        #[arg(long)]
        label: Option<String>,

        /// Max results
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["json", "text"])]
        format: String,
    },

    /// Store a conversation from a JSON file
    ///
    /// Example: sekha store --file conversation.json --label "Imported"
    Store {
        /// JSON file with a `messages` array
        #[arg(long)]
        file: PathBuf,

        /// Label for the conversation
        #[arg(long)]
        label: String,
    },

    /// Manage conversation labels
    Labels {
        #[command(subcommand)]
        command: LabelsCommand,
    },

    /// Conversation operations
    Conversation {
        #[command(subcommand)]
        command: ConversationCommand,
    },

    /// Prune low-importance conversations
    ///
    /// Example: sekha prune --dry-run
    Prune {
        /// Show what would be pruned without doing it
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Stop archiving at the first failure
        #[arg(long)]
        stop_on_error: bool,
    },

    /// Export conversations by label
    ///
    /// Example: sekha export --label "Project:AI" --output backup.md
    Export {
        /// Export conversations with this label
        #[arg(long)]
        label: String,

        /// Output file path
        #[arg(long)]
        output: PathBuf,

        /// Export format
        #[arg(long, default_value = "markdown", value_parser = ["markdown", "json"])]
        format: String,
    },

    /// Configure default connection settings
    Config {
        /// Set default API URL
        #[arg(long, default_value = crate::config::DEFAULT_BASE_URL)]
        api_url: String,

        /// Set default API key
        #[arg(long)]
        api_key: Option<String>,
    },
}

/// Label subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LabelsCommand {
    /// List all labels with conversation counts
    List,
}

/// Conversation subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConversationCommand {
    /// Show conversation details
    Show {
        /// Conversation identifier
        conversation_id: String,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["json", "markdown", "text"])]
        format: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            config: None,
            verbose: false,
            command: Commands::Labels {
                command: LabelsCommand::List,
            },
        }
    }
}
