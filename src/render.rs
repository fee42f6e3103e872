//! Document rendering for exports and conversation detail views
//!
//! Everything here is pure formatting over already-fetched data; no
//! function in this module talks to the memory service.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SekhaError};
use crate::service::Conversation;

/// Number of characters of each message shown in the plain text view
pub const TEXT_PREVIEW_CHARS: usize = 100;

/// Placeholder for conversations without a creation timestamp
const UNKNOWN_CREATED_AT: &str = "Unknown";

/// Supported export document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
}

impl FromStr for ExportFormat {
    type Err = SekhaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(SekhaError::Validation(format!(
                "Unsupported format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Output formats for a single conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for DetailFormat {
    type Err = SekhaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(SekhaError::Validation(format!(
                "Unsupported format: {}",
                other
            ))),
        }
    }
}

/// Upper-case the first character of a role and lower-case the rest
///
/// # Examples
///
/// ```
/// use sekha_cli::render::capitalize_role;
///
/// assert_eq!(capitalize_role("assistant"), "Assistant");
/// assert_eq!(capitalize_role("USER"), "User");
/// assert_eq!(capitalize_role(""), "");
/// ```
pub fn capitalize_role(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Render conversations as a markdown document
///
/// Each conversation gets a level-1 heading directly followed by its
/// creation time and id lines, then one bold-role block per message and a
/// closing horizontal rule. An empty slice yields an empty document.
pub fn export_markdown(conversations: &[Conversation]) -> String {
    let mut output = String::new();

    for conv in conversations {
        output.push_str(&format!("# {}\n", conv.label_or_unknown()));
        output.push_str(&format!(
            "**Created:** {}\n",
            conv.created_at.as_deref().unwrap_or(UNKNOWN_CREATED_AT)
        ));
        output.push_str(&format!("**ID:** {}\n\n", conv.id));

        for msg in &conv.messages {
            output.push_str(&format!(
                "**{}:** {}\n\n",
                capitalize_role(&msg.role),
                msg.content
            ));
        }

        output.push_str("---\n\n");
    }

    output
}

/// Render conversations as a pretty-printed JSON array (2-space indent)
///
/// # Errors
///
/// Returns `SekhaError::Serialization` if serialization fails
pub fn export_json(conversations: &[Conversation]) -> Result<String> {
    serde_json::to_string_pretty(conversations)
        .map_err(|e| SekhaError::Serialization(e).into())
}

/// Render a single conversation for display
///
/// The plain text view always appends `...` after the first
/// [`TEXT_PREVIEW_CHARS`] characters of each message, whether or not the
/// content was actually cut.
///
/// # Errors
///
/// Returns `SekhaError::Serialization` if JSON serialization fails
pub fn render_conversation(conv: &Conversation, format: DetailFormat) -> Result<String> {
    match format {
        DetailFormat::Json => serde_json::to_string_pretty(conv)
            .map_err(|e| SekhaError::Serialization(e).into()),
        DetailFormat::Markdown => {
            let mut output = format!("# {}\n\n", conv.label_or_unknown());
            for msg in &conv.messages {
                output.push_str(&format!(
                    "**{}:** {}\n\n",
                    capitalize_role(&msg.role),
                    msg.content
                ));
            }
            Ok(output)
        }
        DetailFormat::Text => {
            let mut output = format!(
                "Label: {}\nCreated: {}\n\nMessages:\n",
                conv.label_or_unknown(),
                conv.created_at.as_deref().unwrap_or(UNKNOWN_CREATED_AT)
            );
            for msg in &conv.messages {
                let preview: String = msg.content.chars().take(TEXT_PREVIEW_CHARS).collect();
                output.push_str(&format!("  {}: {}...\n", msg.role, preview));
            }
            Ok(output)
        }
    }
}
