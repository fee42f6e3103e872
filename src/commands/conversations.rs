//! Conversation commands: query, store, show and export

use colored::Colorize;
use prettytable::{row, Table};
use std::path::Path;

use crate::client::SekhaClient;
use crate::commands::truncate_with_ellipsis;
use crate::error::{Result, SekhaError};
use crate::render::{self, DetailFormat};
use crate::service::Conversation;

const ID_COLUMN_CHARS: usize = 12;
const PREVIEW_COLUMN_CHARS: usize = 100;

/// Search conversations and print the results
pub async fn query(
    client: &SekhaClient,
    query: &str,
    label: Option<&str>,
    limit: usize,
    format: &str,
) -> Result<()> {
    let results = client.query(query, label, limit).await?;

    if format == "json" {
        let json = serde_json::to_string_pretty(&results).map_err(SekhaError::Serialization)?;
        println!("{}", json);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", "No results found.".yellow());
        return Ok(());
    }

    println!("\nSearch: '{}'", query);
    results_table(&results).printstd();
    println!();
    Ok(())
}

/// Build the text-mode table for search results
fn results_table(results: &[Conversation]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["ID", "Label", "Preview"]);

    for conv in results {
        let id: String = conv.id.chars().take(ID_COLUMN_CHARS).collect();
        let preview = truncate_with_ellipsis(
            conv.preview.as_deref().unwrap_or_default(),
            PREVIEW_COLUMN_CHARS,
        );
        table.add_row(row![id.cyan(), conv.label_or_unknown().magenta(), preview]);
    }

    table
}

/// Store a conversation file under `label`
pub async fn store(client: &SekhaClient, file: &Path, label: &str) -> Result<()> {
    let stored = client.store_conversation(file, label).await?;
    println!(
        "{}",
        format!("Stored conversation: {}", stored.id).green()
    );
    Ok(())
}

/// Fetch and print one conversation
pub async fn show(client: &SekhaClient, conversation_id: &str, format: &str) -> Result<()> {
    let format: DetailFormat = format.parse()?;
    let conv = client.get_conversation(conversation_id).await?;
    print!("{}", render::render_conversation(&conv, format)?);
    if format == DetailFormat::Json {
        println!();
    }
    Ok(())
}

/// Export every conversation carrying `label` to `output`
pub async fn export(client: &SekhaClient, label: &str, output: &Path, format: &str) -> Result<()> {
    let content = client.export(label, format).await?;
    std::fs::write(output, content).map_err(SekhaError::Io)?;
    println!(
        "{}",
        format!("Exported to {}", output.display()).green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake::{conversation, FakeMemoryService};
    use crate::test_utils::temp_dir;

    #[test]
    fn test_results_table_truncates_id_and_preview() {
        let mut conv = conversation("conv-0123456789abcdef", "Work", &[]);
        conv.preview = Some("p".repeat(150));

        let rendered = results_table(&[conv]).to_string();

        assert!(rendered.contains("conv-0123456"));
        assert!(!rendered.contains("conv-01234567"));
        assert!(rendered.contains(&format!("{}...", "p".repeat(100))));
        assert!(!rendered.contains(&"p".repeat(101)));
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = temp_dir();
        let output = dir.path().join("backup.md");
        let conv = conversation("conv-1", "Project:AI", &[("user", "Hello")]);
        let client = SekhaClient::new(FakeMemoryService::new().with_conversations(vec![conv]));

        export(&client, "Project:AI", &output, "markdown")
            .await
            .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("# Project:AI"));
        assert!(written.contains("**User:** Hello"));
    }

    #[tokio::test]
    async fn test_export_rejected_format_writes_nothing() {
        let dir = temp_dir();
        let output = dir.path().join("backup.csv");
        let client = SekhaClient::new(FakeMemoryService::new());

        assert!(export(&client, "Work", &output, "csv").await.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_show_unknown_format_fails_before_fetch() {
        let client = SekhaClient::new(FakeMemoryService::new());
        let err = show(&client, "conv-1", "yaml").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported format"));
    }
}
