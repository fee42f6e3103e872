use colored::Colorize;
use prettytable::{format, Table};

use crate::client::SekhaClient;
use crate::error::Result;
use crate::service::Label;

/// List all labels with conversation counts
pub async fn list(client: &SekhaClient) -> Result<()> {
    let labels = client.list_labels().await?;

    if labels.is_empty() {
        println!("{}", "No labels found.".yellow());
        return Ok(());
    }

    println!("\nLabels:");
    labels_table(&labels).printstd();
    println!();
    Ok(())
}

fn labels_table(labels: &[Label]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Label".bold(), "Count".bold()]);

    for label in labels {
        table.add_row(prettytable::row![label.name.cyan(), label.count]);
    }

    table
}
