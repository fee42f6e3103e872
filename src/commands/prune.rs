//! Interactive pruning command
//!
//! Wraps [`crate::prune::prune`] with terminal output and a y/N prompt.

use colored::Colorize;

use crate::client::SekhaClient;
use crate::commands::confirm;
use crate::error::Result;
use crate::prune::{prune, PruneOptions, PruneOutcome, PrunePolicy, PruneReport};
use crate::service::PruningSuggestion;

/// Run the pruning workflow from the command line
///
/// With `assume_yes` the confirmation prompt is skipped.
///
/// # Errors
///
/// Returns error if suggestions cannot be fetched, the prompt cannot be
/// read, or any individual archive failed
pub async fn run_prune(
    client: &SekhaClient,
    dry_run: bool,
    assume_yes: bool,
    stop_on_error: bool,
) -> Result<()> {
    let options = PruneOptions {
        dry_run,
        policy: if stop_on_error {
            PrunePolicy::StopOnFailure
        } else {
            PrunePolicy::BestEffort
        },
    };

    let mut prompt_error = None;
    let outcome = prune(client, options, |suggestions| {
        if assume_yes {
            return true;
        }
        print_suggestions(suggestions);
        match confirm(&format!("Prune {} conversations?", suggestions.len())) {
            Ok(answer) => answer,
            Err(e) => {
                prompt_error = Some(e);
                false
            }
        }
    })
    .await?;

    if let Some(e) = prompt_error {
        return Err(e);
    }

    match outcome {
        PruneOutcome::Clean => {
            println!("{}", "No conversations need pruning.".green());
            Ok(())
        }
        PruneOutcome::DryRun(suggestions) => {
            println!(
                "{}",
                format!("Would prune {} conversations:", suggestions.len()).yellow()
            );
            print_suggestions(&suggestions);
            Ok(())
        }
        PruneOutcome::Aborted(_) => {
            println!("{}", "Pruning cancelled.".yellow());
            Ok(())
        }
        PruneOutcome::Applied(report) => report_applied(&report),
    }
}

fn print_suggestions(suggestions: &[PruningSuggestion]) {
    for s in suggestions {
        println!("  - {}: {}", s.id, s.reason);
    }
}

fn report_applied(report: &PruneReport) -> Result<()> {
    if report.is_complete() {
        println!(
            "{}",
            format!("Pruning complete. Archived {} conversations.", report.archived.len()).green()
        );
        return Ok(());
    }

    for failure in &report.failures {
        println!(
            "{}",
            format!("  ! {}: {}", failure.id, failure.error).red()
        );
    }
    for id in &report.skipped {
        println!("  - {}: skipped", id);
    }

    Err(anyhow::anyhow!(
        "{} archived, {} failed, {} skipped",
        report.archived.len(),
        report.failures.len(),
        report.skipped.len()
    ))
}
