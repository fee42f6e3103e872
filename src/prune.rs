//! Pruning workflow
//!
//! Surfaces low-value conversations for removal and archives them only
//! after an explicit confirmation. The workflow is a small per-invocation
//! state machine:
//!
//! ```text
//! Fetch --(no suggestions)--> Clean
//!   |
//!   +--(dry run)-----------> DryRun
//!   |
//!   Confirm --(denied)-----> Aborted
//!   |
//!   Apply -----------------> Applied(report)
//! ```
//!
//! Confirmation is an injected callback rather than terminal I/O, so the
//! workflow can be driven from tests or from non-interactive callers.

use serde::Serialize;
use std::fmt;

use crate::client::SekhaClient;
use crate::error::Result;
use crate::service::PruningSuggestion;

/// How the apply phase reacts to a failed archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrunePolicy {
    /// Record the failure and keep archiving the remaining suggestions
    #[default]
    BestEffort,
    /// Stop at the first failure; earlier archivals are not rolled back
    StopOnFailure,
}

/// Options for a pruning run
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneOptions {
    /// Only report what would be archived
    pub dry_run: bool,
    /// Failure handling during the apply phase
    pub policy: PrunePolicy,
}

/// A suggestion whose archive call failed
#[derive(Debug, Serialize)]
pub struct ArchiveFailure {
    /// Conversation identifier
    pub id: String,
    /// Rendered error
    pub error: String,
}

/// Result of the apply phase
#[derive(Debug, Default, Serialize)]
pub struct PruneReport {
    /// Identifiers archived successfully, in archive order
    pub archived: Vec<String>,
    /// Per-item failures, in archive order
    pub failures: Vec<ArchiveFailure>,
    /// Suggestions not attempted because the batch stopped early
    pub skipped: Vec<String>,
}

impl PruneReport {
    /// Whether every suggestion was archived
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }
}

/// Terminal state of a pruning run
#[derive(Debug)]
pub enum PruneOutcome {
    /// The service had nothing to suggest
    Clean,
    /// Dry run; nothing was archived
    DryRun(Vec<PruningSuggestion>),
    /// Confirmation was withheld; nothing was archived
    Aborted(Vec<PruningSuggestion>),
    /// Archival was attempted for the confirmed suggestions
    Applied(PruneReport),
}

impl fmt::Display for PruneOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::DryRun(s) => write!(f, "dry run ({} suggestions)", s.len()),
            Self::Aborted(s) => write!(f, "aborted ({} suggestions)", s.len()),
            Self::Applied(r) => write!(
                f,
                "applied ({} archived, {} failed, {} skipped)",
                r.archived.len(),
                r.failures.len(),
                r.skipped.len()
            ),
        }
    }
}

/// Run the pruning workflow
///
/// `confirm` is called once with the fetched suggestions, and only when
/// there is something to archive and `dry_run` is off. Archive calls are
/// issued sequentially in the order the suggestions were returned.
///
/// # Errors
///
/// Returns an error only if fetching suggestions fails. Per-item archive
/// failures are reported in [`PruneReport::failures`].
///
/// # Examples
///
/// ```no_run
/// use sekha_cli::prune::{prune, PruneOptions, PruneOutcome};
/// use sekha_cli::SekhaClient;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = SekhaClient::connect("http://localhost:8080", "sk-test")?;
/// let outcome = prune(&client, PruneOptions::default(), |_| false).await?;
/// assert!(matches!(outcome, PruneOutcome::Clean | PruneOutcome::Aborted(_)));
/// # Ok(())
/// # }
/// ```
pub async fn prune<F>(client: &SekhaClient, options: PruneOptions, confirm: F) -> Result<PruneOutcome>
where
    F: FnOnce(&[PruningSuggestion]) -> bool,
{
    let suggestions = client.get_pruning_suggestions().await?;

    if suggestions.is_empty() {
        tracing::info!("No pruning suggestions");
        return Ok(PruneOutcome::Clean);
    }

    if options.dry_run {
        tracing::info!("Dry run: {} conversations would be pruned", suggestions.len());
        return Ok(PruneOutcome::DryRun(suggestions));
    }

    if !confirm(&suggestions) {
        tracing::info!("Pruning aborted by caller");
        return Ok(PruneOutcome::Aborted(suggestions));
    }

    Ok(PruneOutcome::Applied(
        apply(client, &suggestions, options.policy).await,
    ))
}

async fn apply(
    client: &SekhaClient,
    suggestions: &[PruningSuggestion],
    policy: PrunePolicy,
) -> PruneReport {
    let mut report = PruneReport::default();

    for (index, suggestion) in suggestions.iter().enumerate() {
        match client.archive(&suggestion.id).await {
            Ok(()) => {
                tracing::debug!("Archived {} ({})", suggestion.id, suggestion.reason);
                report.archived.push(suggestion.id.clone());
            }
            Err(e) => {
                tracing::warn!("Failed to archive {}: {}", suggestion.id, e);
                report.failures.push(ArchiveFailure {
                    id: suggestion.id.clone(),
                    error: e.to_string(),
                });

                if policy == PrunePolicy::StopOnFailure {
                    report.skipped = suggestions[index + 1..]
                        .iter()
                        .map(|s| s.id.clone())
                        .collect();
                    break;
                }
            }
        }
    }

    tracing::info!(
        "Pruning applied: {} archived, {} failed, {} skipped",
        report.archived.len(),
        report.failures.len(),
        report.skipped.len()
    );

    report
}
