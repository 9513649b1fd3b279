// src/batch.rs
use serde::Serialize;

use crate::config::PageConfig;
use crate::injector::{DocInjector, Outcome, SkipReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Updated,
    AlreadyPresent,
    MissingAnchor,
    Failed,
}

impl From<Outcome> for DocumentStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Updated => DocumentStatus::Updated,
            Outcome::Skipped(SkipReason::AlreadyPresent) => DocumentStatus::AlreadyPresent,
            Outcome::Skipped(SkipReason::MissingAnchor) => DocumentStatus::MissingAnchor,
        }
    }
}

/// Result of processing one page.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    pub path: String,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentResult {
    pub fn new(path: &str, status: DocumentStatus, error: Option<String>) -> Self {
        Self { path: path.to_string(), status, error }
    }
}

/// Per-document results of a run, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    pub results: Vec<DocumentResult>,
}

impl RunSummary {
    fn count(&self, status: DocumentStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn updated(&self) -> usize {
        self.count(DocumentStatus::Updated)
    }

    pub fn already_present(&self) -> usize {
        self.count(DocumentStatus::AlreadyPresent)
    }

    pub fn missing_anchor(&self) -> usize {
        self.count(DocumentStatus::MissingAnchor)
    }

    pub fn failed(&self) -> usize {
        self.count(DocumentStatus::Failed)
    }
}

/// Processes every page in order. A failing page is logged and recorded;
/// it never stops the rest of the batch.
pub async fn run(injector: &DocInjector, pages: &[PageConfig]) -> RunSummary {
    let mut summary = RunSummary {
        dry_run: injector.is_dry_run(),
        results: Vec::with_capacity(pages.len()),
    };

    for page in pages {
        let result = match injector.process(page).await {
            Ok(outcome) => {
                match outcome {
                    Outcome::Updated if injector.is_dry_run() => tracing::info!("Would update {}", page.path),
                    Outcome::Updated => tracing::info!("Updated {}", page.path),
                    Outcome::Skipped(reason @ SkipReason::AlreadyPresent) => {
                        tracing::info!("Skipping {} ({})", page.path, reason)
                    }
                    Outcome::Skipped(reason @ SkipReason::MissingAnchor) => {
                        tracing::warn!("Skipping {} ({})", page.path, reason)
                    }
                }
                DocumentResult::new(&page.path, outcome.into(), None)
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", page.path, e);
                DocumentResult::new(&page.path, DocumentStatus::Failed, Some(e.to_string()))
            }
        };
        summary.results.push(result);
    }

    summary
}
