// src/storage/mod.rs
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::batch::RunSummary;
use crate::utils::error::{InjectError, StorageError};

/// Reads and overwrites documentation pages below a docs root.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Resolves a configured page path against the docs root
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Reads the full text of a document as UTF-8.
    pub async fn read(&self, relative: &str) -> Result<String, InjectError> {
        let path = self.resolve(relative);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                tracing::debug!("Read {} ({} bytes)", path.display(), text.len());
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(InjectError::NotFound(path)),
            Err(source) => Err(InjectError::NotReadable { path, source }),
        }
    }

    /// Overwrites a document with `text`.
    pub async fn write(&self, relative: &str, text: &str) -> Result<(), InjectError> {
        let path = self.resolve(relative);
        tokio::fs::write(&path, text)
            .await
            .map_err(|source| InjectError::NotWritable { path: path.clone(), source })?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), text.len());
        Ok(())
    }
}

/// Saves a run summary as pretty JSON at `report_path`.
pub fn save_run_report(report_path: &Path, summary: &RunSummary) -> Result<PathBuf, StorageError> {
    // Create the parent directory if it doesn't exist
    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(StorageError::IoError)?;
        }
    }

    let report = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "dry_run": summary.dry_run,
        "updated": summary.updated(),
        "already_present": summary.already_present(),
        "missing_anchor": summary.missing_anchor(),
        "failed": summary.failed(),
        "documents": summary.results,
    });

    let report_str = serde_json::to_string_pretty(&report)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    fs::write(report_path, report_str).map_err(StorageError::IoError)?;

    tracing::info!("Saved run report to {}", report_path.display());

    Ok(report_path.to_path_buf())
}
