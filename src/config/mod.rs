// src/config/mod.rs
pub mod models;

use std::collections::HashSet;
use std::path::Path;

use crate::utils::error::ConfigError;
pub use models::{DocsConfig, ExampleRef, PageConfig, TestRef};

/// Page table shipped with the binary, used when no `--config` is given.
const EMBEDDED_PAGES: &str = include_str!("../../config/pages.json");

impl DocsConfig {
    /// Loads the page table.
    ///
    /// - If `path` is `Some`, load that file (error if missing).
    /// - If `path` is `None`, use the embedded table.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                tracing::debug!("Loading page table from {}", p.display());
                let contents = std::fs::read_to_string(p)?;
                Self::from_json(&contents)
            }
            None => {
                tracing::debug!("Using embedded page table");
                Self::from_json(EMBEDDED_PAGES)
            }
        }
    }

    /// Parses and validates a JSON page table.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: DocsConfig =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".to_string()));
        }
        if self.task_runner.trim().is_empty() {
            return Err(ConfigError::Invalid("task_runner is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.path.trim().is_empty() {
                return Err(ConfigError::Invalid("page with empty path".to_string()));
            }
            // Each document is processed at most once per run
            if !seen.insert(page.path.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate page {}", page.path)));
            }
            if page.test_filter.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{}: empty test_filter", page.path)));
            }
            for example in &page.examples {
                if example.title.is_empty() || example.path.is_empty() || example.description.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "{}: example entries need a title, path and description",
                        page.path
                    )));
                }
            }
            if page.tests.iter().any(|t| t.path.is_empty()) {
                return Err(ConfigError::Invalid(format!("{}: test entry with empty path", page.path)));
            }
        }
        Ok(())
    }
}
