// src/injector/mod.rs
pub mod sections;

use std::fmt;

use serde::Serialize;

use crate::config::{DocsConfig, PageConfig};
use crate::storage::DocumentStore;
use crate::utils::error::InjectError;
use sections::{splice, SectionRenderer, CODE_EXAMPLES_MARKER, SEE_ALSO_ANCHOR};

/// Why a page was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The page already has a "Code Examples" section.
    AlreadyPresent,
    /// The page has no "See Also" header to insert before.
    MissingAnchor,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyPresent => write!(f, "already has examples section"),
            SkipReason::MissingAnchor => write!(f, "no 'See Also' section found"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Skipped(SkipReason),
}

/// Injects generated example and test sections into documentation pages.
pub struct DocInjector {
    renderer: SectionRenderer,
    store: DocumentStore,
    dry_run: bool,
}

impl DocInjector {
    pub fn new(config: &DocsConfig, store: DocumentStore) -> Self {
        Self {
            renderer: SectionRenderer::new(&config.base_url, &config.task_runner),
            store,
            dry_run: false,
        }
    }

    /// Run guards and rendering but never write back.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Pure transform of a page's text.
    ///
    /// The code examples header doubles as the processed flag: a page that
    /// contains it is never touched again, so repeated runs don't duplicate
    /// sections.
    pub fn inject(&self, text: &str, page: &PageConfig) -> Result<String, SkipReason> {
        if text.contains(CODE_EXAMPLES_MARKER) {
            return Err(SkipReason::AlreadyPresent);
        }
        let sections = self.renderer.render(page);
        splice(text, SEE_ALSO_ANCHOR, &sections).ok_or(SkipReason::MissingAnchor)
    }

    /// Reads the page, injects the sections and overwrites it.
    /// Skips leave the file byte-identical.
    pub async fn process(&self, page: &PageConfig) -> Result<Outcome, InjectError> {
        let text = self.store.read(&page.path).await?;

        let updated = match self.inject(&text, page) {
            Ok(updated) => updated,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };

        if self.dry_run {
            tracing::debug!("Dry run, not writing {} ({} bytes)", page.path, updated.len());
        } else {
            self.store.write(&page.path, &updated).await?;
        }
        Ok(Outcome::Updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExampleRef, TestRef};
    use std::fs;

    const BASE: &str = "https://github.com/acme/widgets/blob/main/";

    fn config() -> DocsConfig {
        DocsConfig {
            base_url: BASE.to_string(),
            task_runner: "task".to_string(),
            pages: vec![],
        }
    }

    fn page(path: &str) -> PageConfig {
        PageConfig {
            path: path.to_string(),
            examples: vec![ExampleRef::new("Basic", "ex/basic.php", "desc")],
            tests: vec![TestRef::new("tests/T.php", Some("unit test"))],
            test_filter: "Foo".to_string(),
        }
    }

    fn injector(root: &std::path::Path) -> DocInjector {
        DocInjector::new(&config(), DocumentStore::new(root))
    }

    #[test]
    fn test_inject_example_scenario() {
        let inj = injector(std::path::Path::new("."));
        let input = "# Title\n\n## See Also\n- link\n";
        let out = inj.inject(input, &page("docs/a.md")).unwrap();

        let expected = format!(
            "# Title\n\n\
             \n## Code Examples\n\n\
             The following working examples demonstrate this feature:\n\n\
             - [**Basic**]({base}ex/basic.php) - desc\n\
             \nAll examples are fully tested and can be run directly.\n\
             \n## Related Tests\n\n\
             The functionality is thoroughly tested. Key test files:\n\n\
             - [T.php]({base}tests/T.php) - unit test\n\
             \nRun the tests:\n\n```bash\n# Run tests\ntask test:unit -- --filter=Foo\n```\n\
             \n## See Also\n- link\n",
            base = BASE
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_inject_preserves_text_around_anchor() {
        let inj = injector(std::path::Path::new("."));
        let before = "# Title\r\n\n  Intro with trailing spaces   \n\n";
        let after = "## See Also\n- one\n\n## See Also\n- two\n";
        let input = format!("{}{}", before, after);

        let out = inj.inject(&input, &page("docs/a.md")).unwrap();
        assert!(out.starts_with(before));
        assert!(out.ends_with(after));
        // Only the first anchor received content
        assert_eq!(out.matches("## Code Examples").count(), 1);
        assert_eq!(out.matches("## See Also").count(), 2);
    }

    #[test]
    fn test_inject_is_idempotent() {
        let inj = injector(std::path::Path::new("."));
        let p = page("docs/a.md");
        let once = inj.inject("# T\n\n## See Also\n", &p).unwrap();
        assert_eq!(inj.inject(&once, &p), Err(SkipReason::AlreadyPresent));
    }

    #[test]
    fn test_marker_check_runs_before_anchor_check() {
        let inj = injector(std::path::Path::new("."));
        let result = inj.inject("# T\n\n## Code Examples\n", &page("docs/a.md"));
        assert_eq!(result, Err(SkipReason::AlreadyPresent));
    }

    #[tokio::test]
    async fn test_process_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# Title\n\n## See Also\n- link\n").unwrap();

        let outcome = injector(dir.path()).process(&page("a.md")).await.unwrap();
        assert_eq!(outcome, Outcome::Updated);

        let text = fs::read_to_string(dir.path().join("a.md")).unwrap();
        let examples = text.find("## Code Examples").unwrap();
        let tests = text.find("## Related Tests").unwrap();
        let filter = text.find("--filter=Foo").unwrap();
        let see_also = text.find("## See Also").unwrap();
        assert!(text.starts_with("# Title\n"));
        assert!(examples < tests && tests < filter && filter < see_also);
        assert!(text.ends_with("## See Also\n- link\n"));
    }

    #[tokio::test]
    async fn test_process_twice_is_noop_the_second_time() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# Title\n\n## See Also\n").unwrap();
        let inj = injector(dir.path());

        assert_eq!(inj.process(&page("a.md")).await.unwrap(), Outcome::Updated);
        let first = fs::read(dir.path().join("a.md")).unwrap();

        assert_eq!(
            inj.process(&page("a.md")).await.unwrap(),
            Outcome::Skipped(SkipReason::AlreadyPresent)
        );
        assert_eq!(fs::read(dir.path().join("a.md")).unwrap(), first);
    }

    #[tokio::test]
    async fn test_missing_anchor_leaves_file_identical() {
        let dir = tempfile::tempdir().unwrap();
        let original = "# Title\n\nNo related links here.\n";
        fs::write(dir.path().join("a.md"), original).unwrap();

        let outcome = injector(dir.path()).process(&page("a.md")).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingAnchor));
        assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), original);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let original = "# Title\n\n## See Also\n";
        fs::write(dir.path().join("a.md"), original).unwrap();

        let inj = injector(dir.path()).with_dry_run(true);
        assert_eq!(inj.process(&page("a.md")).await.unwrap(), Outcome::Updated);
        assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), original);
    }

    #[tokio::test]
    async fn test_missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = injector(dir.path()).process(&page("nope.md")).await;
        assert!(matches!(result, Err(InjectError::NotFound(_))));
    }
}
