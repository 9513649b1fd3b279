// src/injector/sections.rs

// --- Imports ---
use crate::config::{ExampleRef, PageConfig, TestRef};

// --- Markers ---
/// Presence of this header means the page was already processed.
pub const CODE_EXAMPLES_MARKER: &str = "## Code Examples";
/// Generated sections are inserted right before the first occurrence of this header.
pub const SEE_ALSO_ANCHOR: &str = "## See Also";

const EXAMPLES_HEADER: &str = "\n## Code Examples\n\nThe following working examples demonstrate this feature:\n\n";
const EXAMPLES_FOOTER: &str = "\nAll examples are fully tested and can be run directly.\n";
const TESTS_HEADER: &str = "\n## Related Tests\n\nThe functionality is thoroughly tested. Key test files:\n\n";

/// Renders the "Code Examples" and "Related Tests" blocks for a page.
#[derive(Debug, Clone)]
pub struct SectionRenderer {
    base_url: String,
    task_runner: String,
}

impl SectionRenderer {
    pub fn new(base_url: &str, task_runner: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            task_runner: task_runner.to_string(),
        }
    }

    /// Plain concatenation, no escaping and no existence check.
    pub fn link(&self, relative_path: &str) -> String {
        format!("{}{}", self.base_url, relative_path)
    }

    pub fn examples_block(&self, examples: &[ExampleRef]) -> String {
        let mut block = String::from(EXAMPLES_HEADER);
        for example in examples {
            block.push_str(&format!(
                "- [**{}**]({}) - {}\n",
                example.title,
                self.link(&example.path),
                example.description
            ));
        }
        block.push_str(EXAMPLES_FOOTER);
        block
    }

    pub fn tests_block(&self, tests: &[TestRef], test_filter: &str) -> String {
        let mut block = String::from(TESTS_HEADER);
        for test in tests {
            let label = last_path_segment(&test.path);
            match &test.description {
                Some(desc) => block.push_str(&format!("- [{}]({}) - {}\n", label, self.link(&test.path), desc)),
                None => block.push_str(&format!("- [{}]({})\n", label, self.link(&test.path))),
            }
        }
        block.push_str(&self.test_command(test_filter));
        block
    }

    // The trailing blank line separates the snippet from the anchor that follows it
    fn test_command(&self, test_filter: &str) -> String {
        format!(
            "\nRun the tests:\n\n```bash\n# Run tests\n{} test:unit -- --filter={}\n```\n\n",
            self.task_runner, test_filter
        )
    }

    /// Everything that goes in front of the anchor: examples block, then tests block.
    pub fn render(&self, page: &PageConfig) -> String {
        let mut sections = self.examples_block(&page.examples);
        sections.push_str(&self.tests_block(&page.tests, &page.test_filter));
        sections
    }
}

/// Everything after the last `/`. Purely string based.
pub fn last_path_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Replaces the first occurrence of `anchor` with `insert + anchor`.
/// Returns `None` when the anchor is absent. Later occurrences are left alone.
pub fn splice(text: &str, anchor: &str, insert: &str) -> Option<String> {
    let pos = text.find(anchor)?;
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..pos]);
    out.push_str(insert);
    out.push_str(&text[pos..]);
    Some(out)
}
