// src/config/models.rs
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://github.com/event4u-app/data-helpers/blob/main/";
pub const DEFAULT_TASK_RUNNER: &str = "task";

/// The whole page table plus the constants used when rendering links and commands.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    /// Prefix for every generated link; relative paths are appended verbatim.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Command name used in the "Run the tests" snippet.
    #[serde(default = "default_task_runner")]
    pub task_runner: String,

    /// Pages in processing order.
    pub pages: Vec<PageConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_task_runner() -> String {
    DEFAULT_TASK_RUNNER.to_string()
}

/// One documentation page and the references injected into it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageConfig {
    /// Document path, relative to the docs root.
    pub path: String,
    #[serde(default)]
    pub examples: Vec<ExampleRef>,
    #[serde(default)]
    pub tests: Vec<TestRef>,
    /// Substituted into `--filter=` of the test command.
    pub test_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExampleRef {
    pub title: String,
    pub path: String,
    pub description: String,
}

impl ExampleRef {
    pub fn new(title: &str, path: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        }
    }
}

/// A test file reference. The description is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TestRefRepr")]
pub struct TestRef {
    pub path: String,
    pub description: Option<String>,
}

// Accepted JSON shapes: "tests/A.php - Desc", "tests/A.php", or {"path": ..., "description": ...}
#[derive(Deserialize)]
#[serde(untagged)]
enum TestRefRepr {
    Line(String),
    Entry {
        path: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<TestRefRepr> for TestRef {
    fn from(repr: TestRefRepr) -> Self {
        match repr {
            TestRefRepr::Line(line) => TestRef::parse(&line),
            TestRefRepr::Entry { path, description } => TestRef {
                path,
                description: description.filter(|d| !d.trim().is_empty()),
            },
        }
    }
}

impl TestRef {
    pub fn new(path: &str, description: Option<&str>) -> Self {
        Self {
            path: path.to_string(),
            description: description.map(str::to_string),
        }
    }

    /// Parses `"path - description"`, splitting on the first `" - "`.
    /// A line without the separator is a bare path.
    pub fn parse(line: &str) -> Self {
        match line.split_once(" - ") {
            Some((path, desc)) => {
                let desc = desc.trim();
                Self {
                    path: path.trim().to_string(),
                    description: (!desc.is_empty()).then(|| desc.to_string()),
                }
            }
            None => Self {
                path: line.trim().to_string(),
                description: None,
            },
        }
    }
}
