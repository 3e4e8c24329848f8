use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{
    Dependency, DependencyCategory, DependencyStatus, Extra, Finding, Position,
};

use super::{capture_stdout, classify_run_error, CheckOutcome, Checker, RunFn};

const INSTALL_URL: &str = "https://knip.dev/overview/getting-started";
const DOCS_URL: &str = "https://knip.dev";

const HELP_TEXT: &str = "
This report was generated using **[Knip](https://knip.dev)**, a tool for \
identifying unused files, exports, and dependencies in JavaScript/TypeScript \
projects.

If you believe a dependency has been incorrectly flagged:

1. Run `npx knip` locally to replicate the findings.
2. Check the [Knip configuration guide](https://knip.dev/overview/configuration); \
you may need to define entry points or ignore specific files.
3. If local results are also wrong, report it on the \
[Knip repository](https://github.com/webpro/knip/issues); otherwise report it \
on this repository's issue tracker.
";

#[derive(Debug, Deserialize)]
struct KnipIssue {
    name: String,
    #[serde(default)]
    line: Option<usize>,
    #[serde(default)]
    col: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct KnipFileIssues {
    file: String,
    #[serde(default)]
    dependencies: Vec<KnipIssue>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Vec<KnipIssue>,
    #[serde(default)]
    unlisted: Vec<KnipIssue>,
    #[serde(default)]
    unresolved: Vec<KnipIssue>,
}

#[derive(Debug, Deserialize)]
struct KnipReport {
    #[serde(default)]
    issues: Vec<KnipFileIssues>,
}

/// Checker for JavaScript/TypeScript projects, wrapping Knip.
///
/// Positions come straight from the tool's own line/column rather than a
/// deducer; Knip already points at the exact declaration.
pub struct KnipChecker {
    run_fn: RunFn,
}

impl KnipChecker {
    pub fn new() -> Self {
        Self::with_run_fn(Box::new(default_run))
    }

    pub fn with_run_fn(run_fn: RunFn) -> Self {
        Self { run_fn }
    }
}

impl Default for KnipChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for KnipChecker {
    fn name(&self) -> &'static str {
        "Knip"
    }

    fn manifest_file(&self) -> &'static str {
        "package.json"
    }

    fn run(&self, project_root: &Path, debug: bool) -> Result<CheckOutcome> {
        let stdout = (self.run_fn)(project_root)
            .map_err(|err| classify_run_error(err, self.name(), INSTALL_URL, DOCS_URL))?;
        if debug {
            eprintln!("{stdout}");
        }
        Ok(CheckOutcome {
            findings: parse_output(&stdout)?,
            help_text: HELP_TEXT,
        })
    }
}

fn default_run(project_root: &Path) -> Result<String> {
    capture_stdout(
        "npx",
        &["knip", "--no-exit-code", "--no-progress", "--reporter=json"],
        project_root,
        &[],
    )
}

fn parse_output(json_output: &str) -> Result<Vec<Finding>> {
    let report: KnipReport =
        serde_json::from_str(json_output).context("malformed Knip JSON report")?;

    let mut findings = Vec::new();
    for file in &report.issues {
        let buckets: [(&[KnipIssue], DependencyStatus, DependencyCategory); 4] = [
            (
                &file.dependencies,
                DependencyStatus::Unused,
                DependencyCategory::Runtime,
            ),
            (
                &file.dev_dependencies,
                DependencyStatus::Unused,
                DependencyCategory::Development,
            ),
            (
                &file.unlisted,
                DependencyStatus::Undeclared,
                DependencyCategory::Runtime,
            ),
            (
                &file.unresolved,
                DependencyStatus::Undeclared,
                DependencyCategory::Unknown,
            ),
        ];

        for (issues, status, category) in buckets {
            for issue in issues {
                // Both coordinates must be present and nonzero.
                let position = match (issue.line, issue.col) {
                    (Some(line), Some(col)) if line > 0 && col > 0 => {
                        Some(Position { line, column: col })
                    }
                    _ => None,
                };

                findings.push(Finding {
                    status,
                    category,
                    dependency: Dependency {
                        name: issue.name.clone(),
                        version: None,
                    },
                    source_file: file.file.clone(),
                    position,
                    optional: None,
                    extra: Some(Extra {
                        link: format!("https://www.npmjs.com/package/{}", issue.name),
                        icon: "res/npm.svg".to_string(),
                    }),
                });
            }
        }
    }
    Ok(findings)
}
