use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::deducer::pyproject_toml::PyprojectTomlDeducer;
use crate::deducer::PositionDeducer;
use crate::models::{Dependency, DependencyCategory, DependencyStatus, Extra, Finding};

use super::{capture_stdout, classify_run_error, CheckOutcome, Checker, RunFn};

const INSTALL_URL: &str = "https://github.com/tweag/FawltyDeps#installation";
const DOCS_URL: &str = "https://github.com/tweag/FawltyDeps";

/// FawltyDeps exits 1-4 when it found undeclared/unused dependencies and 5
/// on an empty result set; none of those mean the run itself failed.
const SOFT_EXIT_CODES: [i32; 5] = [1, 2, 3, 4, 5];

const HELP_TEXT: &str = "
This report was generated using \
**[FawltyDeps](https://github.com/tweag/FawltyDeps)**, a tool for identifying \
undeclared and unused dependencies in Python projects.

If you believe a dependency has been incorrectly flagged:

1. Run `poetry run fawltydeps` locally to replicate the findings.
2. Check the [FawltyDeps configuration guide](https://github.com/tweag/FawltyDeps#configuration); \
some dependencies are used in ways static analysis cannot detect and must be \
ignored explicitly.
3. If local results are also wrong, report it on the \
[FawltyDeps repository](https://github.com/tweag/FawltyDeps/issues); otherwise \
report it on this repository's issue tracker.
";

#[derive(Debug, Deserialize)]
struct FawltyReference {
    path: String,
}

#[derive(Debug, Deserialize)]
struct FawltyFinding {
    name: String,
    #[serde(default)]
    references: Vec<FawltyReference>,
}

#[derive(Debug, Deserialize)]
struct FawltyReport {
    #[serde(default)]
    unused_deps: Vec<FawltyFinding>,
    #[serde(default)]
    undeclared_deps: Vec<FawltyFinding>,
}

/// Checker for Python projects, wrapping FawltyDeps.
pub struct FawltyDepsChecker {
    deducer: PyprojectTomlDeducer,
    run_fn: RunFn,
}

impl FawltyDepsChecker {
    pub fn new() -> Self {
        Self::with_run_fn(Box::new(default_run))
    }

    pub fn with_run_fn(run_fn: RunFn) -> Self {
        Self {
            deducer: PyprojectTomlDeducer,
            run_fn,
        }
    }
}

impl Default for FawltyDepsChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for FawltyDepsChecker {
    fn name(&self) -> &'static str {
        "FawltyDeps"
    }

    fn manifest_file(&self) -> &'static str {
        "pyproject.toml"
    }

    fn run(&self, project_root: &Path, debug: bool) -> Result<CheckOutcome> {
        let stdout = (self.run_fn)(project_root)
            .map_err(|err| classify_run_error(err, self.name(), INSTALL_URL, DOCS_URL))?;
        if debug {
            eprintln!("{stdout}");
        }
        Ok(CheckOutcome {
            findings: self.parse_output(&stdout, project_root)?,
            help_text: HELP_TEXT,
        })
    }
}

fn default_run(project_root: &Path) -> Result<String> {
    capture_stdout(
        "poetry",
        &["run", "fawltydeps", "--json"],
        project_root,
        &SOFT_EXIT_CODES,
    )
}

impl FawltyDepsChecker {
    fn parse_output(&self, json_output: &str, project_root: &Path) -> Result<Vec<Finding>> {
        let report: FawltyReport =
            serde_json::from_str(json_output).context("malformed FawltyDeps JSON report")?;

        let mut findings = Vec::new();

        for unused in &report.unused_deps {
            // The tool names the manifest reference the dependency came
            // from; without one, fall back to the checker's own manifest.
            let source_file = unused
                .references
                .first()
                .map(|reference| reference.path.clone())
                .unwrap_or_else(|| self.manifest_file().to_string());

            findings.push(Finding {
                status: DependencyStatus::Unused,
                category: DependencyCategory::Runtime,
                dependency: Dependency {
                    name: unused.name.clone(),
                    version: None,
                },
                position: self
                    .deducer
                    .find_position(&project_root.join(&source_file), &unused.name),
                source_file,
                optional: None,
                extra: Some(Extra {
                    link: format!("https://pypi.org/project/{}", unused.name),
                    icon: "res/pypi.svg".to_string(),
                }),
            });
        }

        for undeclared in &report.undeclared_deps {
            findings.push(Finding {
                status: DependencyStatus::Undeclared,
                category: DependencyCategory::Unknown,
                dependency: Dependency {
                    name: undeclared.name.clone(),
                    version: None,
                },
                source_file: undeclared
                    .references
                    .first()
                    .map(|reference| reference.path.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                position: None,
                optional: None,
                extra: Some(Extra {
                    link: format!("https://pypi.org/project/{}", undeclared.name),
                    icon: "res/pypi.svg".to_string(),
                }),
            });
        }

        Ok(findings)
    }
}
