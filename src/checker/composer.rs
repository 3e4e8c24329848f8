use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::deducer::composer_json::ComposerJsonDeducer;
use crate::deducer::PositionDeducer;
use crate::models::{Dependency, DependencyCategory, DependencyStatus, Extra, Finding};

use super::{capture_stdout, classify_run_error, CheckOutcome, Checker, RunFn};

const INSTALL_URL: &str = "https://github.com/icanhazstring/composer-unused#installation";
const DOCS_URL: &str = "https://github.com/icanhazstring/composer-unused";

const HELP_TEXT: &str = "
This report was generated using \
**[composer-unused](https://github.com/icanhazstring/composer-unused)**, a \
tool for identifying unused dependencies in PHP projects.

If you believe a dependency has been incorrectly flagged:

1. Run `./vendor/bin/composer-unused` locally to replicate the findings.
2. Check the [composer-unused configuration guide](https://github.com/icanhazstring/composer-unused#configuration); \
you may need to tell the tool which directories to scan.
3. If local results are also wrong, report it on the \
[composer-unused repository](https://github.com/icanhazstring/composer-unused/issues); \
otherwise report it on this repository's issue tracker.
";

#[derive(Debug, Deserialize)]
struct ComposerUnusedReport {
    #[serde(default, rename = "unused-packages")]
    unused_packages: Vec<String>,
}

/// Checker for PHP projects, wrapping composer-unused.
pub struct ComposerUnusedChecker {
    deducer: ComposerJsonDeducer,
    run_fn: RunFn,
}

impl ComposerUnusedChecker {
    pub fn new() -> Self {
        Self::with_run_fn(Box::new(default_run))
    }

    pub fn with_run_fn(run_fn: RunFn) -> Self {
        Self {
            deducer: ComposerJsonDeducer,
            run_fn,
        }
    }
}

impl Default for ComposerUnusedChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for ComposerUnusedChecker {
    fn name(&self) -> &'static str {
        "Composer Unused"
    }

    fn manifest_file(&self) -> &'static str {
        "composer.json"
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
        "./vendor/bin/composer-unused",
        &["--no-progress", "--ignore-exit-code", "--output-format=json"],
        project_root,
        &[],
    )
}

impl ComposerUnusedChecker {
    fn parse_output(&self, json_output: &str, project_root: &Path) -> Result<Vec<Finding>> {
        let report: ComposerUnusedReport =
            serde_json::from_str(json_output).context("malformed composer-unused JSON report")?;
        let manifest_path = project_root.join(self.manifest_file());

        let findings = report
            .unused_packages
            .iter()
            // "php" is the language runtime, not a package.
            .filter(|package| package.as_str() != "php")
            .map(|package| Finding {
                status: DependencyStatus::Unused,
                category: DependencyCategory::Unknown,
                dependency: Dependency {
                    name: package.clone(),
                    version: None,
                },
                source_file: self.manifest_file().to_string(),
                position: self.deducer.find_position(&manifest_path, package),
                optional: None,
                extra: Some(Extra {
                    link: format!("https://packagist.org/packages/{package}"),
                    icon: "res/packagist.svg".to_string(),
                }),
            })
            .collect();
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::models::Position;
    use anyhow::anyhow;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parses_and_locates_unused_packages() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            "{\n    \"require\": {\n        \"monolog/monolog\": \"^3.0\"\n    }\n}\n",
        )
        .unwrap();

        let json = r#"{"unused-packages":["monolog/monolog"]}"#;
        let checker = ComposerUnusedChecker::with_run_fn(Box::new(move |_| Ok(json.to_string())));
        let outcome = checker.run(dir.path(), false).unwrap();

        assert_eq!(outcome.findings.len(), 1);
        let finding = &outcome.findings[0];
        assert_eq!(finding.status, DependencyStatus::Unused);
        assert_eq!(finding.category, DependencyCategory::Unknown);
        assert_eq!(finding.dependency.name, "monolog/monolog");
        assert_eq!(finding.source_file, "composer.json");
        assert_eq!(finding.position, Some(Position { line: 3, column: 9 }));
    }

    #[test]
    fn test_filters_php_runtime() {
        let dir = TempDir::new().unwrap();
        let json = r#"{"unused-packages":["php","symfony/console"]}"#;
        let checker = ComposerUnusedChecker::with_run_fn(Box::new(move |_| Ok(json.to_string())));
        let outcome = checker.run(dir.path(), false).unwrap();

        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].dependency.name, "symfony/console");
        // No manifest on disk, so the position is simply absent.
        assert_eq!(outcome.findings[0].position, None);
    }

    #[test]
    fn test_missing_command_is_not_installed() {
        let checker = ComposerUnusedChecker::with_run_fn(Box::new(|_| {
            Err(anyhow!("command not found: ./vendor/bin/composer-unused"))
        }));
        let err = checker.run(Path::new("/tmp"), false).unwrap_err();
        match err.downcast_ref::<ConfigurationError>() {
            Some(ConfigurationError::ToolNotInstalled { help_url, .. }) => {
                assert_eq!(*help_url, INSTALL_URL);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
